pub mod app;
pub mod charts;
pub mod config;
pub mod counter;
pub mod dashboard;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod interactions;
pub mod models;
pub mod page;
pub mod state;
pub mod stats;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::router;
pub use config::Settings;
pub use dashboard::Dashboard;
pub use state::AppState;
pub use storage::{load_theme, persist_theme};

use crate::config::Settings;
use crate::counter::{SequencerHandle, spawn_sequencer};
use crate::dashboard::{Dashboard, DashboardSnapshot};
use crate::errors::AppError;
use crate::stats::StatsClient;
use crate::storage::persist_theme;
use crate::theme::Theme;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub stats: StatsClient,
    sequencer: Arc<Mutex<Option<SequencerHandle>>>,
}

impl AppState {
    pub fn new(settings: Settings, dashboard: Dashboard, stats: StatsClient) -> Self {
        Self {
            settings: Arc::new(settings),
            dashboard: Arc::new(Mutex::new(dashboard)),
            stats,
            sequencer: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn start_counter(&self) {
        let mut slot = self.sequencer.lock().await;
        if let Some(previous) = slot.take() {
            if !previous.is_finished() {
                info!("stopping running counter animation");
            }
            previous.stop();
        }
        *slot = Some(spawn_sequencer(
            Arc::clone(&self.dashboard),
            self.settings.counter,
        ));
    }

    pub async fn counter_running(&self) -> bool {
        self.sequencer
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn stop_counter(&self) {
        if let Some(handle) = self.sequencer.lock().await.take() {
            handle.stop();
            handle.join().await;
        }
    }

    // Fetches stats for the selected region and writes them out. The lock is
    // released while the request is in flight, so overlapping calls race and
    // whichever response lands last is what the widgets show.
    pub async fn refresh_country_stats(&self) {
        let region = self.dashboard.lock().await.country().clone();
        if let Some(stats) = self.stats.fetch_or_log(&region).await {
            self.dashboard.lock().await.apply_stats(&stats);
        }
    }

    pub async fn select_country(&self, raw: &str) {
        let region = self.dashboard.lock().await.select_country(raw);
        info!(country = region.as_str(), "country selected");
        self.refresh_country_stats().await;
    }

    pub async fn toggle_theme(&self) -> Result<Theme, AppError> {
        let mut dashboard = self.dashboard.lock().await;
        persist_theme(&self.settings.theme_path, dashboard.theme().toggled()).await?;
        Ok(dashboard.toggle_theme())
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let running = self.counter_running().await;
        self.dashboard.lock().await.snapshot(running)
    }
}

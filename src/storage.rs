use crate::errors::AppError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct ThemeRecord {
    #[serde(default)]
    theme: Theme,
}

pub async fn load_theme(path: &Path) -> Theme {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<ThemeRecord>(&bytes) {
            Ok(record) => record.theme,
            Err(err) => {
                error!("failed to parse theme file: {err}");
                Theme::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Theme::default(),
        Err(err) => {
            error!("failed to read theme file: {err}");
            Theme::default()
        }
    }
}

pub async fn persist_theme(path: &Path, theme: Theme) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(&ThemeRecord { theme }).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    info!(theme = theme.as_str(), "theme persisted");
    Ok(())
}

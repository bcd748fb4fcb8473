//! Daymark workspace root: config resolution and component wiring.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, File};

use crate::daymark_config::DaymarkConfig;
use crate::error::{DaymarkError, DaymarkResult};
use crate::notify::ChangeNotifier;
use crate::remote::SnapshotClient;
use crate::store::Store;

const DB_FILE: &str = "daymark.db";

#[derive(Clone)]
pub struct Daymark {
    config: DaymarkConfig,
}

impl Daymark {
    pub fn load() -> DaymarkResult<Self> {
        let config_path = DaymarkConfig::config_path()?;

        if !config_path.exists() {
            DaymarkConfig::create_default_config(&config_path)?;
        }

        let config: DaymarkConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| DaymarkError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaymarkError::Config(e.to_string()))?;

        Ok(Daymark { config })
    }

    pub fn config(&self) -> &DaymarkConfig {
        &self.config
    }

    /// Point at a different data directory (used by the CLI's --data-dir).
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.config.data_dir = Some(dir);
    }

    /// Point at a different snapshot server (used by the CLI's --server).
    pub fn set_server_url(&mut self, url: String) {
        self.config.server_url = url;
    }

    /// Resolved data directory, with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        match &self.config.data_dir {
            Some(dir) => {
                let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
                PathBuf::from(expanded)
            }
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("daymark"),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_path().join(DB_FILE)
    }

    /// Open the local store, creating the data directory if needed.
    pub fn open_store(&self) -> DaymarkResult<Store> {
        let data_path = self.data_path();
        std::fs::create_dir_all(&data_path)
            .map_err(|e| DaymarkError::Storage(format!("Could not create data directory: {e}")))?;

        Store::open(self.db_path())
    }

    pub fn notifier(&self) -> ChangeNotifier {
        ChangeNotifier::new(self.data_path())
    }

    pub fn client(&self) -> SnapshotClient {
        SnapshotClient::new(
            self.config.server_url.clone(),
            Duration::from_secs(self.config.request_timeout_secs),
        )
    }

    pub fn pull_interval(&self) -> Duration {
        Duration::from_secs(self.config.pull_interval_secs)
    }
}

//! Configuration management for timecard.
//!
//! Settings live in a JSON file inside the platform data directory (see
//! [`DataStorage`]). A missing file is not an error: every section has a
//! default, so the tool works without any setup.
//!
//! ## Sections
//!
//! - **tracker**: the attendance rules, i.e. how clock skew and clock-out
//!   during a break are handled (see [`TrackerPolicy`]).
//! - **database**: optional path to the SQLite file; defaults to
//!   `timecard.db` next to the configuration file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("skew policy: {:?}", config.tracker.skew);
//!
//! let updated = Config::init()?;
//! updated.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::attendance::{BreakAtClockOut, SkewPolicy, TrackerPolicy};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Rules applied by the attendance tracker.
    #[serde(default)]
    pub tracker: TrackerPolicy,

    /// Explicit database location. When absent the default data directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the configuration from `path`, falling back to defaults when the file is missing.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration to the default location as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file from the default location, if present.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Resolves where the SQLite database lives.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(crate::db::db::DB_FILE_NAME),
        }
    }

    /// Runs the interactive setup wizard, starting from the current configuration.
    pub fn init() -> Result<Config> {
        let mut config = Config::read()?;
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleTracker, true);

        let skew_options = [SkewPolicy::Clamp, SkewPolicy::Reject];
        let skew_labels = ["clamp to the latest event and flag the record", "reject the operation"];
        let skew = Select::with_theme(&theme)
            .with_prompt(Message::PromptSkewPolicy.to_string())
            .items(&skew_labels)
            .default(skew_options.iter().position(|p| *p == config.tracker.skew).unwrap_or(0))
            .interact()?;
        config.tracker.skew = skew_options[skew];

        let break_options = [BreakAtClockOut::AutoClose, BreakAtClockOut::Reject];
        let break_labels = ["end the break automatically", "refuse until the break is ended"];
        let break_at_clock_out = Select::with_theme(&theme)
            .with_prompt(Message::PromptBreakAtClockOut.to_string())
            .items(&break_labels)
            .default(break_options.iter().position(|p| *p == config.tracker.break_at_clock_out).unwrap_or(0))
            .interact()?;
        config.tracker.break_at_clock_out = break_options[break_at_clock_out];

        let current = config.database_path()?.display().to_string();
        let database: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(current.clone())
            .interact_text()?;
        config.database = (database != current || config.database.is_some()).then(|| PathBuf::from(database));

        Ok(config)
    }
}

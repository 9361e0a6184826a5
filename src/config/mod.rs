use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    errors::{ReservationError, Result},
    utils::fs::{app_data_dir, config_file_in, ensure_dir, write_atomic},
};

const WHATSAPP_BASE_URL: &str = "https://wa.me/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// International number without `+`, e.g. `33612345678`.
    pub whatsapp_number: String,
    /// `None` keeps every notification.
    pub notification_limit: Option<usize>,
    /// How many days ahead the schedule step offers slots.
    pub schedule_days_ahead: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "fr-FR".into(),
            currency: "EUR".into(),
            whatsapp_number: "33600000000".into(),
            notification_limit: Some(50),
            schedule_days_ahead: 14,
        }
    }
}

impl Config {
    /// Deep link opening a WhatsApp conversation with the business.
    pub fn whatsapp_link(&self) -> Result<String> {
        let digits: String = self
            .whatsapp_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '+' && *c != '.')
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ReservationError::Config(format!(
                "invalid WhatsApp number `{}`",
                self.whatsapp_number
            )));
        }
        Ok(format!("{WHATSAPP_BASE_URL}{digits}"))
    }
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Returns defaults when no configuration has been saved yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ReservationError::Config(err.to_string()))
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

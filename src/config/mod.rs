use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    booking::{parse_distance, FlowVariant, RouteInfo},
    errors::{BookingError, Result},
    payment::SimulatedGateway,
    utils::paths,
};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const DECLINE_REASON: &str = "issuer unavailable";

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "currency",
    "flow",
    "pickup",
    "dropoff",
    "distance",
    "payment-delay-ms",
    "payment-outcome",
    "plain-output",
];

/// How the simulated gateway answers every payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    #[default]
    Approve,
    Decline,
    Timeout,
}

impl PaymentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOutcome::Approve => "approve",
            PaymentOutcome::Decline => "decline",
            PaymentOutcome::Timeout => "timeout",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approve" => Some(PaymentOutcome::Approve),
            "decline" => Some(PaymentOutcome::Decline),
            "timeout" => Some(PaymentOutcome::Timeout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: String,
    #[serde(default)]
    pub flow_variant: FlowVariant,
    pub demo_route: RouteInfo,
    pub payment_delay_ms: u64,
    #[serde(default)]
    pub payment_outcome: PaymentOutcome,
    #[serde(default)]
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "AED".into(),
            flow_variant: FlowVariant::Scheduled,
            demo_route: RouteInfo::new("Dubai Marina", "Dubai International Airport", 25.0),
            payment_delay_ms: 2000,
            payment_outcome: PaymentOutcome::Approve,
            plain_output: false,
        }
    }
}

impl Config {
    /// Applies a `config set` style change.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(BookingError::Config(format!(
                        "currency must be a three-letter code, got `{value}`"
                    )));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "flow" => {
                self.flow_variant = FlowVariant::parse(value).ok_or_else(|| {
                    BookingError::Config(format!(
                        "flow must be `scheduled` or `fixed-route`, got `{value}`"
                    ))
                })?;
            }
            "pickup" => self.demo_route.pickup = value.to_string(),
            "dropoff" => self.demo_route.dropoff = value.to_string(),
            "distance" => {
                let distance = parse_distance(value);
                if distance <= 0.0 {
                    return Err(BookingError::Config(format!(
                        "distance must be a positive number, got `{value}`"
                    )));
                }
                self.demo_route.distance_km = distance;
            }
            "payment-delay-ms" => {
                self.payment_delay_ms = value.parse().map_err(|_| {
                    BookingError::Config(format!(
                        "payment-delay-ms must be a whole number, got `{value}`"
                    ))
                })?;
            }
            "payment-outcome" => {
                self.payment_outcome = PaymentOutcome::parse(value).ok_or_else(|| {
                    BookingError::Config(format!(
                        "payment-outcome must be approve, decline or timeout, got `{value}`"
                    ))
                })?;
            }
            "plain-output" => self.plain_output = parse_flag(key, value)?,
            other => {
                return Err(BookingError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// Gateway matching the configured delay and outcome.
    pub fn gateway(&self) -> SimulatedGateway {
        let delay = self.payment_delay();
        match self.payment_outcome {
            PaymentOutcome::Approve => SimulatedGateway::new(delay),
            PaymentOutcome::Decline => SimulatedGateway::declining(delay, DECLINE_REASON),
            PaymentOutcome::Timeout => SimulatedGateway::timing_out(delay),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(BookingError::Config(format!(
            "{key} expects on/off, got `{value}`"
        ))),
    }
}

/// Fixed values a key accepts, empty when the value is free text.
pub fn value_choices(key: &str) -> &'static [&'static str] {
    match key.to_ascii_lowercase().as_str() {
        "flow" => &["scheduled", "fixed-route"],
        "payment-outcome" => &["approve", "decline", "timeout"],
        "plain-output" => &["on", "off"],
        _ => &[],
    }
}

/// Loads and stores [`Config`] as JSON inside the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::{GatewayFailure, PaymentGateway, PaymentIntent, PaymentMethod};
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.demo_route.distance_km, 25.0);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("flow", "fixed-route").unwrap();
        config.set("payment-delay-ms", "0").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.flow_variant, FlowVariant::FixedRoute);
        assert_eq!(loaded.payment_delay_ms, 0);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("distance", "-3").is_err());
        assert!(config.set("currency", "dirham").is_err());
        assert!(config.set("payment-outcome", "maybe").is_err());
        assert!(config.set("plain-output", "maybe").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn payment_outcome_picks_the_gateway_answer() {
        let mut config = Config::default();
        config.set("payment-delay-ms", "0").unwrap();
        config.set("payment-outcome", "Timeout").unwrap();
        assert_eq!(config.payment_outcome, PaymentOutcome::Timeout);

        let intent = PaymentIntent {
            booking_id: uuid::Uuid::new_v4(),
            method: PaymentMethod::Cash,
            amount: 125.0,
            currency: "AED".into(),
            card_last4: None,
        };
        assert_eq!(
            config.gateway().process(&intent).unwrap_err(),
            GatewayFailure::Timeout
        );

        config.set("payment-outcome", "decline").unwrap();
        assert_eq!(
            config.gateway().process(&intent).unwrap_err().to_string(),
            "card declined: issuer unavailable"
        );
    }

    #[test]
    fn listed_choices_are_accepted() {
        for key in CONFIG_KEYS {
            for value in value_choices(key) {
                let mut config = Config::default();
                assert!(config.set(key, value).is_ok(), "{key} {value}");
            }
        }
        assert!(value_choices("currency").is_empty());
    }

    #[test]
    fn currency_is_uppercased() {
        let mut config = Config::default();
        config.set("currency", "usd").unwrap();
        assert_eq!(config.currency, "USD");
    }
}

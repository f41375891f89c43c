use anyhow::{Context, Result};
use chrono::NaiveDate;
use game_core::{DailyRotation, FeedbackPolicy};
use game_persistence::connection::DEFAULT_DATABASE_URL;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub words_directory: String,
    pub idle_timeout_seconds: u64,
    pub feedback_policy: FeedbackPolicy,
    pub rotation_epoch: NaiveDate,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; `from_env` reads the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var("PORT", lookup("PORT"), 8080)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            words_directory: lookup("WORDS_DIRECTORY")
                .unwrap_or_else(|| "./shared/words".to_string()),
            idle_timeout_seconds: parse_var(
                "IDLE_TIMEOUT_SECONDS",
                lookup("IDLE_TIMEOUT_SECONDS"),
                300,
            )?,
            feedback_policy: match lookup("FEEDBACK_POLICY") {
                Some(value) => value
                    .parse::<FeedbackPolicy>()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid FEEDBACK_POLICY")?,
                None => FeedbackPolicy::default(),
            },
            rotation_epoch: parse_var(
                "ROTATION_EPOCH",
                lookup("ROTATION_EPOCH"),
                DailyRotation::default().epoch(),
            )?,
        })
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }

    pub fn rotation(&self) -> DailyRotation {
        DailyRotation::new(self.rotation_epoch)
    }
}

fn parse_var<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", name, value)),
        None => Ok(default),
    }
}

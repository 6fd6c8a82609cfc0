use std::{
    env::{self, VarError},
    str::FromStr,
};
use tracing::Level;

use crate::reconstruction::SelectionMode;

pub mod reconstruction;
pub mod test_cases;

/// Number of test cases solved in parallel when `CONCURRENCY` is not set
pub const DEFAULT_CONCURRENCY: usize = 4;

// ############################################
// ################## CONFIG ##################
// ############################################

pub struct Config {
    pub log_level: Level,
    pub concurrency: usize,
    pub selection_mode: SelectionMode,
}

impl Config {
    pub fn parse_environment() -> Result<Config, anyhow::Error> {
        let mut errors: Vec<String> = vec![];
        // `LOG_LEVEL` has priority over `RUST_LOG`
        let log_level = match parse_env_variable::<Level>("LOG_LEVEL") {
            Ok(v) => v
                .or_else(|| parse_env_variable::<Level>("RUST_LOG").unwrap_or(None))
                .unwrap_or(Level::INFO),
            Err(e) => {
                errors.push(e.to_string());
                Level::INFO
            }
        };

        let concurrency = match parse_env_variable::<usize>("CONCURRENCY") {
            Ok(Some(0)) => {
                errors.push("[CONCURRENCY]: must be greater than zero".to_string());
                1
            }
            Ok(v) => v.unwrap_or(DEFAULT_CONCURRENCY),
            Err(e) => {
                errors.push(e.to_string());
                DEFAULT_CONCURRENCY
            }
        };

        let selection_mode = match parse_env_variable::<SelectionMode>("SELECTION_MODE") {
            Ok(v) => v.unwrap_or_default(),
            Err(e) => {
                errors.push(e.to_string());
                SelectionMode::default()
            }
        };

        if !errors.is_empty() {
            return Err(anyhow::anyhow!(errors.join(", ")));
        }

        Ok(Config {
            log_level,
            concurrency,
            selection_mode,
        })
    }
}

fn parse_env_variable<T>(key: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    fn map_err<E>(key: &str, e: E) -> anyhow::Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        anyhow::anyhow!("[{key}]: {e}")
    }

    let env_value = match env::var(key) {
        Ok(v) => {
            if v.is_empty() {
                Ok(None)
            } else {
                Ok(Some(v))
            }
        }
        Err(e) => {
            if e == VarError::NotPresent {
                Ok(None)
            } else {
                Err(map_err(key, e))
            }
        }
    }?;
    env_value
        .map(|v| v.parse::<T>().map_err(|e| map_err(key, e)))
        .transpose()
}

//! Runtime configuration read from the process environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const TOKEN_VAR: &str = "TMDB_API_ACCESS_TOKEN";
const API_BASE_VAR: &str = "MOVIES_RS_API_BASE";
const IMAGE_BASE_VAR: &str = "MOVIES_RS_IMAGE_BASE";
const DATA_DIR_VAR: &str = "MOVIES_RS_DATA_DIR";
const DEBOUNCE_VAR: &str = "MOVIES_RS_SEARCH_DEBOUNCE_MS";

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const DEFAULT_DATA_DIR: &str = ".cache";
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: String,
    pub api_base: String,
    pub image_base: String,
    /// Directory holding the favorites slot.
    pub data_dir: PathBuf,
    pub search_debounce: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let access_token = get(TOKEN_VAR).ok_or(ConfigError::MissingToken(TOKEN_VAR))?;

        let search_debounce = match get(DEBOUNCE_VAR) {
            Some(raw) => {
                let ms: u64 = raw.parse().map_err(|_| ConfigError::InvalidDuration {
                    var: DEBOUNCE_VAR,
                    value: raw.clone(),
                })?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_SEARCH_DEBOUNCE,
        };

        Ok(Self {
            access_token,
            api_base: get(API_BASE_VAR)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            image_base: get(IMAGE_BASE_VAR)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE.to_string()),
            data_dir: get(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            search_debounce,
        })
    }
}

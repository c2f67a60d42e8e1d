// src/config.rs
use crate::errors::WardrobeError;
use crate::services::{AnalyzerSettings, VisionCredential};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// `None` runs the service offline: every analysis is the mock record.
    pub vision_credential: Option<VisionCredential>,
    pub vision_endpoint: String,
    pub vision_timeout: Duration,
    pub vision_max_retries: u32,
    pub include_raw: bool,
    pub max_image_dimension: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            vision_credential: None,
            vision_endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            vision_timeout: Duration::from_secs(15),
            vision_max_retries: 0,
            include_raw: false,
            max_image_dimension: 2048,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, WardrobeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WardrobeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Config::default();

        let vision_credential = get("GOOGLE_VISION_API_KEY")
            .map(VisionCredential::ApiKey)
            .or_else(|| get("GOOGLE_VISION_ACCESS_TOKEN").map(VisionCredential::AccessToken));

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            vision_credential,
            vision_endpoint: get("VISION_ENDPOINT").unwrap_or(defaults.vision_endpoint),
            vision_timeout: parse(&get, "VISION_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.vision_timeout),
            vision_max_retries: parse(&get, "VISION_MAX_RETRIES")?
                .unwrap_or(defaults.vision_max_retries),
            include_raw: parse(&get, "VISION_INCLUDE_RAW")?.unwrap_or(defaults.include_raw),
            max_image_dimension: parse(&get, "MAX_IMAGE_DIMENSION")?
                .unwrap_or(defaults.max_image_dimension),
        })
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            timeout: self.vision_timeout,
            max_retries: self.vision_max_retries,
            include_raw: self.include_raw,
        }
    }
}

fn parse<T, G>(get: &G, key: &str) -> Result<Option<T>, WardrobeError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| WardrobeError::Config(format!("{} = {:?}: {}", key, raw, e)))
        })
        .transpose()
}

use crate::error::{IpamError, Result};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the address space for locally scoped networks
pub const LOCAL_DEFAULT: &str = "LocalDefault";

/// Name of the address space for globally scoped networks
pub const GLOBAL_DEFAULT: &str = "GlobalDefault";

/// IPAM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IpamConfig {
    /// Address space for local networks
    pub local_space: String,

    /// Address space for global networks
    pub global_space: String,

    /// Predefined pools that automatic allocation carves subnets from
    pub predefined: Vec<PredefinedPool>,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for IpamConfig {
    fn default() -> Self {
        Self {
            local_space: LOCAL_DEFAULT.to_string(),
            global_space: GLOBAL_DEFAULT.to_string(),
            predefined: Self::default_predefined(),
            log_level: LogLevel::Info,
        }
    }
}

impl IpamConfig {
    /// Default local pools: 172.17-31.0.0/16 as /16s, 192.168.0.0/16 as /20s
    fn default_predefined() -> Vec<PredefinedPool> {
        let mut pools: Vec<PredefinedPool> = (17..=31)
            .filter_map(|octet| format!("172.{}.0.0/16", octet).parse().ok())
            .map(|base| PredefinedPool { base, size: 16 })
            .collect();

        if let Ok(base) = "192.168.0.0/16".parse() {
            pools.push(PredefinedPool { base, size: 20 });
        }

        pools
    }

    /// Parse configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: IpamConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&data)
    }

    /// Check address space names and predefined pool sizes.
    pub fn validate(&self) -> Result<()> {
        if self.local_space.is_empty() || self.global_space.is_empty() {
            return Err(IpamError::ConfigError(
                "address space names must not be empty".to_string(),
            ));
        }
        if self.local_space.contains('/') || self.global_space.contains('/') {
            return Err(IpamError::ConfigError(
                "address space names must not contain '/'".to_string(),
            ));
        }

        for pool in &self.predefined {
            if pool.size < pool.base.prefix_len() || pool.size > pool.base.max_prefix_len() {
                return Err(IpamError::ConfigError(format!(
                    "invalid size /{} for predefined pool {}",
                    pool.size, pool.base
                )));
            }
        }

        Ok(())
    }
}

/// A base prefix that is split into subnets of `size` bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedPool {
    /// Base prefix
    pub base: IpNet,

    /// Prefix length of each subnet allocated from `base`
    pub size: u8,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

//! Startup configuration.
//!
//! Read once from the environment (the same variable names the web build
//! uses) or from a TOML file. Nothing here is reloaded at runtime.

use chain_eth::AppEnv;
use chain_sol::Cluster;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::poller::PollerConfig;

pub const ENV_APP_ENV: &str = "NEXT_PUBLIC_ENV";
pub const ENV_SOLANA_NETWORK: &str = "NEXT_PUBLIC_SOLANA_NETWORK";
pub const ENV_SOLANA_RPC: &str = "NEXT_PUBLIC_SOLANA_RPC";
pub const ENV_ALCHEMY_KEY: &str = "NEXT_PUBLIC_KEY_ALCHEMY";
pub const ENV_WALLETCONNECT_PROJECT: &str = "NEXT_PUBLIC_PROJECT_ID";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Web3Config {
    pub env: AppEnv,
    pub solana_network: Cluster,
    /// Custom Solana RPC; the cluster's public endpoint is used when unset.
    pub solana_rpc: Option<String>,
    pub alchemy_api_key: String,
    pub walletconnect_project_id: String,
    pub poller: PollerConfig,
}

impl Web3Config {
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SessionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let solana_network = match get(ENV_SOLANA_NETWORK) {
            Some(name) => name.trim().parse::<Cluster>()?,
            None => Cluster::default(),
        };

        let config = Self {
            env: AppEnv::from_env_value(get(ENV_APP_ENV).as_deref()),
            solana_network,
            solana_rpc: get(ENV_SOLANA_RPC),
            alchemy_api_key: get(ENV_ALCHEMY_KEY).unwrap_or_default(),
            walletconnect_project_id: get(ENV_WALLETCONNECT_PROJECT).unwrap_or_default(),
            poller: PollerConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SessionError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.poller.connected_interval_ms == 0 {
            return Err(SessionError::Config(
                "poller.connected_interval_ms must be greater than zero".into(),
            ));
        }
        if let Some(rpc) = &self.solana_rpc {
            if !rpc.starts_with("http://") && !rpc.starts_with("https://") {
                return Err(SessionError::Config(format!(
                    "solana_rpc must be an http(s) URL, got {rpc}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_production_mainnet() {
        let config = Web3Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.env, AppEnv::Production);
        assert_eq!(config.solana_network, Cluster::MainnetBeta);
        assert!(config.solana_rpc.is_none());
        assert_eq!(config.poller, PollerConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = Web3Config::from_lookup(lookup(&[
            (ENV_APP_ENV, "development"),
            (ENV_SOLANA_NETWORK, "devnet"),
            (ENV_SOLANA_RPC, "https://rpc.example"),
            (ENV_ALCHEMY_KEY, "alchemy"),
            (ENV_WALLETCONNECT_PROJECT, "wc"),
        ]))
        .unwrap();
        assert_eq!(config.env, AppEnv::Development);
        assert_eq!(config.solana_network, Cluster::Devnet);
        assert_eq!(config.solana_rpc.as_deref(), Some("https://rpc.example"));
        assert_eq!(config.alchemy_api_key, "alchemy");
        assert_eq!(config.walletconnect_project_id, "wc");
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Web3Config::from_lookup(lookup(&[
            (ENV_SOLANA_NETWORK, ""),
            (ENV_SOLANA_RPC, "  "),
        ]))
        .unwrap();
        assert_eq!(config.solana_network, Cluster::MainnetBeta);
        assert!(config.solana_rpc.is_none());
    }

    #[test]
    fn environment_rejects_non_http_rpc() {
        let err = Web3Config::from_lookup(lookup(&[(ENV_SOLANA_RPC, "ws://rpc.example")]))
            .unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn unknown_network_is_a_config_error() {
        let err = Web3Config::from_lookup(lookup(&[(ENV_SOLANA_NETWORK, "localnet")])).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = Web3Config::from_toml_str(
            r#"
            env = "development"
            solana_network = "testnet"

            [poller]
            connected_interval_ms = 2000
            "#,
        )
        .unwrap();
        assert_eq!(config.env, AppEnv::Development);
        assert_eq!(config.solana_network, Cluster::Testnet);
        assert_eq!(config.poller.connected_interval_ms, 2000);
        assert_eq!(config.poller.min_tick_ms, 4);
    }

    #[test]
    fn toml_rejects_zero_connected_interval() {
        let err = Web3Config::from_toml_str("[poller]\nconnected_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("connected_interval_ms"));
    }

    #[test]
    fn toml_rejects_non_http_rpc() {
        assert!(Web3Config::from_toml_str("solana_rpc = \"ws://rpc\"").is_err());
    }

    #[test]
    fn toml_parse_errors_are_config_errors() {
        let err = Web3Config::from_toml_str("env = [").unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }
}

//! Solana cluster selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SolError;

/// A Solana cluster. The wire names match the ones wallets use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cluster {
    #[default]
    #[serde(rename = "mainnet-beta")]
    MainnetBeta,
    #[serde(rename = "devnet")]
    Devnet,
    #[serde(rename = "testnet")]
    Testnet,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
        }
    }

    /// Public RPC endpoint operated by Solana Labs for this cluster.
    pub fn api_url(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
        }
    }
}

impl FromStr for Cluster {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet-beta" => Ok(Cluster::MainnetBeta),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            other => Err(SolError::UnknownCluster(other.to_string())),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn cluster_api_url(cluster: Cluster) -> &'static str {
    cluster.api_url()
}

/// RPC endpoint for `cluster`; a non-empty custom URL takes precedence.
pub fn resolve_endpoint(cluster: Cluster, custom_rpc: Option<&str>) -> String {
    match custom_rpc.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => cluster_api_url(cluster).to_string(),
    }
}

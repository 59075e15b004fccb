//! Wallet adapters offered to Solana users.

use serde::{Deserialize, Serialize};

use crate::cluster::{resolve_endpoint, Cluster};

/// Solana wallets the front-end knows how to talk to. Some adapters need to
/// know the cluster up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum WalletAdapterKind {
    BitKeep,
    Phantom,
    Glow,
    Slope,
    Solflare { network: Cluster },
    Torus,
    Sollet { network: Cluster },
    SolletExtension { network: Cluster },
}

impl WalletAdapterKind {
    pub fn name(&self) -> &'static str {
        match self {
            WalletAdapterKind::BitKeep => "BitKeep",
            WalletAdapterKind::Phantom => "Phantom",
            WalletAdapterKind::Glow => "Glow",
            WalletAdapterKind::Slope => "Slope",
            WalletAdapterKind::Solflare { .. } => "Solflare",
            WalletAdapterKind::Torus => "Torus",
            WalletAdapterKind::Sollet { .. } => "Sollet",
            WalletAdapterKind::SolletExtension { .. } => "Sollet (Extension)",
        }
    }

    /// Cluster this adapter is pinned to, if any.
    pub fn network(&self) -> Option<Cluster> {
        match self {
            WalletAdapterKind::Solflare { network }
            | WalletAdapterKind::Sollet { network }
            | WalletAdapterKind::SolletExtension { network } => Some(*network),
            _ => None,
        }
    }
}

/// Adapters in presentation order.
pub fn default_adapters(network: Cluster) -> Vec<WalletAdapterKind> {
    vec![
        WalletAdapterKind::BitKeep,
        WalletAdapterKind::Phantom,
        WalletAdapterKind::Glow,
        WalletAdapterKind::Slope,
        WalletAdapterKind::Solflare { network },
        WalletAdapterKind::Torus,
        WalletAdapterKind::Sollet { network },
        WalletAdapterKind::SolletExtension { network },
    ]
}

/// Startup settings for the Solana wallet library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletProviderSettings {
    pub network: Cluster,
    pub endpoint: String,
    pub adapters: Vec<WalletAdapterKind>,
    pub auto_connect: bool,
}

impl WalletProviderSettings {
    pub fn new(network: Cluster, custom_rpc: Option<&str>) -> Self {
        Self {
            network,
            endpoint: resolve_endpoint(network, custom_rpc),
            adapters: default_adapters(network),
            auto_connect: true,
        }
    }
}

//! Wallet connectors offered to the user and the client settings built
//! from them.

use serde::{Deserialize, Serialize};

use crate::chains::EvmChain;
use crate::rpc::ChainClientConfig;

/// App identity shown by WalletConnect-compatible wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    pub icons: Vec<String>,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "Polychain Monsters".into(),
            description:
                "The largest multi-chain #NFT collecting & gaming ecosystem on #Web3.".into(),
            url: "https://polychainmonsters.com/".into(),
            icons: vec!["https://app.polychainmonsters.com/favicon.ico".into()],
        }
    }
}

/// Explorer ids of the wallets pinned at the top of the WalletConnect modal:
/// MetaMask, Rainbow and Trust Wallet.
pub const RECOMMENDED_WALLET_IDS: [&str; 3] = [
    "c57ca95b47569778a828d19178114f4db188b89b763c899ba0be274e97267d96",
    "1ae92b26df02f0abca6304df07debccd18262fdf5fe82daa81593582dac9a369",
    "4622a2b2d6af1c9844944291e5e7351a6aa24cd7b23099efac1b2fd875da31a0",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnectOptions {
    pub project_id: String,
    pub metadata: AppMetadata,
    pub explorer_recommended_wallet_ids: Vec<String>,
}

impl WalletConnectOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            metadata: AppMetadata::default(),
            explorer_recommended_wallet_ids: RECOMMENDED_WALLET_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}

/// A way of reaching an EVM wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Connector {
    MetaMask,
    WalletConnect(WalletConnectOptions),
    CoinbaseWallet { app_name: String },
    /// Any `window.ethereum` provider. With `shim_disconnect` the client
    /// remembers an explicit disconnect instead of auto-reconnecting.
    Injected { name: String, shim_disconnect: bool },
}

impl Connector {
    pub fn id(&self) -> &'static str {
        match self {
            Connector::MetaMask => "metaMask",
            Connector::WalletConnect(_) => "walletConnect",
            Connector::CoinbaseWallet { .. } => "coinbaseWallet",
            Connector::Injected { .. } => "injected",
        }
    }
}

/// Connectors in the order they are presented.
pub fn default_connectors(walletconnect_project_id: &str) -> Vec<Connector> {
    vec![
        Connector::MetaMask,
        Connector::WalletConnect(WalletConnectOptions::new(walletconnect_project_id)),
        Connector::CoinbaseWallet {
            app_name: "Polychainmonsters".into(),
        },
        Connector::Injected {
            name: "Injected".into(),
            shim_disconnect: true,
        },
    ]
}

/// Everything the EVM client library needs at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSettings {
    pub auto_connect: bool,
    pub connectors: Vec<Connector>,
    pub client: ChainClientConfig,
}

impl ClientSettings {
    pub fn new(client: ChainClientConfig, connectors: Vec<Connector>) -> Self {
        Self {
            auto_connect: true,
            connectors,
            client,
        }
    }

    pub fn chains(&self) -> impl Iterator<Item = &'static EvmChain> + '_ {
        self.client.chains.iter().map(|c| c.chain)
    }

    pub fn connector(&self, id: &str) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::{supported_chains, AppEnv};
    use crate::rpc::{configure_chains, default_providers, TransportConfig};

    #[test]
    fn connector_order() {
        let ids: Vec<_> = default_connectors("pid").iter().map(Connector::id).collect();
        assert_eq!(ids, ["metaMask", "walletConnect", "coinbaseWallet", "injected"]);
    }

    #[test]
    fn walletconnect_carries_project_and_recommendations() {
        let connectors = default_connectors("my-project");
        let Connector::WalletConnect(options) = &connectors[1] else {
            panic!("second connector should be WalletConnect");
        };
        assert_eq!(options.project_id, "my-project");
        assert_eq!(options.metadata.name, "Polychain Monsters");
        assert_eq!(options.explorer_recommended_wallet_ids.len(), 3);
    }

    #[test]
    fn injected_shims_disconnect() {
        let connectors = default_connectors("");
        assert_eq!(
            connectors[3],
            Connector::Injected {
                name: "Injected".into(),
                shim_disconnect: true
            }
        );
    }

    #[test]
    fn settings_expose_configured_chains() {
        let client = configure_chains(
            &supported_chains(AppEnv::Production),
            &default_providers(""),
            TransportConfig::default(),
        );
        let settings = ClientSettings::new(client, default_connectors("pid"));
        assert!(settings.auto_connect);
        let names: Vec<_> = settings.chains().map(|c| c.name).collect();
        assert_eq!(names, ["Ethereum", "Polygon", "BNB Smart Chain"]);
        assert!(settings.connector("coinbaseWallet").is_some());
        assert!(settings.connector("ledger").is_none());
    }

    #[test]
    fn connector_serializes_with_kind_tag() {
        let json = serde_json::to_value(Connector::MetaMask).unwrap();
        assert_eq!(json["kind"], "metaMask");
    }
}

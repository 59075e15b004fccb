//! Top-level composition of both chain stacks.

use std::sync::Arc;

use chain_eth::{
    configure_chains, default_connectors, default_providers, normalize_account, supported_chains,
    ClientSettings, TransportConfig,
};
use chain_sol::WalletProviderSettings;

use crate::config::Web3Config;
use crate::error::SessionError;
use crate::reconciler::{ConnectionHook, Reconciler};
use crate::session::{SolanaConnection, SolanaSession, WalletAdapter};
use crate::source::WalletSource;

/// Resolved startup settings for the EVM client and the Solana wallet
/// library, plus the entry point for starting a Solana session.
#[derive(Debug, Clone)]
pub struct Web3Provider {
    config: Web3Config,
    evm: ClientSettings,
    solana: WalletProviderSettings,
}

impl Web3Provider {
    pub fn new(config: Web3Config) -> Self {
        let client = configure_chains(
            &supported_chains(config.env),
            &default_providers(&config.alchemy_api_key),
            TransportConfig::default(),
        );
        let evm = ClientSettings::new(client, default_connectors(&config.walletconnect_project_id));
        let solana =
            WalletProviderSettings::new(config.solana_network, config.solana_rpc.as_deref());

        tracing::info!(
            env = ?config.env,
            evm_chains = ?evm.client.chain_ids(),
            solana_network = %config.solana_network,
            solana_endpoint = %solana.endpoint,
            "Web3 provider configured"
        );

        Self {
            config,
            evm,
            solana,
        }
    }

    pub fn from_env() -> Result<Self, SessionError> {
        Ok(Self::new(Web3Config::from_env()?))
    }

    pub fn config(&self) -> &Web3Config {
        &self.config
    }

    pub fn evm(&self) -> &ClientSettings {
        &self.evm
    }

    pub fn solana(&self) -> &WalletProviderSettings {
        &self.solana
    }

    /// RPC fallback order for an EVM chain.
    pub fn rpc_endpoints(&self, chain_id: u64) -> Result<&[String], SessionError> {
        Ok(self.evm.client.endpoints(chain_id)?)
    }

    /// Checksummed form of an account reported by an EVM connector.
    pub fn evm_account(&self, address: &str) -> Result<String, SessionError> {
        Ok(normalize_account(address)?)
    }

    /// Start the Solana session: poll `injected` and `external` with the
    /// configured timing and expose the result through the returned session.
    pub fn attach_solana<I, E>(
        &self,
        adapter: Arc<dyn WalletAdapter>,
        connection: Arc<dyn SolanaConnection>,
        injected: I,
        external: E,
        on_connection: Option<ConnectionHook>,
    ) -> SolanaSession
    where
        I: WalletSource + 'static,
        E: WalletSource + 'static,
    {
        let mut reconciler = Reconciler::new(&self.config.poller);
        reconciler.set_hook(on_connection);
        SolanaSession::spawn(
            adapter,
            connection,
            injected,
            external,
            reconciler,
            &self.config.poller,
        )
    }
}

#[cfg(test)]
mod tests {
    use chain_sol::Cluster;

    use super::*;

    #[test]
    fn development_wires_testnets_and_custom_rpc() {
        let provider = Web3Provider::new(Web3Config {
            env: chain_eth::AppEnv::Development,
            solana_network: Cluster::Devnet,
            solana_rpc: Some("https://devnet.example".into()),
            ..Default::default()
        });
        assert_eq!(provider.evm().client.chain_ids(), vec![5, 80001, 97]);
        assert_eq!(provider.solana().endpoint, "https://devnet.example");
        assert_eq!(provider.solana().network, Cluster::Devnet);
    }

    #[test]
    fn production_rpc_order_includes_alchemy_when_keyed() {
        let provider = Web3Provider::new(Web3Config {
            alchemy_api_key: "key".into(),
            ..Default::default()
        });
        let urls = provider.rpc_endpoints(137).unwrap();
        assert_eq!(urls.first().map(String::as_str), Some("https://polygon-rpc.com"));
        assert_eq!(
            urls.last().map(String::as_str),
            Some("https://polygon-mainnet.g.alchemy.com/v2/key")
        );
    }

    #[test]
    fn testnet_lookup_on_production_fails() {
        let provider = Web3Provider::new(Web3Config::default());
        let err = provider.rpc_endpoints(5).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn evm_accounts_are_checksummed() {
        let provider = Web3Provider::new(Web3Config::default());
        assert_eq!(
            provider
                .evm_account("0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb")
                .unwrap(),
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb"
        );
        assert!(matches!(
            provider.evm_account("0x1234"),
            Err(SessionError::InvalidAddress(_))
        ));
    }
}

use serde::{Deserialize, Serialize};

/// Definition of an EVM-compatible blockchain network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvmChain {
    pub chain_id: u64,
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
    /// Default public RPC endpoint, used by the public provider.
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub is_testnet: bool,
}

/// Ethereum Mainnet (chain ID 1).
pub const ETHEREUM: EvmChain = EvmChain {
    chain_id: 1,
    name: "Ethereum",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://cloudflare-eth.com",
    explorer_url: "https://etherscan.io",
    is_testnet: false,
};

/// Goerli Testnet (chain ID 5).
pub const GOERLI: EvmChain = EvmChain {
    chain_id: 5,
    name: "Goerli",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://rpc.ankr.com/eth_goerli",
    explorer_url: "https://goerli.etherscan.io",
    is_testnet: true,
};

/// Polygon PoS (chain ID 137).
pub const POLYGON: EvmChain = EvmChain {
    chain_id: 137,
    name: "Polygon",
    symbol: "MATIC",
    decimals: 18,
    rpc_url: "https://polygon-rpc.com",
    explorer_url: "https://polygonscan.com",
    is_testnet: false,
};

/// Polygon Mumbai Testnet (chain ID 80001).
pub const POLYGON_MUMBAI: EvmChain = EvmChain {
    chain_id: 80001,
    name: "Polygon Mumbai",
    symbol: "MATIC",
    decimals: 18,
    rpc_url: "https://matic-mumbai.chainstacklabs.com",
    explorer_url: "https://mumbai.polygonscan.com",
    is_testnet: true,
};

/// BNB Smart Chain (chain ID 56).
pub const BSC: EvmChain = EvmChain {
    chain_id: 56,
    name: "BNB Smart Chain",
    symbol: "BNB",
    decimals: 18,
    rpc_url: "https://rpc.ankr.com/bsc",
    explorer_url: "https://bscscan.com",
    is_testnet: false,
};

/// BNB Smart Chain Testnet (chain ID 97).
pub const BSC_TESTNET: EvmChain = EvmChain {
    chain_id: 97,
    name: "BNB Smart Chain Testnet",
    symbol: "tBNB",
    decimals: 18,
    rpc_url: "https://data-seed-prebsc-1-s1.binance.org:8545",
    explorer_url: "https://testnet.bscscan.com",
    is_testnet: true,
};

const ALL_CHAINS: &[&EvmChain] = &[
    &ETHEREUM,
    &GOERLI,
    &POLYGON,
    &POLYGON_MUMBAI,
    &BSC,
    &BSC_TESTNET,
];

const DEVELOPMENT_CHAINS: &[&EvmChain] = &[&GOERLI, &POLYGON_MUMBAI, &BSC_TESTNET];

const PRODUCTION_CHAINS: &[&EvmChain] = &[&ETHEREUM, &POLYGON, &BSC];

/// Deployment environment; selects testnets or mainnets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    #[default]
    Production,
}

impl AppEnv {
    /// Only the literal `"development"` selects testnets; any other value
    /// (including unset) means production.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("development") => AppEnv::Development,
            _ => AppEnv::Production,
        }
    }
}

/// Returns the chain definition for a given chain ID, or `None` if unsupported.
pub fn get_chain(chain_id: u64) -> Option<&'static EvmChain> {
    ALL_CHAINS
        .iter()
        .find(|c| c.chain_id == chain_id)
        .copied()
}

/// Returns the chains the application connects to in `env`.
pub fn supported_chains(env: AppEnv) -> Vec<&'static EvmChain> {
    match env {
        AppEnv::Development => DEVELOPMENT_CHAINS.to_vec(),
        AppEnv::Production => PRODUCTION_CHAINS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_uses_testnets() {
        let ids: Vec<u64> = supported_chains(AppEnv::Development)
            .iter()
            .map(|c| c.chain_id)
            .collect();
        assert_eq!(ids, vec![5, 80001, 97]);
    }

    #[test]
    fn production_uses_mainnets() {
        let ids: Vec<u64> = supported_chains(AppEnv::Production)
            .iter()
            .map(|c| c.chain_id)
            .collect();
        assert_eq!(ids, vec![1, 137, 56]);
    }

    #[test]
    fn env_sets_match_testnet_flag() {
        assert!(supported_chains(AppEnv::Development).iter().all(|c| c.is_testnet));
        assert!(supported_chains(AppEnv::Production).iter().all(|c| !c.is_testnet));
    }

    #[test]
    fn env_parsing() {
        assert_eq!(AppEnv::from_env_value(Some("development")), AppEnv::Development);
        assert_eq!(AppEnv::from_env_value(Some("staging")), AppEnv::Production);
        assert_eq!(AppEnv::from_env_value(None), AppEnv::Production);
    }

    #[test]
    fn get_bsc() {
        let chain = get_chain(56).expect("BSC should be supported");
        assert_eq!(chain.name, "BNB Smart Chain");
        assert_eq!(chain.symbol, "BNB");
    }

    #[test]
    fn unsupported_chain_returns_none() {
        assert!(get_chain(42161).is_none());
    }

    #[test]
    fn all_chains_have_https_urls() {
        for chain in ALL_CHAINS {
            assert!(chain.rpc_url.starts_with("https://"), "{}", chain.name);
            assert!(chain.explorer_url.starts_with("https://"), "{}", chain.name);
        }
    }
}

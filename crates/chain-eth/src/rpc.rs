//! RPC provider fallback configuration.
//!
//! Each configured chain gets an ordered list of HTTP endpoints. The order
//! is the provider order: the chain's own public endpoint first, then the
//! Ankr list, the Chainlist list and finally Alchemy. The EVM client tries
//! them in that order, moving on when one stalls.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chains::EvmChain;
use crate::error::EthError;

/// A fixed endpoint for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RpcEndpoint {
    pub chain_id: u64,
    pub url: &'static str,
}

/// Ankr endpoints. Ankr is unusable for BSC testnet, so that entry points at
/// the Binance seed node instead.
pub const ANKR_PROVIDERS: &[RpcEndpoint] = &[
    RpcEndpoint {
        chain_id: 1,
        url: "https://rpc.ankr.com/eth",
    },
    RpcEndpoint {
        chain_id: 5,
        url: "https://rpc.ankr.com/eth_goerli",
    },
    RpcEndpoint {
        chain_id: 137,
        url: "https://rpc.ankr.com/polygon",
    },
    RpcEndpoint {
        chain_id: 80001,
        url: "https://rpc.ankr.com/polygon_mumbai",
    },
    RpcEndpoint {
        chain_id: 56,
        url: "https://rpc.ankr.com/bsc",
    },
    RpcEndpoint {
        chain_id: 97,
        url: "https://data-seed-prebsc-1-s1.binance.org:8545/",
    },
];

/// Community endpoints taken from chainlist.org.
pub const CHAINLIST_PROVIDERS: &[RpcEndpoint] = &[
    RpcEndpoint {
        chain_id: 1,
        url: "https://eth-rpc.gateway.pokt.network",
    },
    RpcEndpoint {
        chain_id: 5,
        url: "https://eth-goerli.public.blastapi.io",
    },
    RpcEndpoint {
        chain_id: 137,
        url: "https://polygon-bor.publicnode.com",
    },
    RpcEndpoint {
        chain_id: 80001,
        url: "https://polygon-testnet.public.blastapi.io",
    },
    RpcEndpoint {
        chain_id: 56,
        url: "https://bsc-dataseed.binance.org/",
    },
    RpcEndpoint {
        chain_id: 97,
        url: "https://data-seed-prebsc-1-s1.binance.org:8545/",
    },
];

/// One source of RPC endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcProvider {
    /// The chain's built-in public endpoint.
    Public,
    /// A single JSON-RPC URL bound to one chain.
    JsonRpc { chain_id: u64, url: String },
    /// Alchemy, keyed by API key.
    Alchemy { api_key: String },
}

impl RpcProvider {
    /// URL this provider serves for `chain`, or `None` when it does not
    /// cover that chain.
    pub fn url_for(&self, chain: &EvmChain) -> Option<String> {
        match self {
            RpcProvider::Public => Some(chain.rpc_url.to_string()),
            RpcProvider::JsonRpc { chain_id, url } => {
                (*chain_id == chain.chain_id).then(|| url.clone())
            }
            RpcProvider::Alchemy { api_key } => {
                if api_key.is_empty() {
                    return None;
                }
                alchemy_subdomain(chain.chain_id)
                    .map(|sub| format!("https://{sub}.g.alchemy.com/v2/{api_key}"))
            }
        }
    }
}

fn alchemy_subdomain(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("eth-mainnet"),
        5 => Some("eth-goerli"),
        137 => Some("polygon-mainnet"),
        80001 => Some("polygon-mumbai"),
        _ => None,
    }
}

/// Turn a fixed endpoint list into one provider per entry.
pub fn generate_json_rpc_providers(list: &[RpcEndpoint]) -> Vec<RpcProvider> {
    list.iter()
        .map(|endpoint| RpcProvider::JsonRpc {
            chain_id: endpoint.chain_id,
            url: endpoint.url.to_string(),
        })
        .collect()
}

/// The application's provider stack in fallback order.
pub fn default_providers(alchemy_api_key: &str) -> Vec<RpcProvider> {
    let mut providers = vec![RpcProvider::Public];
    providers.extend(generate_json_rpc_providers(ANKR_PROVIDERS));
    providers.extend(generate_json_rpc_providers(CHAINLIST_PROVIDERS));
    providers.push(RpcProvider::Alchemy {
        api_key: alchemy_api_key.to_string(),
    });
    providers
}

/// Client transport timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// How often the client polls for new blocks and receipts.
    pub polling_interval_ms: u64,
    /// How long a provider may go without answering before the next one is tried.
    pub stall_timeout_ms: u64,
}

impl TransportConfig {
    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    pub fn stall_timeout(&self) -> Duration {
        Duration::from_millis(self.stall_timeout_ms)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            polling_interval_ms: 30_000,
            stall_timeout_ms: 3_000,
        }
    }
}

/// Fallback URLs for one chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainEndpoints {
    pub chain: &'static EvmChain,
    pub urls: Vec<String>,
}

/// Resolved RPC configuration for every configured chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainClientConfig {
    pub chains: Vec<ChainEndpoints>,
    pub transport: TransportConfig,
}

impl ChainClientConfig {
    /// Fallback order for `chain_id`.
    pub fn endpoints(&self, chain_id: u64) -> Result<&[String], EthError> {
        self.chains
            .iter()
            .find(|c| c.chain.chain_id == chain_id)
            .map(|c| c.urls.as_slice())
            .ok_or(EthError::UnsupportedChain(chain_id))
    }

    /// First endpoint tried for `chain_id`.
    pub fn primary(&self, chain_id: u64) -> Result<&str, EthError> {
        self.endpoints(chain_id)?
            .first()
            .map(String::as_str)
            .ok_or(EthError::NoRpcEndpoint(chain_id))
    }

    pub fn chain_ids(&self) -> Vec<u64> {
        self.chains.iter().map(|c| c.chain.chain_id).collect()
    }
}

/// Resolve, per chain, the URLs contributed by `providers` in order.
///
/// A URL already contributed by an earlier provider is not repeated.
pub fn configure_chains(
    chains: &[&'static EvmChain],
    providers: &[RpcProvider],
    transport: TransportConfig,
) -> ChainClientConfig {
    let chains = chains
        .iter()
        .map(|&chain| {
            let mut urls: Vec<String> = Vec::new();
            for url in providers.iter().filter_map(|p| p.url_for(chain)) {
                if !urls.contains(&url) {
                    urls.push(url);
                }
            }
            ChainEndpoints { chain, urls }
        })
        .collect();

    ChainClientConfig { chains, transport }
}

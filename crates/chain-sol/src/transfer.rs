//! System Program transfer requests and confirmation inputs.
//!
//! Building and serializing the actual transaction is the wallet adapter's
//! job. This module only describes what should be sent and carries the data
//! needed to confirm it afterwards.

use serde::{Deserialize, Serialize};

use crate::address::Pubkey;
use crate::error::SolError;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Amount moved by the account-ownership transaction: 0.00007 SOL.
pub const SIGN_TRANSFER_LAMPORTS: u64 = 70_000;

/// A native SOL transfer from one account to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: u64,
}

impl TransferRequest {
    pub fn new(from: Pubkey, to: Pubkey, lamports: u64) -> Result<Self, SolError> {
        if lamports == 0 {
            return Err(SolError::TransactionBuildError(
                "transfer amount must be non-zero".into(),
            ));
        }
        Ok(Self { from, to, lamports })
    }

    /// A transfer of [`SIGN_TRANSFER_LAMPORTS`] from `account` to itself.
    ///
    /// Getting the wallet to sign and land this proves control of the
    /// account without moving funds anywhere else.
    pub fn self_transfer(account: &str) -> Result<Self, SolError> {
        let key: Pubkey = account.parse()?;
        Self::new(key, key, SIGN_TRANSFER_LAMPORTS)
    }

    pub fn is_self_transfer(&self) -> bool {
        self.from == self.to
    }
}

/// Result of a `getLatestBlockhash` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockhashInfo {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

/// Blockhash-based confirmation: wait for `signature` until the chain passes
/// `last_valid_block_height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationStrategy {
    pub blockhash: String,
    pub last_valid_block_height: u64,
    pub signature: String,
}

impl ConfirmationStrategy {
    pub fn new(latest: BlockhashInfo, signature: impl Into<String>) -> Self {
        Self {
            blockhash: latest.blockhash,
            last_valid_block_height: latest.last_valid_block_height,
            signature: signature.into(),
        }
    }
}

/// Encode signature bytes the way the backend expects them: a JSON array of
/// byte values, e.g. `[1,2,3]`.
pub fn to_array_string(bytes: &[u8]) -> Result<String, SolError> {
    serde_json::to_string(bytes).map_err(|e| SolError::SerializationError(e.to_string()))
}

//! Solana addresses.
//!
//! Solana addresses are simply Base58-encoded 32-byte Ed25519 public keys.
//! There is no hashing step (unlike Bitcoin or Ethereum), so the address
//! string is the canonical identity of a wallet and is what the session
//! compares between poll ticks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SolError;

/// Validate a Solana address string.
///
/// A valid Solana address is a Base58-encoded string that decodes to exactly
/// 32 bytes.
pub fn validate_address(address: &str) -> Result<bool, SolError> {
    address_to_bytes(address).map(|_| true)
}

/// Decode a Solana address string to its 32-byte representation.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], SolError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        SolError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })?;

    Ok(arr)
}

/// Encode 32 bytes as a Solana address (Base58 string).
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// A wallet public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn to_base58(&self) -> String {
        bytes_to_address(&self.0)
    }
}

impl FromStr for Pubkey {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        address_to_bytes(s).map(Self)
    }
}

impl TryFrom<String> for Pubkey {
    type Error = SolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pubkey> for String {
    fn from(key: Pubkey) -> Self {
        key.to_base58()
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self.to_base58())
    }
}

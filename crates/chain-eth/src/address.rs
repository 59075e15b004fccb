//! EVM account address checks.
//!
//! Connectors report the active account as a hex string whose casing depends
//! on the wallet. Everything the session exposes goes through
//! [`normalize_account`] so consumers always see the EIP-55 form.

use sha3::{Digest, Keccak256};

use crate::error::EthError;

/// Strip the `0x` prefix and check the remaining 40 hex characters.
fn hex_body(address: &str) -> Result<&str, EthError> {
    let body = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))?;

    if body.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            body.len()
        )));
    }

    if !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EthError::InvalidAddress(
            "address contains non-hex characters".into(),
        ));
    }

    Ok(body)
}

/// Validates an Ethereum address string.
///
/// Single-case addresses carry no checksum and are accepted as long as the
/// shape is right. Mixed-case addresses must match their EIP-55 encoding;
/// a mismatch yields `Ok(false)`.
pub fn validate_address(address: &str) -> Result<bool, EthError> {
    let body = hex_body(address)?;

    let is_all_lower = body.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = body.chars().all(|c| !c.is_ascii_lowercase());
    if is_all_lower || is_all_upper {
        return Ok(true);
    }

    Ok(checksum_address(address)? == address)
}

/// Applies EIP-55 mixed-case checksum encoding to an Ethereum address.
pub fn checksum_address(address: &str) -> Result<String, EthError> {
    let lower = hex_body(address)?.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");

    for (i, c) in lower.chars().enumerate() {
        // High nibble for even positions, low nibble for odd ones.
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    Ok(checksummed)
}

/// Normalize a connector-reported account to its checksummed form.
///
/// Rejects mixed-case input whose checksum does not match, since that is the
/// one case where the wallet handed us a corrupted address.
pub fn normalize_account(address: &str) -> Result<String, EthError> {
    if !validate_address(address)? {
        return Err(EthError::InvalidAddress(format!(
            "checksum mismatch for {address}"
        )));
    }
    checksum_address(address)
}

//! Messages the user signs to authorize account operations on the backend.
//!
//! The backend re-creates these strings and verifies the signature against
//! them, so the formats below are a wire contract.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPayload<'a> {
    /// Link `input_address` to the account owned by `main_address`.
    AddWallet {
        main_address: &'a str,
        input_address: &'a str,
        timestamp: u64,
    },
    /// Create a named account for `address`.
    NewAccount {
        address: &'a str,
        account_name: &'a str,
        timestamp: u64,
    },
    RemoveAccount {
        account: &'a str,
        timestamp: u64,
    },
}

impl SignPayload<'_> {
    pub fn verb(&self) -> &'static str {
        match self {
            SignPayload::AddWallet { .. } => "connect",
            SignPayload::NewAccount { .. } => "initUser",
            SignPayload::RemoveAccount { .. } => "remove",
        }
    }
}

impl fmt::Display for SignPayload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = self.verb();
        match self {
            SignPayload::AddWallet {
                main_address,
                input_address,
                timestamp,
            } => write!(f, "{verb}:{main_address}=>{input_address}-{timestamp}"),
            SignPayload::NewAccount {
                address,
                account_name,
                timestamp,
            } => write!(f, "{verb}:{address}-{account_name}-{timestamp}"),
            SignPayload::RemoveAccount { account, timestamp } => {
                write!(f, "{verb}:{account}-{timestamp}")
            }
        }
    }
}

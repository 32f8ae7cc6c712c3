use crate::consts::{MAX_NAME_LENGTH, MAX_ROYALTY_BPS, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH};
use crate::err::SolanaLabError;
use anchor_lang::prelude::*;

/// Rejects metadata the Token Metadata program would refuse, before paying
/// for the mint and metadata accounts.
pub fn check_metadata(name: &str, symbol: &str, uri: &str) -> Result<()> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(error!(SolanaLabError::InvalidName));
    }
    if symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(error!(SolanaLabError::InvalidSymbol));
    }
    if uri.trim().is_empty() || uri.len() > MAX_URI_LENGTH {
        return Err(error!(SolanaLabError::InvalidUri));
    }
    Ok(())
}

/// Out of range royalties are clamped rather than rejected
pub fn clamp_royalty(royalty_bps: u16) -> u16 {
    royalty_bps.min(MAX_ROYALTY_BPS)
}

/// Stored metadata strings are right-padded with NUL bytes
pub fn unpad(value: &str) -> String {
    value.trim_end_matches(char::from(0)).to_string()
}

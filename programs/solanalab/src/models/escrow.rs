use super::marketplace::Marketplace;
use super::AssetKind;
use crate::consts::{
    DEFAULT_LISTING_DURATION, MAX_LISTING_DURATION, MAX_PRICE_LAMPORTS, MIN_PRICE_LAMPORTS,
    NFT_DECIMALS,
};
use crate::err::SolanaLabError;
use anchor_lang::prelude::*;

/// A listing whose tokens sit in a vault owned by this PDA until the sale
/// settles or the seller cancels.
///
/// `seller` and `mint` lead the layout so clients can discover listings with
/// `memcmp` filters at `SELLER_OFFSET` / `MINT_OFFSET`.
#[account]
#[derive(InitSpace)]
pub struct Escrow {
    pub seller: Pubkey,
    pub mint: Pubkey,
    /// Seller-chosen id, part of the PDA seeds
    pub listing_id: u64,
    /// Associated token account of this PDA holding the listed tokens
    pub vault: Pubkey,
    pub kind: AssetKind,
    /// Raw token units held in the vault
    pub amount: u64,
    /// Lamports the buyer pays for the whole `amount`
    pub price: u64,
    pub created_at: i64,
    pub expires_at: i64,
    pub is_active: bool,
    pub bump: u8,
}

impl Escrow {
    pub const PREFIX: &'static [u8; 6] = b"escrow";

    pub const SELLER_OFFSET: usize = 8;
    pub const MINT_OFFSET: usize = Self::SELLER_OFFSET + 32;

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// `max_price` is the highest price the buyer signed for
    pub fn ensure_purchasable(&self, buyer: &Pubkey, now: i64, max_price: u64) -> Result<()> {
        if !self.is_active {
            return Err(error!(SolanaLabError::ListingNotActive));
        }
        if self.is_expired(now) {
            return Err(error!(SolanaLabError::ListingExpired));
        }
        if *buyer == self.seller {
            return Err(error!(SolanaLabError::CannotBuyOwnListing));
        }
        if self.price > max_price {
            return Err(error!(SolanaLabError::SlippageExceeded));
        }
        Ok(())
    }

    /// Sets a new price. A `duration` restarts the listing clock from `now`,
    /// `None` keeps the current expiry.
    pub fn reprice(&mut self, price: u64, duration: Option<i64>, now: i64) -> Result<()> {
        check_price(price)?;
        if duration.is_some() {
            self.expires_at = listing_expiry(now, duration)?;
        }
        self.price = price;
        Ok(())
    }

    /// Tokens sitting in the vault on top of the listed `amount`
    pub fn vault_surplus(&self, vault_amount: u64) -> Result<u64> {
        vault_amount
            .checked_sub(self.amount)
            .ok_or_else(|| error!(SolanaLabError::InsufficientBalance))
    }

    pub fn mark_closed(&mut self, marketplace: &mut Marketplace) -> Result<()> {
        if !self.is_active {
            return Err(error!(SolanaLabError::ListingNotActive));
        }
        marketplace.listing_closed()?;
        self.is_active = false;
        Ok(())
    }
}

pub fn check_price(price: u64) -> Result<()> {
    if !(MIN_PRICE_LAMPORTS..=MAX_PRICE_LAMPORTS).contains(&price) {
        return Err(error!(SolanaLabError::InvalidPrice));
    }
    Ok(())
}

/// NFT listings move exactly one token of a zero-decimal mint
pub fn check_listing(kind: AssetKind, amount: u64, decimals: u8, price: u64) -> Result<()> {
    if amount == 0 {
        return Err(error!(SolanaLabError::NoZeroTokens));
    }
    if kind == AssetKind::Nft && (amount != 1 || decimals != NFT_DECIMALS) {
        return Err(error!(SolanaLabError::InvalidNftListing));
    }
    check_price(price)
}

/// Resolves a requested listing lifetime into an absolute expiry
pub fn listing_expiry(now: i64, duration: Option<i64>) -> Result<i64> {
    let duration = duration.unwrap_or(DEFAULT_LISTING_DURATION);
    if duration <= 0 || duration > MAX_LISTING_DURATION {
        return Err(error!(SolanaLabError::InvalidDuration));
    }
    now.checked_add(duration)
        .ok_or_else(|| error!(SolanaLabError::MathOverflow))
}

use crate::models::{AssetKind, AuthorityKind};
use anchor_lang::prelude::*;

#[event]
pub struct MarketplaceUpdated {
    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub fee_bps: u16,
    pub paused: bool,
}

#[event]
pub struct EscrowCreated {
    pub escrow: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub kind: AssetKind,
    pub amount: u64,
    pub price: u64,
    pub expires_at: i64,
}

#[event]
pub struct EscrowRepriced {
    pub escrow: Pubkey,
    pub price: u64,
    pub expires_at: i64,
}

#[event]
pub struct EscrowPurchased {
    pub escrow: Pubkey,
    pub receipt_index: u64,
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub price: u64,
    pub fee: u64,
}

#[event]
pub struct EscrowCancelled {
    pub escrow: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub unit_price: u64,
    pub decimals: u8,
}

#[event]
pub struct LiquidityChanged {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub deposited: bool,
    pub amount: u64,
    pub total_liquidity: u64,
}

#[event]
pub struct PoolPurchase {
    pub pool: Pubkey,
    pub receipt_index: u64,
    pub buyer: Pubkey,
    pub amount: u64,
    pub price: u64,
    pub fee: u64,
}

#[event]
pub struct PoolUpdated {
    pub pool: Pubkey,
    pub unit_price: u64,
    pub is_active: bool,
}

#[event]
pub struct PoolClosed {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub returned: u64,
}

#[event]
pub struct NftCreated {
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub uri: String,
    pub royalty_bps: u16,
}

#[event]
pub struct NftUpdated {
    pub mint: Pubkey,
    pub uri: String,
    pub royalty_bps: u16,
}

#[event]
pub struct AirdropSent {
    pub recipient: Pubkey,
    pub lamports: u64,
}

#[event]
pub struct TokenCreated {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub decimals: u8,
    pub initial_supply: u64,
}

#[event]
pub struct SupplyChanged {
    pub mint: Pubkey,
    pub account: Pubkey,
    pub minted: bool,
    pub amount: u64,
}

#[event]
pub struct TokenAuthorityChanged {
    pub mint: Pubkey,
    pub kind: AuthorityKind,
    pub new_authority: Option<Pubkey>,
}

#[event]
pub struct SolTransferred {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: u64,
}

#[event]
pub struct FaucetFunded {
    pub funder: Pubkey,
    pub lamports: u64,
    pub balance: u64,
}

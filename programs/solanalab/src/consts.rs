pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// Fees are expressed in basis points of the sale price
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const DEFAULT_FEE_BPS: u16 = 250; // 2.5%
pub const MAX_FEE_BPS: u16 = 1_000; // 10%

pub const MIN_PRICE_LAMPORTS: u64 = LAMPORTS_PER_SOL / 1_000; // 0.001 SOL
pub const MAX_PRICE_LAMPORTS: u64 = 1_000_000 * LAMPORTS_PER_SOL;

/// Longest listing lifetime a seller may request
pub const MAX_LISTING_DURATION: i64 = 30 * 24 * 60 * 60;
/// Lifetime applied when a seller does not pick one
pub const DEFAULT_LISTING_DURATION: i64 = 24 * 60 * 60;

pub const DEFAULT_AIRDROP_LAMPORTS: u64 = LAMPORTS_PER_SOL;
pub const MAX_AIRDROP_LAMPORTS: u64 = 5 * LAMPORTS_PER_SOL;
pub const DEFAULT_AIRDROP_COOLDOWN: i64 = 60;

// Token Metadata program limits
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_ROYALTY_BPS: u16 = 1_000;

pub const NFT_DECIMALS: u8 = 0;
pub const NFT_SYMBOL: &str = "NFT";

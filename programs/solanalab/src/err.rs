use anchor_lang::prelude::*;

/// Logs the failed account check and maps it onto a single error code so
/// constraint failures stay greppable in transaction logs.
pub fn acc(msg: impl std::fmt::Display) -> SolanaLabError {
    msg!("[InvalidAccountInput] {}", msg);
    SolanaLabError::InvalidAccountInput
}

#[error_code]
pub enum SolanaLabError {
    #[msg("Provided account does not satisfy the instruction constraints")]
    InvalidAccountInput,

    #[msg("Amount must be greater than zero")]
    NoZeroTokens,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Arithmetic overflow")]
    MathOverflow,

    #[msg("Price is outside of the allowed range")]
    InvalidPrice,

    #[msg("Fee exceeds the configured maximum")]
    FeeTooHigh,

    #[msg("Marketplace is paused")]
    MarketplacePaused,

    #[msg("Signer is not the marketplace authority")]
    InvalidAuthority,

    #[msg("Signer is not the seller of this listing")]
    InvalidSeller,

    #[msg("Listing is no longer active")]
    ListingNotActive,

    #[msg("Listing has expired")]
    ListingExpired,

    #[msg("Listing duration is out of range")]
    InvalidDuration,

    #[msg("Sellers cannot buy their own listing")]
    CannotBuyOwnListing,

    #[msg("An NFT listing must escrow exactly one token of a zero-decimal mint")]
    InvalidNftListing,

    #[msg("Token mints do not match")]
    InvalidTokenMints,

    #[msg("Signer is not the pool owner")]
    InvalidPoolOwner,

    #[msg("Pool is not active")]
    PoolNotActive,

    #[msg("Requested amount exceeds pool liquidity")]
    InsufficientLiquidity,

    #[msg("Purchase amount is too small to be priced")]
    PurchaseTooSmall,

    #[msg("Cost exceeds the maximum the buyer accepted")]
    SlippageExceeded,

    #[msg("Name is empty or too long")]
    InvalidName,

    #[msg("Symbol is too long")]
    InvalidSymbol,

    #[msg("URI is empty or too long")]
    InvalidUri,

    #[msg("Sender and recipient must differ")]
    SelfTransfer,

    #[msg("Airdrop amount exceeds the faucet limit")]
    AirdropTooLarge,

    #[msg("Recipient must wait before requesting another airdrop")]
    AirdropCooldown,

    #[msg("Faucet does not hold enough lamports")]
    FaucetDry,

    #[msg("Airdrop would leave the recipient below rent exemption")]
    AirdropBelowRent,

    #[msg("Token account is frozen")]
    AccountFrozen,
}

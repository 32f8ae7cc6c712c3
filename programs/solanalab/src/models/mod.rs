use anchor_lang::prelude::*;

pub mod escrow;
pub mod faucet;
pub mod fees;
pub mod marketplace;
pub mod pool;
pub mod receipt;
pub mod token_metadata;

/// What a listing or trade moves: a fungible amount or a single NFT
#[derive(AnchorSerialize, AnchorDeserialize, Copy, Clone, Debug, Eq, PartialEq, InitSpace)]
pub enum AssetKind {
    Token,
    Nft,
}

/// Where a trade settled
#[derive(AnchorSerialize, AnchorDeserialize, Copy, Clone, Debug, Eq, PartialEq, InitSpace)]
pub enum TradeVenue {
    Escrow,
    Pool,
}

/// Which mint authority an authority change targets
#[derive(AnchorSerialize, AnchorDeserialize, Copy, Clone, Debug, Eq, PartialEq)]
pub enum AuthorityKind {
    Mint,
    Freeze,
}

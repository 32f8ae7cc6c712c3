pub mod consts;
mod endpoints;
mod err;
pub mod events;
mod libraries;
pub mod models;

use crate::endpoints::*;
use crate::models::fees::Settlement;
use crate::models::{AssetKind, AuthorityKind};
use anchor_lang::prelude::*;

declare_id!("3P5aMUyZVDiuPhG5H3LPF64Dp96iEZXXkWrJow5bHWf7");

/// # SolanaLab Program
///
/// On-chain backend of the SolanaLab dashboard:
/// - Escrow marketplace where listed tokens and NFTs sit in PDA-owned vaults
/// - Fixed-price token pools with owner-managed liquidity
/// - Atomic settlement with a treasury fee and a receipt per trade
/// - SPL token and NFT creation, minting, burning and authority management
/// - A funded devnet faucet with per-recipient cooldowns
#[program]
pub mod solanalab {
    use super::*;

    // ===== Marketplace Configuration =====

    /// Creates the marketplace singleton; the signer becomes its authority
    ///
    /// # Arguments
    /// * `fee_bps` - Trade fee in basis points (max 1000, clients default to 250)
    pub fn initialize_marketplace(ctx: Context<InitMarketplace>, fee_bps: u16) -> Result<()> {
        init_marketplace::handle(ctx, fee_bps)
    }

    /// Changes fee, treasury or pause switch. Authority only.
    pub fn update_marketplace(
        ctx: Context<UpdateMarketplace>,
        fee_bps: Option<u16>,
        treasury: Option<Pubkey>,
        paused: Option<bool>,
    ) -> Result<()> {
        update_marketplace::handle(ctx, fee_bps, treasury, paused)
    }

    // ===== Escrow Marketplace =====

    /// Lists tokens or an NFT, moving them into an escrow vault
    ///
    /// # Arguments
    /// * `listing_id` - Seller-chosen id, part of the escrow address
    /// * `kind` - `Token` or `Nft`
    /// * `amount` - Raw token units to escrow
    /// * `price` - Lamports for the whole amount
    /// * `duration` - Listing lifetime in seconds, one day when omitted
    pub fn create_escrow(
        ctx: Context<CreateEscrow>,
        listing_id: u64,
        kind: AssetKind,
        amount: u64,
        price: u64,
        duration: Option<i64>,
    ) -> Result<()> {
        create_escrow::handle(ctx, listing_id, kind, amount, price, duration)
    }

    /// Buys an escrow listing: pays seller and treasury, delivers the tokens
    /// and writes a trade receipt in one instruction
    ///
    /// # Arguments
    /// * `max_price` - Highest price in lamports the buyer accepts (guards
    ///   against a reprice landing first)
    pub fn purchase_escrow(ctx: Context<PurchaseEscrow>, max_price: u64) -> Result<()> {
        purchase_escrow::handle(ctx, max_price)
    }

    /// Returns escrowed tokens to the seller and closes the listing
    pub fn cancel_escrow(ctx: Context<CancelEscrow>) -> Result<()> {
        cancel_escrow::handle(ctx)
    }

    /// Reprices an open listing, optionally restarting its lifetime
    pub fn update_escrow_price(
        ctx: Context<UpdateEscrowPrice>,
        price: u64,
        duration: Option<i64>,
    ) -> Result<()> {
        update_escrow_price::handle(ctx, price, duration)
    }

    // ===== Liquidity Pools =====

    /// Opens an empty fixed-price pool
    ///
    /// # Arguments
    /// * `pool_id` - Owner-chosen id, part of the pool address
    /// * `unit_price` - Lamports per whole token
    pub fn new_pool(ctx: Context<NewPool>, pool_id: u64, unit_price: u64) -> Result<()> {
        new_pool::handle(ctx, pool_id, unit_price)
    }

    /// Deposits tokens into a pool vault
    pub fn add_liquidity(ctx: Context<AddLiquidity>, amount: u64) -> Result<()> {
        add_liquidity::handle(ctx, amount)
    }

    /// Withdraws unsold tokens. Pool owner only.
    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, amount: u64) -> Result<()> {
        remove_liquidity::handle(ctx, amount)
    }

    /// Preview purchase for `buyer`: returns cost and fee split without executing
    pub fn get_pool_quote(ctx: Context<GetPoolQuote>, amount: u64) -> Result<Settlement> {
        get_pool_quote::handle(ctx, amount)
    }

    /// Buys tokens from a pool
    ///
    /// # Arguments
    /// * `amount` - Raw token units to buy
    /// * `max_cost` - Highest total price in lamports (slippage protection)
    pub fn buy_from_pool(ctx: Context<BuyFromPool>, amount: u64, max_cost: u64) -> Result<()> {
        buy_from_pool::handle(ctx, amount, max_cost)
    }

    /// Changes unit price or suspends sales. Pool owner only.
    pub fn update_pool(
        ctx: Context<UpdatePool>,
        unit_price: Option<u64>,
        is_active: Option<bool>,
    ) -> Result<()> {
        update_pool::handle(ctx, unit_price, is_active)
    }

    /// Returns remaining liquidity and closes the pool. Pool owner only.
    pub fn close_pool(ctx: Context<ClosePool>) -> Result<()> {
        close_pool::handle(ctx)
    }

    // ===== Tokens =====

    /// Creates a fungible token with immutable metadata
    pub fn create_token(
        ctx: Context<CreateToken>,
        decimals: u8,
        name: String,
        symbol: String,
        uri: String,
        initial_supply: u64,
    ) -> Result<()> {
        create_token::handle(ctx, decimals, name, symbol, uri, initial_supply)
    }

    pub fn mint_tokens(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        mint_tokens::handle(ctx, amount)
    }

    pub fn burn_tokens(ctx: Context<BurnTokens>, amount: u64) -> Result<()> {
        burn_tokens::handle(ctx, amount)
    }

    /// Burns the remaining balance and closes the token account
    pub fn close_token_account(ctx: Context<CloseTokenAccount>) -> Result<()> {
        close_token_account::handle(ctx)
    }

    /// Moves the mint or freeze authority, or revokes it with `None`
    pub fn set_token_authority(
        ctx: Context<SetTokenAuthority>,
        kind: AuthorityKind,
        new_authority: Option<Pubkey>,
    ) -> Result<()> {
        set_token_authority::handle(ctx, kind, new_authority)
    }

    pub fn transfer_sol(ctx: Context<TransferSol>, lamports: u64) -> Result<()> {
        transfer_sol::handle(ctx, lamports)
    }

    // ===== NFTs =====

    /// Mints a one-of-one NFT with mutable metadata and a master edition
    ///
    /// # Arguments
    /// * `name` - NFT name
    /// * `symbol` - Collection symbol
    /// * `uri` - Off-chain JSON with image and attributes
    /// * `royalty_bps` - Clamped to 1000 (10%)
    pub fn create_nft(
        ctx: Context<CreateNft>,
        name: String,
        symbol: String,
        uri: String,
        royalty_bps: u16,
    ) -> Result<()> {
        create_nft::handle(ctx, name, symbol, uri, royalty_bps)
    }

    /// Edits name, uri and royalty of an NFT. Update authority only.
    pub fn update_nft(
        ctx: Context<UpdateNft>,
        name: String,
        uri: String,
        royalty_bps: u16,
    ) -> Result<()> {
        update_nft::handle(ctx, name, uri, royalty_bps)
    }

    // ===== Faucet =====

    /// Creates the faucet reserve. Marketplace authority only.
    pub fn init_faucet(ctx: Context<InitFaucet>, max_per_request: u64, cooldown: i64) -> Result<()> {
        init_faucet::handle(ctx, max_per_request, cooldown)
    }

    pub fn fund_faucet(ctx: Context<FundFaucet>, lamports: u64) -> Result<()> {
        fund_faucet::handle(ctx, lamports)
    }

    /// Sends devnet SOL from the faucet, subject to the recipient cooldown
    pub fn request_airdrop(ctx: Context<RequestAirdrop>, lamports: u64) -> Result<()> {
        request_airdrop::handle(ctx, lamports)
    }
}

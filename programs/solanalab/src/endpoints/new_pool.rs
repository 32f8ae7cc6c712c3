use crate::events::PoolCreated;
use crate::models::escrow::check_price;
use crate::models::marketplace::Marketplace;
use crate::models::pool::TokenPool;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

/// Opens an empty fixed-price pool for `mint`.
///
/// # Arguments
/// * `pool_id` - Owner-chosen id, lets one owner run several pools per mint
/// * `unit_price` - Lamports per whole token, bounded like listing prices
pub fn handle(ctx: Context<NewPool>, pool_id: u64, unit_price: u64) -> Result<()> {
    let accs = ctx.accounts;

    accs.marketplace.ensure_open()?;
    check_price(unit_price)?;

    let pool = &mut accs.pool;
    pool.owner = accs.owner.key();
    pool.mint = accs.mint.key();
    pool.pool_id = pool_id;
    pool.vault = accs.vault.key();
    pool.unit_price = unit_price;
    pool.decimals = accs.mint.decimals;
    pool.total_liquidity = 0;
    pool.created_at = Clock::get()?.unix_timestamp;
    pool.is_active = true;
    pool.bump = ctx.bumps.pool;

    accs.marketplace.pool_opened()?;

    emit!(PoolCreated {
        pool: pool.key(),
        owner: pool.owner,
        mint: pool.mint,
        unit_price,
        decimals: pool.decimals,
    });

    msg!(
        "pool {} created: unit_price {} decimals {}",
        pool_id,
        unit_price,
        pool.decimals
    );

    Ok(())
}

/// Account validation struct for opening a pool
///
/// # Account Requirements
/// * `owner` - Signer paying rent, receives proceeds of every sale
/// * `pool` - New pool PDA `["pool", owner, mint, pool_id]`
/// * `pool_signer` - PDA `["signer", pool]` with authority over the vault
/// * `vault` - New associated token account of `pool_signer`
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct NewPool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [Marketplace::PREFIX], bump = marketplace.bump)]
    pub marketplace: Box<Account<'info, Marketplace>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        space = 8 + TokenPool::INIT_SPACE,
        seeds = [
            TokenPool::POOL_PREFIX,
            owner.key().as_ref(),
            mint.key().as_ref(),
            pool_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub pool: Box<Account<'info, TokenPool>>,

    /// CHECK: pool signer pda
    #[account(seeds = [TokenPool::SIGNER_PDA_PREFIX, pool.key().as_ref()], bump)]
    pub pool_signer: AccountInfo<'info>,

    #[account(
        init,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = pool_signer
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

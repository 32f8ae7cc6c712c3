use crate::err::SolanaLabError;
use crate::models::fees::Settlement;
use crate::models::marketplace::Marketplace;
use crate::models::pool::TokenPool;
use anchor_lang::prelude::*;

/// Prices `amount` raw units for `buyer` against the pool's current
/// liquidity and the marketplace fee. Shared by the read-only quote and the
/// purchase, so a quote fails exactly when the purchase would.
///
/// # Errors
/// * `SolanaLabError::MarketplacePaused` - If trading is suspended
/// * `SolanaLabError::CannotBuyOwnListing` - If `buyer` owns the pool
/// * `SolanaLabError::PoolNotActive` - If the owner suspended the pool
/// * `SolanaLabError::InsufficientLiquidity` - If the pool holds less than `amount`
pub fn quote(
    pool: &TokenPool,
    marketplace: &Marketplace,
    buyer: &Pubkey,
    amount: u64,
) -> Result<Settlement> {
    marketplace.ensure_open()?;
    if *buyer == pool.owner {
        return Err(error!(SolanaLabError::CannotBuyOwnListing));
    }
    pool.ensure_active()?;
    if amount > pool.total_liquidity {
        return Err(error!(SolanaLabError::InsufficientLiquidity));
    }
    let cost = pool.purchase_cost(amount)?;
    marketplace.settle(cost)
}

/// Preview of `buy_from_pool`, returns the settlement without moving funds
pub fn handle(ctx: Context<GetPoolQuote>, amount: u64) -> Result<Settlement> {
    let accs = ctx.accounts;
    let settlement = quote(&accs.pool, &accs.marketplace, &accs.buyer.key(), amount)?;

    msg!(
        "quote: {} units cost {} (fee {})",
        amount,
        settlement.price,
        settlement.fee
    );

    Ok(settlement)
}

#[derive(Accounts)]
pub struct GetPoolQuote<'info> {
    #[account(seeds = [Marketplace::PREFIX], bump = marketplace.bump)]
    pub marketplace: Account<'info, Marketplace>,

    pub pool: Account<'info, TokenPool>,

    /// CHECK: only its key is compared with the pool owner
    pub buyer: UncheckedAccount<'info>,
}

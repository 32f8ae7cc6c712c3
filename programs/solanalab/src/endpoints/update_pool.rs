use crate::err::SolanaLabError;
use crate::events::PoolUpdated;
use crate::models::escrow::check_price;
use crate::models::pool::TokenPool;
use anchor_lang::prelude::*;

pub fn handle(
    ctx: Context<UpdatePool>,
    unit_price: Option<u64>,
    is_active: Option<bool>,
) -> Result<()> {
    let pool = &mut ctx.accounts.pool;

    if let Some(unit_price) = unit_price {
        check_price(unit_price)?;
        pool.unit_price = unit_price;
    }
    if let Some(is_active) = is_active {
        pool.is_active = is_active;
    }

    emit!(PoolUpdated {
        pool: pool.key(),
        unit_price: pool.unit_price,
        is_active: pool.is_active,
    });

    msg!(
        "pool {} updated: unit_price {} active {}",
        pool.pool_id,
        pool.unit_price,
        pool.is_active
    );

    Ok(())
}

#[derive(Accounts)]
pub struct UpdatePool<'info> {
    pub owner: Signer<'info>,

    #[account(mut, has_one = owner @ SolanaLabError::InvalidPoolOwner)]
    pub pool: Account<'info, TokenPool>,
}

use crate::err::SolanaLabError;
use crate::events::MarketplaceUpdated;
use crate::models::marketplace::Marketplace;
use anchor_lang::prelude::*;

/// Applies whichever settings were provided, leaving the rest untouched
pub fn handle(
    ctx: Context<UpdateMarketplace>,
    fee_bps: Option<u16>,
    treasury: Option<Pubkey>,
    paused: Option<bool>,
) -> Result<()> {
    let marketplace = &mut ctx.accounts.marketplace;

    marketplace.apply_update(fee_bps, treasury, paused)?;

    emit!(MarketplaceUpdated {
        authority: marketplace.authority,
        treasury: marketplace.treasury,
        fee_bps: marketplace.fee_bps,
        paused: marketplace.paused,
    });

    msg!(
        "marketplace updated: fee_bps {} paused {}",
        marketplace.fee_bps,
        marketplace.paused
    );

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateMarketplace<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [Marketplace::PREFIX],
        bump = marketplace.bump,
        has_one = authority @ SolanaLabError::InvalidAuthority
    )]
    pub marketplace: Account<'info, Marketplace>,
}

use crate::events::MarketplaceUpdated;
use crate::models::marketplace::Marketplace;
use anchor_lang::prelude::*;

pub fn handle(ctx: Context<InitMarketplace>, fee_bps: u16) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let treasury = ctx.accounts.treasury.key();

    let marketplace = &mut ctx.accounts.marketplace;
    marketplace.initialize(authority, treasury, fee_bps, ctx.bumps.marketplace)?;

    emit!(MarketplaceUpdated {
        authority,
        treasury,
        fee_bps,
        paused: false,
    });

    msg!(
        "marketplace initialized: fee_bps {} treasury {}",
        fee_bps,
        treasury
    );

    Ok(())
}

#[derive(Accounts)]
pub struct InitMarketplace<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + Marketplace::INIT_SPACE,
        seeds = [Marketplace::PREFIX],
        bump
    )]
    pub marketplace: Account<'info, Marketplace>,

    /// CHECK: any wallet may receive fees
    pub treasury: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

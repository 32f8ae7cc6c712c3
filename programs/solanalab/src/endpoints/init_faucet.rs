use crate::err::SolanaLabError;
use crate::models::faucet::Faucet;
use crate::models::marketplace::Marketplace;
use anchor_lang::prelude::*;

/// Creates the faucet reserve, owned by the marketplace authority.
///
/// # Arguments
/// * `max_per_request` - Largest single airdrop in lamports (at most 5 SOL)
/// * `cooldown` - Seconds a recipient waits between airdrops
pub fn handle(ctx: Context<InitFaucet>, max_per_request: u64, cooldown: i64) -> Result<()> {
    Faucet::check_limits(max_per_request, cooldown)?;

    let faucet = &mut ctx.accounts.faucet;
    faucet.authority = ctx.accounts.authority.key();
    faucet.max_per_request = max_per_request;
    faucet.cooldown = cooldown;
    faucet.total_dispensed = 0;
    faucet.bump = ctx.bumps.faucet;

    msg!(
        "faucet initialized: max {} lamports every {}s",
        max_per_request,
        cooldown
    );

    Ok(())
}

#[derive(Accounts)]
pub struct InitFaucet<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [Marketplace::PREFIX],
        bump = marketplace.bump,
        has_one = authority @ SolanaLabError::InvalidAuthority
    )]
    pub marketplace: Account<'info, Marketplace>,

    #[account(
        init,
        payer = authority,
        space = 8 + Faucet::INIT_SPACE,
        seeds = [Faucet::PREFIX],
        bump
    )]
    pub faucet: Account<'info, Faucet>,

    pub system_program: Program<'info, System>,
}

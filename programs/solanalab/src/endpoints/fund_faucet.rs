use crate::events::FaucetFunded;
use crate::models::faucet::Faucet;
use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

impl<'info> FundFaucet<'info> {
    fn deposit_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.funder.to_account_info(),
            to: self.faucet.to_account_info(),
        };
        CpiContext::new(self.system_program.to_account_info(), cpi_accounts)
    }
}

/// Tops up the faucet reserve. Anyone may fund it.
pub fn handle(ctx: Context<FundFaucet>, lamports: u64) -> Result<()> {
    let accs = ctx.accounts;

    Faucet::check_funding(lamports, accs.funder.lamports())?;
    system_program::transfer(accs.deposit_ctx(), lamports)?;

    let balance = accs.faucet.to_account_info().lamports();
    emit!(FaucetFunded {
        funder: accs.funder.key(),
        lamports,
        balance,
    });

    msg!("faucet funded with {}, balance {}", lamports, balance);

    Ok(())
}

#[derive(Accounts)]
pub struct FundFaucet<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(mut, seeds = [Faucet::PREFIX], bump = faucet.bump)]
    pub faucet: Account<'info, Faucet>,

    pub system_program: Program<'info, System>,
}

use crate::err::SolanaLabError;
use crate::events::SolTransferred;
use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

impl<'info> TransferSol<'info> {
    fn transfer_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.sender.to_account_info(),
            to: self.recipient.to_account_info(),
        };
        CpiContext::new(self.system_program.to_account_info(), cpi_accounts)
    }
}

pub fn check_transfer(from: &Pubkey, to: &Pubkey, lamports: u64, balance: u64) -> Result<()> {
    require!(lamports > 0, SolanaLabError::NoZeroTokens);
    require!(from != to, SolanaLabError::SelfTransfer);
    require!(lamports <= balance, SolanaLabError::InsufficientBalance);
    Ok(())
}

pub fn handle(ctx: Context<TransferSol>, lamports: u64) -> Result<()> {
    let accs = ctx.accounts;

    check_transfer(
        &accs.sender.key(),
        &accs.recipient.key(),
        lamports,
        accs.sender.lamports(),
    )?;
    system_program::transfer(accs.transfer_ctx(), lamports)?;

    emit!(SolTransferred {
        from: accs.sender.key(),
        to: accs.recipient.key(),
        lamports,
    });

    msg!("sent {} lamports to {}", lamports, accs.recipient.key());

    Ok(())
}

#[derive(Accounts)]
pub struct TransferSol<'info> {
    #[account(mut)]
    pub sender: Signer<'info>,

    #[account(mut)]
    pub recipient: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

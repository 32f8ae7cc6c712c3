use crate::err::SolanaLabError;
use crate::events::SupplyChanged;
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, CloseAccount, Mint, Token, TokenAccount};

impl<'info> CloseTokenAccount<'info> {
    fn burn_remaining_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Burn<'info>> {
        let cpi_accounts = Burn {
            mint: self.mint.to_account_info(),
            from: self.token_account.to_account_info(),
            authority: self.owner.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    /// Creates a CPI context for closing the emptied account
    ///
    /// # Returns
    /// * `CpiContext` - The context for the close CPI, rent goes to the owner
    fn close_ctx(&self) -> CpiContext<'_, '_, '_, 'info, CloseAccount<'info>> {
        let cpi_accounts = CloseAccount {
            account: self.token_account.to_account_info(),
            destination: self.owner.to_account_info(),
            authority: self.owner.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Raw units that must be burned before the account can be closed.
/// Wrapped SOL is never burned, closing unwraps it to the owner.
pub fn amount_to_burn(balance: u64, is_native: bool, is_frozen: bool) -> Result<u64> {
    if is_frozen {
        return Err(error!(SolanaLabError::AccountFrozen));
    }
    if is_native {
        return Ok(0);
    }
    Ok(balance)
}

/// Burns whatever the account still holds, then closes it and returns the
/// rent to the owner.
///
/// # Errors
/// * `SolanaLabError::AccountFrozen` - If the freeze authority froze the account
pub fn handle(ctx: Context<CloseTokenAccount>) -> Result<()> {
    let accs = ctx.accounts;

    let remaining = amount_to_burn(
        accs.token_account.amount,
        accs.token_account.is_native(),
        accs.token_account.is_frozen(),
    )?;
    if remaining > 0 {
        token::burn(accs.burn_remaining_ctx(), remaining)?;

        emit!(SupplyChanged {
            mint: accs.mint.key(),
            account: accs.token_account.key(),
            minted: false,
            amount: remaining,
        });
    }
    token::close_account(accs.close_ctx())?;

    msg!(
        "closed token account {} (burned {})",
        accs.token_account.key(),
        remaining
    );

    Ok(())
}

#[derive(Accounts)]
pub struct CloseTokenAccount<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut)]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = owner
    )]
    pub token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

use crate::err::SolanaLabError;
use crate::events::SupplyChanged;
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};

impl<'info> BurnTokens<'info> {
    fn burn_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Burn<'info>> {
        let cpi_accounts = Burn {
            mint: self.mint.to_account_info(),
            from: self.source.to_account_info(),
            authority: self.owner.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Checked before the CPI so the failure names the real cause
pub fn check_burn(amount: u64, balance: u64) -> Result<()> {
    require!(amount > 0, SolanaLabError::NoZeroTokens);
    require!(amount <= balance, SolanaLabError::InsufficientBalance);
    Ok(())
}

pub fn handle(ctx: Context<BurnTokens>, amount: u64) -> Result<()> {
    let accs = ctx.accounts;

    check_burn(amount, accs.source.amount)?;
    token::burn(accs.burn_ctx(), amount)?;

    emit!(SupplyChanged {
        mint: accs.mint.key(),
        account: accs.source.key(),
        minted: false,
        amount,
    });

    msg!("burned {} of {}", amount, accs.mint.key());

    Ok(())
}

#[derive(Accounts)]
pub struct BurnTokens<'info> {
    pub owner: Signer<'info>,

    #[account(mut)]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = owner
    )]
    pub source: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_whole_balance() {
        assert!(check_burn(1_000, 1_000).is_ok());
    }

    #[test]
    #[should_panic(expected = "InsufficientBalance")]
    fn test_burn_more_than_balance() {
        check_burn(1_001, 1_000).unwrap();
    }

    #[test]
    #[should_panic(expected = "NoZeroTokens")]
    fn test_burn_zero() {
        check_burn(0, 1_000).unwrap();
    }
}

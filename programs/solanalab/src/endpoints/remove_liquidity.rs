use crate::err;
use crate::err::SolanaLabError;
use crate::events::LiquidityChanged;
use crate::models::pool::TokenPool;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

impl<'info> RemoveLiquidity<'info> {
    /// Creates a CPI context for releasing liquidity to the owner's token account
    ///
    /// # Returns
    /// * `CpiContext` - The context for the token transfer CPI, signed by the
    ///   pool signer PDA
    fn withdraw_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.owner_token.to_account_info(),
            authority: self.pool_signer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Withdraws `amount` raw units of unsold liquidity back to the owner.
///
/// Works on paused marketplaces and inactive pools.
///
/// # Errors
/// * `SolanaLabError::InvalidPoolOwner` - If the signer does not own the pool
/// * `SolanaLabError::InsufficientLiquidity` - If `amount` exceeds the pool
pub fn handle(ctx: Context<RemoveLiquidity>, amount: u64) -> Result<()> {
    let accs = ctx.accounts;

    accs.pool.withdraw(amount)?;

    let pool_key = accs.pool.key();
    let seeds = &[
        TokenPool::SIGNER_PDA_PREFIX,
        pool_key.as_ref(),
        &[ctx.bumps.pool_signer],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(accs.withdraw_ctx().with_signer(signer_seeds), amount)?;

    emit!(LiquidityChanged {
        pool: pool_key,
        provider: accs.owner.key(),
        deposited: false,
        amount,
        total_liquidity: accs.pool.total_liquidity,
    });

    msg!(
        "pool {} -{} liquidity, total {}",
        accs.pool.pool_id,
        amount,
        accs.pool.total_liquidity
    );

    Ok(())
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        has_one = owner @ SolanaLabError::InvalidPoolOwner,
        has_one = mint @ SolanaLabError::InvalidTokenMints,
        has_one = vault @ err::acc("Vault does not belong to pool")
    )]
    pub pool: Box<Account<'info, TokenPool>>,

    /// CHECK: pool signer pda
    #[account(seeds = [TokenPool::SIGNER_PDA_PREFIX, pool.key().as_ref()], bump)]
    pub pool_signer: AccountInfo<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = owner
    )]
    pub owner_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LAMPORTS_PER_SOL;
    use crate::models::pool::tests::create_test_pool;

    #[test]
    fn test_owner_can_drain_pool() {
        let mut pool = create_test_pool(9, LAMPORTS_PER_SOL);
        pool.deposit(7_000).unwrap();

        pool.withdraw(7_000).unwrap();
        assert_eq!(pool.total_liquidity, 0);
    }

    #[test]
    fn test_withdraw_from_inactive_pool() {
        let mut pool = create_test_pool(9, LAMPORTS_PER_SOL);
        pool.deposit(100).unwrap();
        pool.is_active = false;

        // withdrawals ignore the active switch
        pool.withdraw(40).unwrap();
        assert_eq!(pool.total_liquidity, 60);
    }

    #[test]
    #[should_panic(expected = "InsufficientLiquidity")]
    fn test_withdraw_more_than_deposited() {
        let mut pool = create_test_pool(9, LAMPORTS_PER_SOL);
        pool.deposit(100).unwrap();
        pool.withdraw(101).unwrap();
    }

    #[test]
    fn test_withdrawn_liquidity_is_no_longer_for_sale() {
        let marketplace = crate::models::marketplace::tests::create_test_marketplace();
        let mut pool = create_test_pool(0, LAMPORTS_PER_SOL);
        pool.deposit(10).unwrap();
        pool.withdraw(8).unwrap();

        let buyer = Pubkey::new_unique();
        let quote = crate::endpoints::get_pool_quote::quote;
        assert!(quote(&pool, &marketplace, &buyer, 2).is_ok());
        assert!(quote(&pool, &marketplace, &buyer, 3).is_err());
    }
}

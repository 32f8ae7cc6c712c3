use crate::err;
use crate::err::SolanaLabError;
use crate::events::LiquidityChanged;
use crate::models::marketplace::Marketplace;
use crate::models::pool::TokenPool;
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

impl<'info> AddLiquidity<'info> {
    fn deposit_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.provider_token.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.provider.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Deposits `amount` raw units into the pool vault. Any wallet may provide
/// liquidity; proceeds of every sale still go to the pool owner.
pub fn handle(ctx: Context<AddLiquidity>, amount: u64) -> Result<()> {
    let accs = ctx.accounts;

    accs.marketplace.ensure_open()?;
    accs.pool.ensure_active()?;

    // Check if provider has sufficient tokens
    require!(
        accs.provider_token.amount >= amount,
        SolanaLabError::InsufficientBalance
    );

    accs.pool.deposit(amount)?;
    token::transfer(accs.deposit_ctx(), amount)?;

    emit!(LiquidityChanged {
        pool: accs.pool.key(),
        provider: accs.provider.key(),
        deposited: true,
        amount,
        total_liquidity: accs.pool.total_liquidity,
    });

    msg!(
        "pool {} +{} liquidity, total {}",
        accs.pool.pool_id,
        amount,
        accs.pool.total_liquidity
    );

    Ok(())
}

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    pub provider: Signer<'info>,

    #[account(seeds = [Marketplace::PREFIX], bump = marketplace.bump)]
    pub marketplace: Box<Account<'info, Marketplace>>,

    #[account(
        mut,
        has_one = vault @ err::acc("Vault does not belong to pool")
    )]
    pub pool: Box<Account<'info, TokenPool>>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = pool.mint,
        token::authority = provider
    )]
    pub provider_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

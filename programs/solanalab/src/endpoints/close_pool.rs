use crate::err;
use crate::err::SolanaLabError;
use crate::events::PoolClosed;
use crate::models::marketplace::Marketplace;
use crate::models::pool::TokenPool;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer};

impl<'info> ClosePool<'info> {
    /// Creates a CPI context for returning the vault balance to the owner
    ///
    /// # Returns
    /// * `CpiContext` - The context for the token transfer CPI
    fn return_liquidity_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.owner_token.to_account_info(),
            authority: self.pool_signer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    fn close_vault_ctx(&self) -> CpiContext<'_, '_, '_, 'info, CloseAccount<'info>> {
        let cpi_accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination: self.owner.to_account_info(),
            authority: self.pool_signer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Returns everything left in the vault to the owner and closes the pool.
/// The pool and vault rent go back to the owner.
pub fn handle(ctx: Context<ClosePool>) -> Result<()> {
    let accs = ctx.accounts;

    let pool_key = accs.pool.key();
    let seeds = &[
        TokenPool::SIGNER_PDA_PREFIX,
        pool_key.as_ref(),
        &[ctx.bumps.pool_signer],
    ];
    let signer_seeds = &[&seeds[..]];

    // vault balance, not total_liquidity, so stray deposits are not stranded
    let returned = accs.vault.amount;
    if returned > 0 {
        token::transfer(
            accs.return_liquidity_ctx().with_signer(signer_seeds),
            returned,
        )?;
    }
    token::close_account(accs.close_vault_ctx().with_signer(signer_seeds))?;

    accs.pool.wind_down(&mut accs.marketplace)?;

    emit!(PoolClosed {
        pool: pool_key,
        owner: accs.owner.key(),
        returned,
    });

    msg!("pool {} closed: returned {}", accs.pool.pool_id, returned);

    Ok(())
}

#[derive(Accounts)]
pub struct ClosePool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [Marketplace::PREFIX], bump = marketplace.bump)]
    pub marketplace: Box<Account<'info, Marketplace>>,

    #[account(
        mut,
        has_one = owner @ SolanaLabError::InvalidPoolOwner,
        has_one = mint @ SolanaLabError::InvalidTokenMints,
        has_one = vault @ err::acc("Vault does not belong to pool"),
        close = owner
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

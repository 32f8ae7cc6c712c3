use crate::err;
use crate::err::SolanaLabError;
use crate::events::SupplyChanged;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

impl<'info> MintTokens<'info> {
    fn mint_to_ctx(&self) -> CpiContext<'_, '_, '_, 'info, MintTo<'info>> {
        let cpi_accounts = MintTo {
            mint: self.mint.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.authority.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Mints `amount` raw units to the recipient's associated token account,
/// creating it when missing.
pub fn handle(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
    require!(amount > 0, SolanaLabError::NoZeroTokens);

    let accs = ctx.accounts;
    token::mint_to(accs.mint_to_ctx(), amount)?;

    emit!(SupplyChanged {
        mint: accs.mint.key(),
        account: accs.destination.key(),
        minted: true,
        amount,
    });

    msg!("minted {} of {} to {}", amount, accs.mint.key(), accs.recipient.key());

    Ok(())
}

#[derive(Accounts)]
pub struct MintTokens<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = mint.mint_authority == COption::Some(authority.key())
            @ err::acc("Signer is not the mint authority")
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: any wallet may receive tokens
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = recipient
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

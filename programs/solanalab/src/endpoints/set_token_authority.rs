use crate::err::SolanaLabError;
use crate::events::TokenAuthorityChanged;
use crate::models::AuthorityKind;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, Mint, SetAuthority, Token};
use spl_token::instruction::AuthorityType;

impl From<AuthorityKind> for AuthorityType {
    fn from(kind: AuthorityKind) -> Self {
        match kind {
            AuthorityKind::Mint => AuthorityType::MintTokens,
            AuthorityKind::Freeze => AuthorityType::FreezeAccount,
        }
    }
}

impl<'info> SetTokenAuthority<'info> {
    fn set_authority_ctx(&self) -> CpiContext<'_, '_, '_, 'info, SetAuthority<'info>> {
        let cpi_accounts = SetAuthority {
            current_authority: self.authority.to_account_info(),
            account_or_mint: self.mint.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// The signer must hold the authority being changed. A revoked authority
/// cannot be changed again.
pub fn ensure_current_authority(current: COption<Pubkey>, signer: Pubkey) -> Result<()> {
    match current {
        COption::Some(authority) if authority == signer => Ok(()),
        _ => Err(error!(SolanaLabError::InvalidAuthority)),
    }
}

/// Hands the mint or freeze authority to `new_authority`, or revokes it
/// permanently when `None`.
pub fn handle(
    ctx: Context<SetTokenAuthority>,
    kind: AuthorityKind,
    new_authority: Option<Pubkey>,
) -> Result<()> {
    let accs = ctx.accounts;

    let current = match kind {
        AuthorityKind::Mint => accs.mint.mint_authority,
        AuthorityKind::Freeze => accs.mint.freeze_authority,
    };
    ensure_current_authority(current, accs.authority.key())?;

    token::set_authority(accs.set_authority_ctx(), kind.into(), new_authority)?;

    emit!(TokenAuthorityChanged {
        mint: accs.mint.key(),
        kind,
        new_authority,
    });

    match new_authority {
        Some(authority) => msg!("{:?} authority of {} moved to {}", kind, accs.mint.key(), authority),
        None => msg!("{:?} authority of {} revoked", kind, accs.mint.key()),
    }

    Ok(())
}

#[derive(Accounts)]
pub struct SetTokenAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(mut)]
    pub mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
}

use crate::err::{self, SolanaLabError};
use crate::events::EscrowCancelled;
use crate::models::escrow::Escrow;
use crate::models::marketplace::Marketplace;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer};

impl<'info> CancelEscrow<'info> {
    /// Creates a CPI context for moving the vault balance back to the seller
    ///
    /// # Returns
    /// * `CpiContext` - The context for the token transfer CPI, to be signed
    ///   with the escrow seeds
    fn return_tokens_to_seller(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.seller_token.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    fn close_vault(&self) -> CpiContext<'_, '_, '_, 'info, CloseAccount<'info>> {
        let cpi_accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination: self.seller.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Returns escrowed tokens to the seller and closes the listing.
///
/// Allowed while the marketplace is paused and after expiry, so custody can
/// always be unwound by the seller.
pub fn handle(ctx: Context<CancelEscrow>) -> Result<()> {
    let accs = ctx.accounts;

    let listing_id = accs.escrow.listing_id.to_le_bytes();
    let seller_key = accs.seller.key();
    let mint_key = accs.mint.key();
    let seeds: &[&[u8]] = &[
        Escrow::PREFIX,
        seller_key.as_ref(),
        mint_key.as_ref(),
        listing_id.as_ref(),
        &[accs.escrow.bump],
    ];
    let signer_seeds = &[seeds];

    // Includes anything sent to the vault outside of the listing
    let amount = accs.vault.amount;
    if amount > 0 {
        token::transfer(
            accs.return_tokens_to_seller().with_signer(signer_seeds),
            amount,
        )?;
    }
    token::close_account(accs.close_vault().with_signer(signer_seeds))?;

    accs.escrow.mark_closed(&mut accs.marketplace)?;

    emit!(EscrowCancelled {
        escrow: accs.escrow.key(),
        seller: seller_key,
        mint: mint_key,
        amount,
    });

    msg!(
        "escrow {} cancelled: returned {}",
        accs.escrow.listing_id,
        amount
    );

    Ok(())
}

#[derive(Accounts)]
pub struct CancelEscrow<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(mut, seeds = [Marketplace::PREFIX], bump = marketplace.bump)]
    pub marketplace: Box<Account<'info, Marketplace>>,

    #[account(
        mut,
        seeds = [
            Escrow::PREFIX,
            seller.key().as_ref(),
            mint.key().as_ref(),
            escrow.listing_id.to_le_bytes().as_ref()
        ],
        bump = escrow.bump,
        has_one = seller @ SolanaLabError::InvalidSeller,
        has_one = mint @ SolanaLabError::InvalidTokenMints,
        has_one = vault @ err::acc("Vault does not belong to escrow"),
        constraint = escrow.is_active @ SolanaLabError::ListingNotActive,
        close = seller
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Recreated if the seller closed it while the listing was open
    #[account(
        init_if_needed,
        payer = seller,
        associated_token::mint = mint,
        associated_token::authority = seller
    )]
    pub seller_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::escrow::tests::create_test_escrow;
    use crate::models::marketplace::tests::create_test_marketplace;
    use crate::models::AssetKind;

    #[test]
    fn test_cancel_after_expiry_is_allowed() {
        let mut marketplace = create_test_marketplace();
        marketplace.listing_opened().unwrap();
        let mut escrow = create_test_escrow(AssetKind::Token, 10);
        let later = escrow.expires_at + 3_600;

        // nobody can buy it any more, the seller can still take it back
        assert!(escrow
            .ensure_purchasable(&Pubkey::new_unique(), later, escrow.price)
            .is_err());
        escrow.mark_closed(&mut marketplace).unwrap();
        assert_eq!(marketplace.active_listings, 0);
    }

    #[test]
    fn test_cancel_while_paused_releases_listing() {
        let mut marketplace = create_test_marketplace();
        marketplace.listing_opened().unwrap();
        marketplace.paused = true;
        let mut escrow = create_test_escrow(AssetKind::Nft, 1);

        escrow.mark_closed(&mut marketplace).unwrap();
        assert_eq!(marketplace.active_listings, 0);
        assert!(!escrow.is_active);
    }

    #[test]
    fn test_signer_seeds_recreate_escrow_address() {
        let escrow = create_test_escrow(AssetKind::Nft, 1);
        let listing_id = escrow.listing_id.to_le_bytes();
        let (expected, bump) = Pubkey::find_program_address(
            &[
                Escrow::PREFIX,
                escrow.seller.as_ref(),
                escrow.mint.as_ref(),
                &listing_id,
            ],
            &crate::ID,
        );

        let derived = Pubkey::create_program_address(
            &[
                Escrow::PREFIX,
                escrow.seller.as_ref(),
                escrow.mint.as_ref(),
                &listing_id,
                &[bump],
            ],
            &crate::ID,
        )
        .unwrap();
        assert_eq!(derived, expected);
    }
}

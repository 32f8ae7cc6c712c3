use crate::err::SolanaLabError;
use crate::events::EscrowCreated;
use crate::models::escrow::{check_listing, listing_expiry, Escrow};
use crate::models::marketplace::Marketplace;
use crate::models::AssetKind;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

impl<'info> CreateEscrow<'info> {
    /// Creates a CPI context for moving the listed tokens into the escrow vault
    ///
    /// The seller signs the transfer from their own token account; the vault
    /// is the associated token account of the escrow PDA.
    ///
    /// # Returns
    /// * `CpiContext` - The context for the token transfer CPI
    fn send_tokens_to_vault(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.seller_token.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.seller.to_account_info(),
        };

        let cpi_program = self.token_program.to_account_info();
        CpiContext::new(cpi_program, cpi_accounts)
    }
}

/// Lists `amount` raw units of `mint` for `price` lamports.
///
/// The tokens leave the seller's wallet in this instruction and stay in a
/// vault owned by the escrow PDA until the listing is bought or cancelled.
///
/// # Arguments
/// * `listing_id` - Seller-chosen id, lets one seller list the same mint several times
/// * `kind` - `Nft` listings must move exactly one token of a zero-decimal mint
/// * `amount` - Raw token units to escrow
/// * `price` - Lamports for the whole amount
/// * `duration` - Listing lifetime in seconds, defaults to one day
///
/// # Errors
/// * `SolanaLabError::MarketplacePaused` - If new listings are suspended
/// * `SolanaLabError::InvalidNftListing` - If an NFT listing is not a single 0-decimal token
/// * `SolanaLabError::InsufficientBalance` - If the seller holds less than `amount`
pub fn handle(
    ctx: Context<CreateEscrow>,
    listing_id: u64,
    kind: AssetKind,
    amount: u64,
    price: u64,
    duration: Option<i64>,
) -> Result<()> {
    let accs = ctx.accounts;

    // Validate marketplace state and listing terms
    accs.marketplace.ensure_open()?;
    check_listing(kind, amount, accs.mint.decimals, price)?;

    // Check if seller holds the tokens being listed
    if amount > accs.seller_token.amount {
        return Err(error!(SolanaLabError::InsufficientBalance));
    }

    let now = Clock::get()?.unix_timestamp;
    let expires_at = listing_expiry(now, duration)?;

    // Move tokens into custody
    token::transfer(accs.send_tokens_to_vault(), amount)?;

    let escrow = &mut accs.escrow;
    escrow.seller = accs.seller.key();
    escrow.mint = accs.mint.key();
    escrow.listing_id = listing_id;
    escrow.vault = accs.vault.key();
    escrow.kind = kind;
    escrow.amount = amount;
    escrow.price = price;
    escrow.created_at = now;
    escrow.expires_at = expires_at;
    escrow.is_active = true;
    escrow.bump = ctx.bumps.escrow;

    accs.marketplace.listing_opened()?;

    emit!(EscrowCreated {
        escrow: escrow.key(),
        seller: escrow.seller,
        mint: escrow.mint,
        kind,
        amount,
        price,
        expires_at,
    });

    msg!(
        "escrow {} listed: amount {} price {}",
        listing_id,
        amount,
        price
    );

    Ok(())
}

/// Account validation struct for opening an escrow listing
///
/// # Account Requirements
/// * `seller` - Signer paying rent for the escrow and vault accounts
/// * `seller_token` - Seller's associated token account for `mint`
/// * `escrow` - New listing PDA `["escrow", seller, mint, listing_id]`
/// * `vault` - New associated token account owned by `escrow`
#[derive(Accounts)]
#[instruction(listing_id: u64)]
pub struct CreateEscrow<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(mut, seeds = [Marketplace::PREFIX], bump = marketplace.bump)]
    pub marketplace: Box<Account<'info, Marketplace>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = seller
    )]
    pub seller_token: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = seller,
        space = 8 + Escrow::INIT_SPACE,
        seeds = [
            Escrow::PREFIX,
            seller.key().as_ref(),
            mint.key().as_ref(),
            listing_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    #[account(
        init,
        payer = seller,
        associated_token::mint = mint,
        associated_token::authority = escrow
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_LISTING_DURATION, LAMPORTS_PER_SOL};
    use crate::models::marketplace::tests::create_test_marketplace;

    #[test]
    fn test_listing_opens_counter() {
        let mut marketplace = create_test_marketplace();

        marketplace.ensure_open().unwrap();
        check_listing(AssetKind::Nft, 1, 0, 2 * LAMPORTS_PER_SOL).unwrap();
        marketplace.listing_opened().unwrap();

        assert_eq!(marketplace.active_listings, 1);
    }

    #[test]
    fn test_default_expiry_is_one_day() {
        let expires_at = listing_expiry(1_700_000_000, None).unwrap();
        assert_eq!(expires_at - 1_700_000_000, DEFAULT_LISTING_DURATION);
    }

    #[test]
    fn test_each_listing_gets_its_own_vault() {
        let seller = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let vault_for = |listing_id: u64| {
            let (escrow, _) = Pubkey::find_program_address(
                &[
                    Escrow::PREFIX,
                    seller.as_ref(),
                    mint.as_ref(),
                    &listing_id.to_le_bytes(),
                ],
                &crate::ID,
            );
            anchor_spl::associated_token::get_associated_token_address(&escrow, &mint)
        };

        assert_eq!(vault_for(9), vault_for(9));
        assert_ne!(vault_for(9), vault_for(10));
    }
}

use crate::err::{self, SolanaLabError};
use crate::events::EscrowPurchased;
use crate::models::escrow::Escrow;
use crate::models::marketplace::Marketplace;
use crate::models::receipt::TradeReceipt;
use crate::models::TradeVenue;
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer};

impl<'info> PurchaseEscrow<'info> {
    /// Creates a CPI context for a lamport payment from the buyer
    ///
    /// Used twice per purchase: once for the seller's share and once for the
    /// treasury fee.
    ///
    /// # Returns
    /// * `CpiContext` - The context for the System Program transfer
    fn pay(
        &self,
        to: AccountInfo<'info>,
    ) -> CpiContext<'_, '_, '_, 'info, system_program::Transfer<'info>> {
        let cpi_accounts = system_program::Transfer {
            from: self.buyer.to_account_info(),
            to,
        };
        CpiContext::new(self.system_program.to_account_info(), cpi_accounts)
    }

    /// Creates a CPI context for releasing the listed tokens to the buyer
    ///
    /// The escrow PDA is the vault authority, so the caller must attach its
    /// signer seeds.
    ///
    /// # Returns
    /// * `CpiContext` - The context for the token transfer CPI
    fn send_tokens_to_buyer(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.buyer_token.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    /// Creates a CPI context for handing tokens the listing never covered
    /// back to the seller
    ///
    /// # Returns
    /// * `CpiContext` - The context for the token transfer CPI
    fn return_surplus_to_seller(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.seller_token.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    /// Returns the vault's rent to the seller once it is empty
    fn close_vault(&self) -> CpiContext<'_, '_, '_, 'info, CloseAccount<'info>> {
        let cpi_accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination: self.seller.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Buys an escrow listing in a single atomic settlement.
///
/// The buyer pays the seller `price - fee` and the treasury `fee` and receives
/// exactly the listed `amount`. Anything else found in the vault goes back to
/// the seller. The listing and its vault are closed with rent going back to
/// the seller, and a `TradeReceipt` is written under the next marketplace
/// trade index.
///
/// # Arguments
/// * `ctx` - The context containing all required accounts
/// * `max_price` - Highest price in lamports the buyer accepts
///
/// # Errors
/// * `SolanaLabError::MarketplacePaused` - If purchases are suspended
/// * `SolanaLabError::ListingExpired` - If the listing outlived its duration
/// * `SolanaLabError::CannotBuyOwnListing` - If the seller tries to buy
/// * `SolanaLabError::SlippageExceeded` - If the listing now costs more than `max_price`
/// * `SolanaLabError::InsufficientBalance` - If the buyer cannot cover the price
pub fn handle(ctx: Context<PurchaseEscrow>, max_price: u64) -> Result<()> {
    let accs = ctx.accounts;

    // Validate marketplace and listing state
    accs.marketplace.ensure_open()?;

    let now = Clock::get()?.unix_timestamp;
    accs.escrow.ensure_purchasable(&accs.buyer.key(), now, max_price)?;

    let amount = accs.escrow.amount;
    let surplus = accs.escrow.vault_surplus(accs.vault.amount)?;

    // Split the price between seller and treasury
    let settlement = accs.marketplace.settle(accs.escrow.price)?;
    if accs.buyer.lamports() < settlement.price {
        return Err(error!(SolanaLabError::InsufficientBalance));
    }

    system_program::transfer(
        accs.pay(accs.seller.to_account_info()),
        settlement.seller_amount,
    )?;
    if settlement.fee > 0 {
        system_program::transfer(accs.pay(accs.treasury.to_account_info()), settlement.fee)?;
    }

    // Create signer seeds for the escrow PDA
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

    // Deliver the listing, then empty and close the vault
    token::transfer(accs.send_tokens_to_buyer().with_signer(signer_seeds), amount)?;
    if surplus > 0 {
        token::transfer(
            accs.return_surplus_to_seller().with_signer(signer_seeds),
            surplus,
        )?;
    }
    token::close_account(accs.close_vault().with_signer(signer_seeds))?;

    // Record the trade
    let index = accs.marketplace.record_trade(settlement.price)?;
    accs.escrow.mark_closed(&mut accs.marketplace)?;

    accs.receipt.record(
        index,
        TradeVenue::Escrow,
        accs.escrow.kind,
        mint_key,
        accs.buyer.key(),
        seller_key,
        amount,
        &settlement,
        now,
        ctx.bumps.receipt,
    );

    emit!(EscrowPurchased {
        escrow: accs.escrow.key(),
        receipt_index: index,
        buyer: accs.buyer.key(),
        seller: seller_key,
        mint: mint_key,
        amount,
        price: settlement.price,
        fee: settlement.fee,
    });

    msg!(
        "escrow {} sold: price {} fee {} receipt {}",
        accs.escrow.listing_id,
        settlement.price,
        settlement.fee,
        index
    );

    Ok(())
}

/// Account validation struct for buying an escrow listing
///
/// # Account Requirements
/// * `buyer` - Signer paying the price and the receipt/ATA rent
/// * `seller` - Must match `escrow.seller`, receives proceeds and reclaimed rent
/// * `treasury` - Must match `marketplace.treasury`
/// * `escrow` - Active listing, closed to the seller at the end
/// * `vault` - Escrow-owned token account, emptied and closed
/// * `seller_token` - Seller token account of `mint`, receives any vault surplus
/// * `buyer_token` - Buyer's associated token account, created when missing
/// * `receipt` - New `TradeReceipt` at `["receipt", marketplace.total_trades]`
#[derive(Accounts)]
pub struct PurchaseEscrow<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(mut)]
    pub seller: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [Marketplace::PREFIX],
        bump = marketplace.bump,
        has_one = treasury @ err::acc("Treasury does not match marketplace")
    )]
    pub marketplace: Box<Account<'info, Marketplace>>,

    #[account(mut)]
    pub treasury: SystemAccount<'info>,

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

    #[account(
        mut,
        token::mint = mint,
        token::authority = seller
    )]
    pub seller_token: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint,
        associated_token::authority = buyer
    )]
    pub buyer_token: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = buyer,
        space = 8 + TradeReceipt::INIT_SPACE,
        seeds = [TradeReceipt::PREFIX, marketplace.total_trades.to_le_bytes().as_ref()],
        bump
    )]
    pub receipt: Box<Account<'info, TradeReceipt>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

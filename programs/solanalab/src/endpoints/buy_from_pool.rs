use crate::endpoints::get_pool_quote::quote;
use crate::err::{self, SolanaLabError};
use crate::events::PoolPurchase;
use crate::models::marketplace::Marketplace;
use crate::models::pool::TokenPool;
use crate::models::receipt::TradeReceipt;
use crate::models::{AssetKind, TradeVenue};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

impl<'info> BuyFromPool<'info> {
    /// Creates a CPI context for a lamport payment from the buyer
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

    /// Creates a CPI context for sending purchased tokens from the pool vault
    ///
    /// This helper prepares the transfer from the vault to the buyer's token
    /// account. The pool signer PDA is the authority.
    ///
    /// # Returns
    /// * `CpiContext` - The context for the token transfer CPI
    fn send_tokens_to_buyer(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.buyer_token.to_account_info(),
            authority: self.pool_signer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Buys `amount` raw units from the pool at its fixed unit price.
///
/// The buyer pays the owner `cost - fee` and the treasury `fee`, then
/// receives the tokens from the pool vault. A `TradeReceipt` is written under
/// the next marketplace trade index.
///
/// # Arguments
/// * `amount` - Raw token units to buy
/// * `max_cost` - Highest total price in lamports the buyer accepts
///
/// # Errors
/// * `SolanaLabError::MarketplacePaused` - If trading is suspended
/// * `SolanaLabError::CannotBuyOwnListing` - If the pool owner tries to buy
/// * `SolanaLabError::InsufficientLiquidity` - If the pool holds less than `amount`
/// * `SolanaLabError::PurchaseTooSmall` - If `amount` prices to zero lamports
/// * `SolanaLabError::SlippageExceeded` - If the cost is above `max_cost`
pub fn handle(ctx: Context<BuyFromPool>, amount: u64, max_cost: u64) -> Result<()> {
    let accs = ctx.accounts;

    // Validate and price the purchase
    let settlement = quote(&accs.pool, &accs.marketplace, &accs.buyer.key(), amount)?;
    require!(
        settlement.price <= max_cost,
        SolanaLabError::SlippageExceeded
    );
    if accs.buyer.lamports() < settlement.price {
        return Err(error!(SolanaLabError::InsufficientBalance));
    }

    // Pay the owner and the treasury
    system_program::transfer(accs.pay(accs.owner.to_account_info()), settlement.seller_amount)?;
    if settlement.fee > 0 {
        system_program::transfer(accs.pay(accs.treasury.to_account_info()), settlement.fee)?;
    }

    // Create signer seeds for the pool signer PDA
    let pool_key = accs.pool.key();
    let seeds = &[
        TokenPool::SIGNER_PDA_PREFIX,
        pool_key.as_ref(),
        &[ctx.bumps.pool_signer],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(accs.send_tokens_to_buyer().with_signer(signer_seeds), amount)?;
    accs.pool.withdraw(amount)?;

    // Record the trade
    let index = accs.marketplace.record_trade(settlement.price)?;
    let now = Clock::get()?.unix_timestamp;

    accs.receipt.record(
        index,
        TradeVenue::Pool,
        AssetKind::Token,
        accs.mint.key(),
        accs.buyer.key(),
        accs.owner.key(),
        amount,
        &settlement,
        now,
        ctx.bumps.receipt,
    );

    emit!(PoolPurchase {
        pool: pool_key,
        receipt_index: index,
        buyer: accs.buyer.key(),
        amount,
        price: settlement.price,
        fee: settlement.fee,
    });

    msg!(
        "pool {} sold {} for {} (fee {}), {} left",
        accs.pool.pool_id,
        amount,
        settlement.price,
        settlement.fee,
        accs.pool.total_liquidity
    );

    Ok(())
}

/// Account validation struct for buying from a pool
///
/// # Account Requirements
/// * `buyer` - Signer paying the cost plus receipt/ATA rent
/// * `owner` - Must match `pool.owner`, receives the proceeds
/// * `treasury` - Must match `marketplace.treasury`
/// * `pool_signer` - PDA `["signer", pool]` releasing vault tokens
/// * `buyer_token` - Buyer's associated token account, created when missing
/// * `receipt` - New `TradeReceipt` at `["receipt", marketplace.total_trades]`
#[derive(Accounts)]
pub struct BuyFromPool<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

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
        has_one = owner @ SolanaLabError::InvalidPoolOwner,
        has_one = mint @ SolanaLabError::InvalidTokenMints,
        has_one = vault @ err::acc("Vault does not belong to pool")
    )]
    pub pool: Box<Account<'info, TokenPool>>,

    #[account(mut)]
    pub owner: SystemAccount<'info>,

    /// CHECK: pool signer pda
    #[account(seeds = [TokenPool::SIGNER_PDA_PREFIX, pool.key().as_ref()], bump)]
    pub pool_signer: AccountInfo<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LAMPORTS_PER_SOL;
    use crate::models::marketplace::tests::create_test_marketplace;
    use crate::models::pool::tests::create_test_pool;

    #[test]
    fn test_purchase_updates_pool_and_stats() {
        let mut marketplace = create_test_marketplace();
        let mut pool = create_test_pool(6, LAMPORTS_PER_SOL);
        pool.deposit(10_000_000).unwrap();

        // 2.5 whole tokens
        let settlement = quote(&pool, &marketplace, &Pubkey::new_unique(), 2_500_000).unwrap();
        pool.withdraw(2_500_000).unwrap();
        let index = marketplace.record_trade(settlement.price).unwrap();

        assert_eq!(settlement.price, 2_500_000_000);
        assert_eq!(pool.total_liquidity, 7_500_000);
        assert_eq!(index, 0);
        assert_eq!(marketplace.total_volume, 2_500_000_000);
    }

    #[test]
    fn test_slippage_guard() {
        let marketplace = create_test_marketplace();
        let mut pool = create_test_pool(0, LAMPORTS_PER_SOL);
        pool.deposit(10).unwrap();

        let buyer = Pubkey::new_unique();
        let settlement = quote(&pool, &marketplace, &buyer, 3).unwrap();
        let max_cost = 3 * LAMPORTS_PER_SOL - 1;
        assert!(settlement.price > max_cost);

        // owner repriced upward between quote and purchase
        pool.unit_price = 2 * LAMPORTS_PER_SOL;
        let repriced = quote(&pool, &marketplace, &buyer, 3).unwrap();
        assert!(repriced.price > settlement.price);
        println!("✅ Slippage detected: {} > {}", repriced.price, settlement.price);
    }

    #[test]
    fn test_receipt_indices_are_sequential() {
        let mut marketplace = create_test_marketplace();
        let first = marketplace.record_trade(LAMPORTS_PER_SOL).unwrap();
        let second = marketplace.record_trade(LAMPORTS_PER_SOL).unwrap();

        let receipt_for = |index: u64| {
            Pubkey::find_program_address(
                &[TradeReceipt::PREFIX, &index.to_le_bytes()],
                &crate::ID,
            )
            .0
        };

        assert_eq!(second, first + 1);
        assert_ne!(receipt_for(first), receipt_for(second));
    }
}

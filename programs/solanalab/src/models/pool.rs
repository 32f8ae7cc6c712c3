use super::marketplace::Marketplace;
use crate::err::SolanaLabError;
use crate::libraries::MulDiv;
use anchor_lang::prelude::*;

/// Fixed-price pool: providers deposit tokens, buyers pay `unit_price`
/// lamports per whole token to the pool owner.
#[account]
#[derive(InitSpace)]
pub struct TokenPool {
    /// Receives sale proceeds and may withdraw liquidity
    pub owner: Pubkey,
    pub mint: Pubkey,
    /// Owner-chosen id, part of the PDA seeds
    pub pool_id: u64,
    /// Associated token account of the pool signer PDA
    pub vault: Pubkey,
    /// Lamports per whole token (10^decimals raw units)
    pub unit_price: u64,
    pub decimals: u8,
    /// Raw units available for sale
    pub total_liquidity: u64,
    pub created_at: i64,
    /// Owner switch that suspends deposits and sales
    pub is_active: bool,
    pub bump: u8,
}

impl TokenPool {
    pub const POOL_PREFIX: &'static [u8; 4] = b"pool";
    pub const SIGNER_PDA_PREFIX: &'static [u8; 6] = b"signer";

    pub fn ensure_active(&self) -> Result<()> {
        if !self.is_active {
            return Err(error!(SolanaLabError::PoolNotActive));
        }
        Ok(())
    }

    /// Lamports owed for `amount` raw units, rounded up in the seller's favour
    pub fn purchase_cost(&self, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Err(error!(SolanaLabError::NoZeroTokens));
        }
        let one_token = 10u64
            .checked_pow(self.decimals as u32)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        let cost = self
            .unit_price
            .mul_div_ceil(amount, one_token)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;

        if cost == 0 {
            return Err(error!(SolanaLabError::PurchaseTooSmall));
        }
        Ok(cost)
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(error!(SolanaLabError::NoZeroTokens));
        }
        self.total_liquidity = self
            .total_liquidity
            .checked_add(amount)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(error!(SolanaLabError::NoZeroTokens));
        }
        if amount > self.total_liquidity {
            return Err(error!(SolanaLabError::InsufficientLiquidity));
        }
        self.total_liquidity -= amount;
        Ok(())
    }

    /// Deactivates the pool, zeroes its liquidity and frees its slot in the
    /// marketplace statistics. Returns the liquidity that was still booked.
    pub fn wind_down(&mut self, marketplace: &mut Marketplace) -> Result<u64> {
        marketplace.pool_closed()?;
        let booked = self.total_liquidity;
        self.total_liquidity = 0;
        self.is_active = false;
        Ok(booked)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::consts::LAMPORTS_PER_SOL;

    pub fn create_test_pool(decimals: u8, unit_price: u64) -> TokenPool {
        TokenPool {
            owner: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            pool_id: 1,
            vault: Pubkey::new_unique(),
            unit_price,
            decimals,
            total_liquidity: 0,
            created_at: 0,
            is_active: true,
            bump: 253,
        }
    }

    #[test]
    fn test_cost_of_whole_tokens() {
        // 0.01 SOL per token, 9 decimals
        let pool = create_test_pool(9, LAMPORTS_PER_SOL / 100);
        let cost = pool.purchase_cost(3 * 1_000_000_000).unwrap();
        assert_eq!(cost, 30_000_000);
    }

    #[test]
    fn test_cost_of_fractional_amount_rounds_up() {
        // 1 lamport per token, half a token still costs a lamport
        let pool = create_test_pool(2, 1);
        assert_eq!(pool.purchase_cost(50).unwrap(), 1);
        assert_eq!(pool.purchase_cost(101).unwrap(), 2);
    }

    #[test]
    fn test_zero_decimal_mint_prices_per_unit() {
        let pool = create_test_pool(0, 5_000_000);
        assert_eq!(pool.purchase_cost(4).unwrap(), 20_000_000);
    }

    #[test]
    #[should_panic(expected = "NoZeroTokens")]
    fn test_zero_amount_has_no_cost() {
        let pool = create_test_pool(9, LAMPORTS_PER_SOL);
        pool.purchase_cost(0).unwrap();
    }

    #[test]
    #[should_panic(expected = "MathOverflow")]
    fn test_unrepresentable_decimals() {
        let pool = create_test_pool(20, LAMPORTS_PER_SOL);
        pool.purchase_cost(1).unwrap();
    }

    #[test]
    fn test_liquidity_accounting() {
        let mut pool = create_test_pool(6, LAMPORTS_PER_SOL);

        pool.deposit(1_000).unwrap();
        pool.deposit(500).unwrap();
        assert_eq!(pool.total_liquidity, 1_500);

        pool.withdraw(1_200).unwrap();
        assert_eq!(pool.total_liquidity, 300);

        assert!(pool.withdraw(301).is_err());
        assert_eq!(pool.total_liquidity, 300);
    }

    #[test]
    #[should_panic(expected = "PoolNotActive")]
    fn test_inactive_pool() {
        let mut pool = create_test_pool(6, LAMPORTS_PER_SOL);
        pool.is_active = false;
        pool.ensure_active().unwrap();
    }

    #[test]
    fn test_wind_down() {
        let mut marketplace = crate::models::marketplace::tests::create_test_marketplace();
        marketplace.pool_opened().unwrap();
        let mut pool = create_test_pool(6, LAMPORTS_PER_SOL);
        pool.deposit(42).unwrap();

        assert_eq!(pool.wind_down(&mut marketplace).unwrap(), 42);

        assert_eq!(pool.total_liquidity, 0);
        assert_eq!(marketplace.active_pools, 0);
        assert!(pool.ensure_active().is_err());
        assert!(pool.withdraw(1).is_err());
    }

    #[test]
    fn test_pool_signer_derivation() {
        let pool_key = Pubkey::new_unique();
        let (signer, bump) = Pubkey::find_program_address(
            &[TokenPool::SIGNER_PDA_PREFIX, pool_key.as_ref()],
            &crate::ID,
        );
        let expected = Pubkey::create_program_address(
            &[TokenPool::SIGNER_PDA_PREFIX, pool_key.as_ref(), &[bump]],
            &crate::ID,
        )
        .unwrap();
        assert_eq!(signer, expected);
    }
}

use super::fees::{check_fee_bps, Settlement};
use crate::err::SolanaLabError;
use anchor_lang::prelude::*;

/// Global marketplace configuration and running statistics
#[account]
#[derive(InitSpace)]
pub struct Marketplace {
    /// Wallet allowed to change fees, treasury and the pause flag
    pub authority: Pubkey,
    /// Wallet receiving the marketplace fee on every trade
    pub treasury: Pubkey,
    /// Fee in basis points of the sale price
    pub fee_bps: u16,
    /// Blocks new listings, pools, deposits and purchases
    pub paused: bool,
    /// Escrow listings currently holding tokens
    pub active_listings: u64,
    /// Pools currently open
    pub active_pools: u64,
    /// Completed trades, also the index of the next receipt
    pub total_trades: u64,
    /// Lamports paid by buyers across all trades
    pub total_volume: u64,
    pub bump: u8,
}

impl Marketplace {
    pub const PREFIX: &'static [u8; 11] = b"marketplace";

    /// Fresh configuration with zeroed statistics
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        treasury: Pubkey,
        fee_bps: u16,
        bump: u8,
    ) -> Result<()> {
        check_fee_bps(fee_bps)?;

        self.authority = authority;
        self.treasury = treasury;
        self.fee_bps = fee_bps;
        self.paused = false;
        self.active_listings = 0;
        self.active_pools = 0;
        self.total_trades = 0;
        self.total_volume = 0;
        self.bump = bump;
        Ok(())
    }

    /// Applies the provided settings. Nothing changes if the fee is out of range.
    pub fn apply_update(
        &mut self,
        fee_bps: Option<u16>,
        treasury: Option<Pubkey>,
        paused: Option<bool>,
    ) -> Result<()> {
        if let Some(fee_bps) = fee_bps {
            check_fee_bps(fee_bps)?;
            self.fee_bps = fee_bps;
        }
        if let Some(treasury) = treasury {
            self.treasury = treasury;
        }
        if let Some(paused) = paused {
            self.paused = paused;
        }
        Ok(())
    }

    pub fn ensure_open(&self) -> Result<()> {
        if self.paused {
            return Err(error!(SolanaLabError::MarketplacePaused));
        }
        Ok(())
    }

    pub fn settle(&self, price: u64) -> Result<Settlement> {
        Settlement::split(price, self.fee_bps)
    }

    pub fn listing_opened(&mut self) -> Result<()> {
        self.active_listings = self
            .active_listings
            .checked_add(1)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(())
    }

    pub fn listing_closed(&mut self) -> Result<()> {
        self.active_listings = self
            .active_listings
            .checked_sub(1)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(())
    }

    pub fn pool_opened(&mut self) -> Result<()> {
        self.active_pools = self
            .active_pools
            .checked_add(1)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(())
    }

    pub fn pool_closed(&mut self) -> Result<()> {
        self.active_pools = self
            .active_pools
            .checked_sub(1)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(())
    }

    /// Counts a settled trade and returns the receipt index it was stored under
    pub fn record_trade(&mut self, price: u64) -> Result<u64> {
        let index = self.total_trades;
        self.total_trades = index
            .checked_add(1)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        self.total_volume = self
            .total_volume
            .checked_add(price)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(index)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::consts::DEFAULT_FEE_BPS;

    pub fn create_test_marketplace() -> Marketplace {
        Marketplace {
            authority: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            fee_bps: DEFAULT_FEE_BPS,
            paused: false,
            active_listings: 0,
            active_pools: 0,
            total_trades: 0,
            total_volume: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_record_trade_returns_sequential_indexes() {
        let mut marketplace = create_test_marketplace();

        assert_eq!(marketplace.record_trade(100).unwrap(), 0);
        assert_eq!(marketplace.record_trade(250).unwrap(), 1);

        assert_eq!(marketplace.total_trades, 2);
        assert_eq!(marketplace.total_volume, 350);
    }

    #[test]
    fn test_volume_overflow_is_rejected() {
        let mut marketplace = create_test_marketplace();
        marketplace.total_volume = u64::MAX;

        assert!(marketplace.record_trade(1).is_err());
    }

    #[test]
    fn test_listing_counter_never_underflows() {
        let mut marketplace = create_test_marketplace();

        marketplace.listing_opened().unwrap();
        marketplace.listing_closed().unwrap();
        assert_eq!(marketplace.active_listings, 0);
        assert!(marketplace.listing_closed().is_err());
        assert!(marketplace.pool_closed().is_err());
    }

    #[test]
    #[should_panic(expected = "MarketplacePaused")]
    fn test_paused_marketplace_rejects() {
        let mut marketplace = create_test_marketplace();
        marketplace.paused = true;
        marketplace.ensure_open().unwrap();
    }

    #[test]
    fn test_marketplace_pda_is_singleton() {
        let (a, _) = Pubkey::find_program_address(&[Marketplace::PREFIX], &crate::ID);
        let (b, _) = Pubkey::find_program_address(&[b"marketplace"], &crate::ID);
        assert_eq!(a, b);
    }
}

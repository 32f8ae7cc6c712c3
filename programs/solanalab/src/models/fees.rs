use crate::consts::{BPS_DENOMINATOR, MAX_FEE_BPS};
use crate::err::SolanaLabError;
use crate::libraries::MulDiv;
use anchor_lang::prelude::*;

/// How a sale price is divided between the seller and the treasury
#[derive(AnchorDeserialize, AnchorSerialize, Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Settlement {
    /// Total lamports paid by the buyer
    pub price: u64,
    /// Lamports routed to the marketplace treasury
    pub fee: u64,
    /// Lamports routed to the seller
    pub seller_amount: u64,
}

impl Settlement {
    pub fn split(price: u64, fee_bps: u16) -> Result<Self> {
        let fee = get_fee_amount(price, fee_bps)?;
        let seller_amount = price
            .checked_sub(fee)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;

        Ok(Settlement {
            price,
            fee,
            seller_amount,
        })
    }
}

/// Fee rounds down so the seller never receives less than `price * (1 - fee)`
pub fn get_fee_amount(price: u64, fee_bps: u16) -> Result<u64> {
    price
        .mul_div_floor(fee_bps as u64, BPS_DENOMINATOR)
        .ok_or_else(|| error!(SolanaLabError::MathOverflow))
}

pub fn check_fee_bps(fee_bps: u16) -> Result<()> {
    if fee_bps > MAX_FEE_BPS {
        return Err(error!(SolanaLabError::FeeTooHigh));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_FEE_BPS, LAMPORTS_PER_SOL};

    #[test]
    fn test_default_fee_on_one_sol() {
        let settlement = Settlement::split(LAMPORTS_PER_SOL, DEFAULT_FEE_BPS).unwrap();

        // 2.5% of 1 SOL
        assert_eq!(settlement.fee, 25_000_000);
        assert_eq!(settlement.seller_amount, 975_000_000);
        assert_eq!(settlement.fee + settlement.seller_amount, settlement.price);
    }

    #[test]
    fn test_fee_rounds_down() {
        // 2.5% of 39 lamports is 0.975
        let settlement = Settlement::split(39, DEFAULT_FEE_BPS).unwrap();
        assert_eq!(settlement.fee, 0);
        assert_eq!(settlement.seller_amount, 39);
    }

    #[test]
    fn test_zero_fee() {
        let settlement = Settlement::split(1_234_567, 0).unwrap();
        assert_eq!(settlement.fee, 0);
        assert_eq!(settlement.seller_amount, 1_234_567);
    }

    #[test]
    fn test_fee_on_max_u64_does_not_overflow() {
        let settlement = Settlement::split(u64::MAX, MAX_FEE_BPS).unwrap();
        assert_eq!(settlement.fee, u64::MAX / 10);
        assert_eq!(settlement.fee + settlement.seller_amount, u64::MAX);
    }

    #[test]
    fn test_fee_bounds() {
        assert!(check_fee_bps(0).is_ok());
        assert!(check_fee_bps(MAX_FEE_BPS).is_ok());
        assert!(check_fee_bps(MAX_FEE_BPS + 1).is_err());
    }
}

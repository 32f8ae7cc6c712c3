use super::fees::Settlement;
use super::{AssetKind, TradeVenue};
use anchor_lang::prelude::*;

/// Record of a settled trade. Only written inside the settling instruction,
/// so every receipt describes a completed sale.
#[account]
#[derive(InitSpace)]
pub struct TradeReceipt {
    pub index: u64,
    pub venue: TradeVenue,
    pub kind: AssetKind,
    pub mint: Pubkey,
    pub buyer: Pubkey,
    pub seller: Pubkey,
    /// Raw token units delivered
    pub amount: u64,
    /// Lamports paid by the buyer
    pub price: u64,
    /// Part of `price` routed to the treasury
    pub fee: u64,
    pub timestamp: i64,
    pub bump: u8,
}

impl TradeReceipt {
    pub const PREFIX: &'static [u8; 7] = b"receipt";

    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        index: u64,
        venue: TradeVenue,
        kind: AssetKind,
        mint: Pubkey,
        buyer: Pubkey,
        seller: Pubkey,
        amount: u64,
        settlement: &Settlement,
        timestamp: i64,
        bump: u8,
    ) {
        self.index = index;
        self.venue = venue;
        self.kind = kind;
        self.mint = mint;
        self.buyer = buyer;
        self.seller = seller;
        self.amount = amount;
        self.price = settlement.price;
        self.fee = settlement.fee;
        self.timestamp = timestamp;
        self.bump = bump;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_pda_follows_trade_index() {
        let (first, _) =
            Pubkey::find_program_address(&[TradeReceipt::PREFIX, &0u64.to_le_bytes()], &crate::ID);
        let (second, _) =
            Pubkey::find_program_address(&[TradeReceipt::PREFIX, &1u64.to_le_bytes()], &crate::ID);
        assert_ne!(first, second);
    }

    #[test]
    fn test_record_copies_settlement() {
        let settlement = Settlement::split(2_000_000, 250).unwrap();
        let mut receipt = TradeReceipt {
            index: 0,
            venue: TradeVenue::Escrow,
            kind: AssetKind::Token,
            mint: Pubkey::default(),
            buyer: Pubkey::default(),
            seller: Pubkey::default(),
            amount: 0,
            price: 0,
            fee: 0,
            timestamp: 0,
            bump: 0,
        };

        let buyer = Pubkey::new_unique();
        receipt.record(
            3,
            TradeVenue::Pool,
            AssetKind::Token,
            Pubkey::new_unique(),
            buyer,
            Pubkey::new_unique(),
            42,
            &settlement,
            1_700_000_000,
            251,
        );

        assert_eq!(receipt.index, 3);
        assert_eq!(receipt.venue, TradeVenue::Pool);
        assert_eq!(receipt.buyer, buyer);
        assert_eq!(receipt.price, 2_000_000);
        assert_eq!(receipt.fee, 50_000);
    }
}

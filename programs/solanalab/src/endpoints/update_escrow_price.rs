use crate::err::SolanaLabError;
use crate::events::EscrowRepriced;
use crate::models::escrow::Escrow;
use anchor_lang::prelude::*;

/// Reprices an open listing. A new `duration` restarts the listing clock
/// from now, `None` keeps the current expiry.
pub fn handle(ctx: Context<UpdateEscrowPrice>, price: u64, duration: Option<i64>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let escrow = &mut ctx.accounts.escrow;
    escrow.reprice(price, duration, now)?;

    emit!(EscrowRepriced {
        escrow: escrow.key(),
        price,
        expires_at: escrow.expires_at,
    });

    msg!(
        "escrow {} repriced to {} until {}",
        escrow.listing_id,
        price,
        escrow.expires_at
    );

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateEscrowPrice<'info> {
    pub seller: Signer<'info>,

    #[account(
        mut,
        has_one = seller @ SolanaLabError::InvalidSeller,
        constraint = escrow.is_active @ SolanaLabError::ListingNotActive
    )]
    pub escrow: Account<'info, Escrow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LAMPORTS_PER_SOL, MAX_LISTING_DURATION, MIN_PRICE_LAMPORTS};
    use crate::models::escrow::tests::create_test_escrow;
    use crate::models::AssetKind;

    #[test]
    fn test_relist_expired_listing() {
        let mut escrow = create_test_escrow(AssetKind::Nft, 1);
        let now = escrow.expires_at + 10;

        escrow.reprice(escrow.price, Some(3_600), now).unwrap();

        let buyer = Pubkey::new_unique();
        assert!(escrow.ensure_purchasable(&buyer, now, escrow.price).is_ok());
        println!("✅ Relisted until {}", escrow.expires_at);
    }

    #[test]
    #[should_panic(expected = "InvalidPrice")]
    fn test_reprice_below_minimum() {
        let mut escrow = create_test_escrow(AssetKind::Token, 100);
        escrow
            .reprice(MIN_PRICE_LAMPORTS - 1, None, escrow.created_at)
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "InvalidDuration")]
    fn test_reprice_beyond_max_duration() {
        let mut escrow = create_test_escrow(AssetKind::Token, 100);
        escrow
            .reprice(LAMPORTS_PER_SOL, Some(MAX_LISTING_DURATION + 1), escrow.created_at)
            .unwrap();
    }
}

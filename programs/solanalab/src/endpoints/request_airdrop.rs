use crate::err::SolanaLabError;
use crate::events::AirdropSent;
use crate::models::faucet::{AirdropTicket, Faucet};
use anchor_lang::prelude::*;

/// Sends `lamports` from the faucet reserve to `recipient`.
///
/// The faucet is program owned, so lamports are moved directly instead of
/// through a System transfer. The reserve never drops below its rent-exempt
/// minimum. `payer` only covers the ticket rent, letting an empty wallet be
/// funded by anyone.
///
/// # Errors
/// * `SolanaLabError::AirdropTooLarge` - If `lamports` exceeds `max_per_request`
/// * `SolanaLabError::AirdropCooldown` - If the recipient claimed too recently
/// * `SolanaLabError::FaucetDry` - If the reserve cannot cover the request
/// * `SolanaLabError::AirdropBelowRent` - If an empty wallet would end up
///   below the rent-exempt minimum
pub fn handle(ctx: Context<RequestAirdrop>, lamports: u64) -> Result<()> {
    let accs = ctx.accounts;

    let faucet_info = accs.faucet.to_account_info();
    let recipient_info = accs.recipient.to_account_info();

    // Validate the request against the reserve and the recipient's rent
    let rent = Rent::get()?;
    let available = Faucet::available(
        faucet_info.lamports(),
        rent.minimum_balance(faucet_info.data_len()),
    );
    accs.faucet.check_request(lamports, available)?;
    Faucet::check_recipient_rent(recipient_info.lamports(), lamports, rent.minimum_balance(0))?;

    // Enforce the per-recipient cooldown
    let now = Clock::get()?.unix_timestamp;
    let ticket = &mut accs.ticket;
    if ticket.recipient == Pubkey::default() {
        ticket.recipient = recipient_info.key();
        ticket.bump = ctx.bumps.ticket;
    }
    ticket.claim(now, accs.faucet.cooldown, lamports)?;

    // Move lamports directly, the faucet is program owned
    let faucet_balance = faucet_info
        .lamports()
        .checked_sub(lamports)
        .ok_or_else(|| error!(SolanaLabError::FaucetDry))?;
    let recipient_balance = recipient_info
        .lamports()
        .checked_add(lamports)
        .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
    **faucet_info.try_borrow_mut_lamports()? = faucet_balance;
    **recipient_info.try_borrow_mut_lamports()? = recipient_balance;

    accs.faucet.dispensed(lamports)?;

    emit!(AirdropSent {
        recipient: recipient_info.key(),
        lamports,
    });

    msg!(
        "airdropped {} lamports to {}, {} dispensed so far",
        lamports,
        recipient_info.key(),
        accs.faucet.total_dispensed
    );

    Ok(())
}

#[derive(Accounts)]
pub struct RequestAirdrop<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut)]
    pub recipient: SystemAccount<'info>,

    #[account(mut, seeds = [Faucet::PREFIX], bump = faucet.bump)]
    pub faucet: Account<'info, Faucet>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + AirdropTicket::INIT_SPACE,
        seeds = [AirdropTicket::PREFIX, recipient.key().as_ref()],
        bump
    )]
    pub ticket: Account<'info, AirdropTicket>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_AIRDROP_COOLDOWN, DEFAULT_AIRDROP_LAMPORTS, LAMPORTS_PER_SOL};

    fn create_test_faucet() -> Faucet {
        Faucet {
            authority: Pubkey::new_unique(),
            max_per_request: DEFAULT_AIRDROP_LAMPORTS,
            cooldown: DEFAULT_AIRDROP_COOLDOWN,
            total_dispensed: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_one_sol_airdrop() {
        let mut faucet = create_test_faucet();
        let mut ticket = AirdropTicket {
            recipient: Pubkey::new_unique(),
            last_claim: 0,
            total_received: 0,
            bump: 255,
        };

        let available = Faucet::available(10 * LAMPORTS_PER_SOL, 1_000_000);
        faucet.check_request(LAMPORTS_PER_SOL, available).unwrap();
        ticket.claim(1_700_000_000, faucet.cooldown, LAMPORTS_PER_SOL).unwrap();
        faucet.dispensed(LAMPORTS_PER_SOL).unwrap();

        assert_eq!(faucet.total_dispensed, LAMPORTS_PER_SOL);
        assert_eq!(ticket.total_received, LAMPORTS_PER_SOL);
        println!("✅ Airdropped {} lamports", ticket.total_received);
    }

    #[test]
    #[should_panic(expected = "AirdropCooldown")]
    fn test_second_request_within_cooldown() {
        let faucet = create_test_faucet();
        let mut ticket = AirdropTicket {
            recipient: Pubkey::new_unique(),
            last_claim: 0,
            total_received: 0,
            bump: 255,
        };

        ticket.claim(1_000, faucet.cooldown, 1).unwrap();
        ticket.claim(1_000 + faucet.cooldown - 1, faucet.cooldown, 1).unwrap();
    }

    #[test]
    #[should_panic(expected = "AirdropTooLarge")]
    fn test_request_above_limit() {
        let faucet = create_test_faucet();
        faucet
            .check_request(2 * LAMPORTS_PER_SOL, 100 * LAMPORTS_PER_SOL)
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "AirdropBelowRent")]
    fn test_dust_request_for_new_wallet() {
        let faucet = create_test_faucet();
        let rent_exempt_minimum = 890_880;

        faucet.check_request(10_000, 10 * LAMPORTS_PER_SOL).unwrap();
        Faucet::check_recipient_rent(0, 10_000, rent_exempt_minimum).unwrap();
    }

    #[test]
    fn test_dust_request_for_funded_wallet() {
        let rent_exempt_minimum = 890_880;
        assert!(Faucet::check_recipient_rent(LAMPORTS_PER_SOL, 10_000, rent_exempt_minimum).is_ok());
    }

    #[test]
    fn test_ticket_pda_per_recipient() {
        let ticket_for = |recipient: &Pubkey| {
            Pubkey::find_program_address(&[AirdropTicket::PREFIX, recipient.as_ref()], &crate::ID).0
        };
        let first = Pubkey::new_unique();
        assert_eq!(ticket_for(&first), ticket_for(&first));
        assert_ne!(ticket_for(&first), ticket_for(&Pubkey::new_unique()));
    }
}

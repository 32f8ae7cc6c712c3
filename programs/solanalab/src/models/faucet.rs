use crate::consts::MAX_AIRDROP_LAMPORTS;
use crate::err::SolanaLabError;
use anchor_lang::prelude::*;

/// Program-owned lamport reserve handing out devnet SOL
#[account]
#[derive(InitSpace)]
pub struct Faucet {
    pub authority: Pubkey,
    pub max_per_request: u64,
    /// Seconds a recipient waits between airdrops
    pub cooldown: i64,
    pub total_dispensed: u64,
    pub bump: u8,
}

/// Per-recipient airdrop history
#[account]
#[derive(InitSpace)]
pub struct AirdropTicket {
    pub recipient: Pubkey,
    /// Zero until the first airdrop
    pub last_claim: i64,
    pub total_received: u64,
    pub bump: u8,
}

impl Faucet {
    pub const PREFIX: &'static [u8; 6] = b"faucet";

    pub fn check_limits(max_per_request: u64, cooldown: i64) -> Result<()> {
        if max_per_request == 0 || max_per_request > MAX_AIRDROP_LAMPORTS {
            return Err(error!(SolanaLabError::AirdropTooLarge));
        }
        if cooldown < 0 {
            return Err(error!(SolanaLabError::InvalidDuration));
        }
        Ok(())
    }

    /// Lamports that can leave the faucet without dropping below rent exemption
    pub fn available(balance: u64, rent_exempt_minimum: u64) -> u64 {
        balance.saturating_sub(rent_exempt_minimum)
    }

    pub fn check_request(&self, lamports: u64, available: u64) -> Result<()> {
        if lamports == 0 {
            return Err(error!(SolanaLabError::NoZeroTokens));
        }
        if lamports > self.max_per_request {
            return Err(error!(SolanaLabError::AirdropTooLarge));
        }
        if lamports > available {
            return Err(error!(SolanaLabError::FaucetDry));
        }
        Ok(())
    }

    pub fn check_funding(lamports: u64, funder_balance: u64) -> Result<()> {
        if lamports == 0 {
            return Err(error!(SolanaLabError::NoZeroTokens));
        }
        if lamports > funder_balance {
            return Err(error!(SolanaLabError::InsufficientBalance));
        }
        Ok(())
    }

    /// The runtime rejects crediting a wallet that would still sit below the
    /// rent-exempt minimum of an empty account
    pub fn check_recipient_rent(
        recipient_balance: u64,
        lamports: u64,
        rent_exempt_minimum: u64,
    ) -> Result<()> {
        let after = recipient_balance
            .checked_add(lamports)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        if after < rent_exempt_minimum {
            return Err(error!(SolanaLabError::AirdropBelowRent));
        }
        Ok(())
    }

    pub fn dispensed(&mut self, lamports: u64) -> Result<()> {
        self.total_dispensed = self
            .total_dispensed
            .checked_add(lamports)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(())
    }
}

impl AirdropTicket {
    pub const PREFIX: &'static [u8; 7] = b"airdrop";

    pub fn claim(&mut self, now: i64, cooldown: i64, lamports: u64) -> Result<()> {
        if self.last_claim != 0 && now < self.last_claim.saturating_add(cooldown) {
            return Err(error!(SolanaLabError::AirdropCooldown));
        }
        self.last_claim = now;
        self.total_received = self
            .total_received
            .checked_add(lamports)
            .ok_or_else(|| error!(SolanaLabError::MathOverflow))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_AIRDROP_COOLDOWN, DEFAULT_AIRDROP_LAMPORTS};

    fn create_test_faucet() -> Faucet {
        Faucet {
            authority: Pubkey::new_unique(),
            max_per_request: DEFAULT_AIRDROP_LAMPORTS,
            cooldown: DEFAULT_AIRDROP_COOLDOWN,
            total_dispensed: 0,
            bump: 255,
        }
    }

    fn fresh_ticket() -> AirdropTicket {
        AirdropTicket {
            recipient: Pubkey::new_unique(),
            last_claim: 0,
            total_received: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_first_claim_is_always_allowed() {
        let mut ticket = fresh_ticket();
        ticket.claim(10, DEFAULT_AIRDROP_COOLDOWN, 5).unwrap();
        assert_eq!(ticket.last_claim, 10);
        assert_eq!(ticket.total_received, 5);
    }

    #[test]
    fn test_cooldown_between_claims() {
        let mut ticket = fresh_ticket();
        ticket.claim(1_000, 60, 1).unwrap();

        assert!(ticket.claim(1_059, 60, 1).is_err());
        assert_eq!(ticket.total_received, 1);

        ticket.claim(1_060, 60, 1).unwrap();
        assert_eq!(ticket.total_received, 2);
    }

    #[test]
    fn test_request_limits() {
        let faucet = create_test_faucet();
        let plenty = 100 * DEFAULT_AIRDROP_LAMPORTS;

        assert!(faucet.check_request(DEFAULT_AIRDROP_LAMPORTS, plenty).is_ok());
        assert!(faucet.check_request(0, plenty).is_err());
        assert!(faucet
            .check_request(DEFAULT_AIRDROP_LAMPORTS + 1, plenty)
            .is_err());
    }

    #[test]
    #[should_panic(expected = "FaucetDry")]
    fn test_faucet_keeps_rent_reserve() {
        let faucet = create_test_faucet();
        let available = Faucet::available(DEFAULT_AIRDROP_LAMPORTS, 1_000_000);
        faucet
            .check_request(DEFAULT_AIRDROP_LAMPORTS, available)
            .unwrap();
    }

    #[test]
    fn test_funding() {
        assert!(Faucet::check_funding(DEFAULT_AIRDROP_LAMPORTS, DEFAULT_AIRDROP_LAMPORTS).is_ok());
        assert!(Faucet::check_funding(0, DEFAULT_AIRDROP_LAMPORTS).is_err());
        assert!(Faucet::check_funding(DEFAULT_AIRDROP_LAMPORTS + 1, DEFAULT_AIRDROP_LAMPORTS).is_err());
    }

    #[test]
    fn test_recipient_rent() {
        // rent-exempt minimum of a 0-byte account
        let rent_exempt_minimum = 890_880;

        assert!(Faucet::check_recipient_rent(0, rent_exempt_minimum, rent_exempt_minimum).is_ok());
        assert!(Faucet::check_recipient_rent(rent_exempt_minimum, 1, rent_exempt_minimum).is_ok());
        assert!(Faucet::check_recipient_rent(u64::MAX, 1, rent_exempt_minimum).is_err());
    }

    #[test]
    #[should_panic(expected = "AirdropBelowRent")]
    fn test_dust_airdrop_to_empty_wallet() {
        Faucet::check_recipient_rent(0, 1_000, 890_880).unwrap();
    }

    #[test]
    fn test_limit_configuration() {
        assert!(Faucet::check_limits(DEFAULT_AIRDROP_LAMPORTS, 0).is_ok());
        assert!(Faucet::check_limits(0, 60).is_err());
        assert!(Faucet::check_limits(MAX_AIRDROP_LAMPORTS + 1, 60).is_err());
        assert!(Faucet::check_limits(DEFAULT_AIRDROP_LAMPORTS, -1).is_err());
    }
}

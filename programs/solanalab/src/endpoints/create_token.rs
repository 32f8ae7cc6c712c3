use crate::events::TokenCreated;
use crate::models::token_metadata::check_metadata;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::metadata::mpl_token_metadata::types::DataV2;
use anchor_spl::metadata::{create_metadata_accounts_v3, CreateMetadataAccountsV3, Metadata};
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

impl<'info> CreateToken<'info> {
    fn create_metadata_ctx(
        &self,
    ) -> CpiContext<'_, '_, '_, 'info, CreateMetadataAccountsV3<'info>> {
        let cpi_accounts = CreateMetadataAccountsV3 {
            metadata: self.metadata.to_account_info(),
            mint: self.mint.to_account_info(),
            mint_authority: self.payer.to_account_info(),
            payer: self.payer.to_account_info(),
            update_authority: self.payer.to_account_info(),
            system_program: self.system_program.to_account_info(),
            rent: self.rent.to_account_info(),
        };
        CpiContext::new(self.token_metadata_program.to_account_info(), cpi_accounts)
    }

    fn mint_initial_supply_ctx(&self) -> CpiContext<'_, '_, '_, 'info, MintTo<'info>> {
        let cpi_accounts = MintTo {
            mint: self.mint.to_account_info(),
            to: self.payer_token.to_account_info(),
            authority: self.payer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}

/// Creates a fungible mint with immutable metadata.
///
/// The payer becomes mint and freeze authority. `initial_supply` raw units
/// are minted to the payer's associated token account when non-zero.
///
/// # Arguments
/// * `decimals` - Mint decimals
/// * `name` - Token name (at most 32 bytes)
/// * `symbol` - Token symbol (at most 10 bytes)
/// * `uri` - Off-chain JSON metadata location
/// * `initial_supply` - Raw units minted to the creator, may be zero
pub fn handle(
    ctx: Context<CreateToken>,
    decimals: u8,
    name: String,
    symbol: String,
    uri: String,
    initial_supply: u64,
) -> Result<()> {
    check_metadata(&name, &symbol, &uri)?;

    let accs = ctx.accounts;

    let data = DataV2 {
        name,
        symbol,
        uri,
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    };
    create_metadata_accounts_v3(accs.create_metadata_ctx(), data, false, true, None)?;

    if initial_supply > 0 {
        token::mint_to(accs.mint_initial_supply_ctx(), initial_supply)?;
    }

    emit!(TokenCreated {
        mint: accs.mint.key(),
        authority: accs.payer.key(),
        decimals,
        initial_supply,
    });

    msg!(
        "token {} created: decimals {} supply {}",
        accs.mint.key(),
        decimals,
        initial_supply
    );

    Ok(())
}

#[derive(Accounts)]
#[instruction(decimals: u8)]
pub struct CreateToken<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        mint::decimals = decimals,
        mint::authority = payer,
        mint::freeze_authority = payer
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: created by the token metadata program
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key()
    )]
    pub metadata: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = payer
    )]
    pub payer_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_pda_depends_on_mint() {
        let program = Metadata::id();
        let metadata_for = |mint: &Pubkey| {
            Pubkey::find_program_address(&[b"metadata", program.as_ref(), mint.as_ref()], &program)
                .0
        };

        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        assert_ne!(metadata_for(&first), metadata_for(&second));
    }

    #[test]
    fn test_token_metadata_with_gateway_uri() {
        assert!(check_metadata("My Token", "MTK", "https://gateway.pinata.cloud/ipfs/Qm").is_ok());
    }

    #[test]
    #[should_panic(expected = "InvalidUri")]
    fn test_token_requires_uri() {
        check_metadata("My Token", "MTK", "").unwrap();
    }
}

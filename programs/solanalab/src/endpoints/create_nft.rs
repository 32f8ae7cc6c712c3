use crate::consts::NFT_DECIMALS;
use crate::events::NftCreated;
use crate::models::token_metadata::{check_metadata, clamp_royalty};
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::metadata::mpl_token_metadata::types::{Creator, DataV2};
use anchor_spl::metadata::{
    create_master_edition_v3, create_metadata_accounts_v3, CreateMasterEditionV3,
    CreateMetadataAccountsV3, Metadata,
};
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

impl<'info> CreateNft<'info> {
    fn mint_one_ctx(&self) -> CpiContext<'_, '_, '_, 'info, MintTo<'info>> {
        let cpi_accounts = MintTo {
            mint: self.mint.to_account_info(),
            to: self.creator_token.to_account_info(),
            authority: self.creator.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    fn create_metadata_ctx(
        &self,
    ) -> CpiContext<'_, '_, '_, 'info, CreateMetadataAccountsV3<'info>> {
        let cpi_accounts = CreateMetadataAccountsV3 {
            metadata: self.metadata.to_account_info(),
            mint: self.mint.to_account_info(),
            mint_authority: self.creator.to_account_info(),
            payer: self.creator.to_account_info(),
            update_authority: self.creator.to_account_info(),
            system_program: self.system_program.to_account_info(),
            rent: self.rent.to_account_info(),
        };
        CpiContext::new(self.token_metadata_program.to_account_info(), cpi_accounts)
    }

    /// Takes over mint authority, fixing the supply at one
    fn create_master_edition_ctx(
        &self,
    ) -> CpiContext<'_, '_, '_, 'info, CreateMasterEditionV3<'info>> {
        let cpi_accounts = CreateMasterEditionV3 {
            edition: self.master_edition.to_account_info(),
            mint: self.mint.to_account_info(),
            update_authority: self.creator.to_account_info(),
            mint_authority: self.creator.to_account_info(),
            payer: self.creator.to_account_info(),
            metadata: self.metadata.to_account_info(),
            token_program: self.token_program.to_account_info(),
            system_program: self.system_program.to_account_info(),
            rent: self.rent.to_account_info(),
        };
        CpiContext::new(self.token_metadata_program.to_account_info(), cpi_accounts)
    }
}

/// Validated metadata for a new NFT with `creator` as verified sole creator
pub fn nft_data(
    name: String,
    symbol: String,
    uri: String,
    royalty_bps: u16,
    creator: Pubkey,
) -> Result<DataV2> {
    check_metadata(&name, &symbol, &uri)?;

    Ok(DataV2 {
        name,
        symbol,
        uri,
        seller_fee_basis_points: clamp_royalty(royalty_bps),
        creators: Some(vec![Creator {
            address: creator,
            verified: true,
            share: 100,
        }]),
        collection: None,
        uses: None,
    })
}

/// Mints a one-of-one NFT to the creator.
///
/// Metadata stays mutable so `update_nft` can edit it later. The creator is
/// recorded as the verified sole creator and `royalty_bps` is clamped to
/// 10%. Image and JSON upload happen off-chain; only the resulting `uri`
/// is stored.
///
/// # Arguments
/// * `name` - NFT name (at most 32 bytes)
/// * `symbol` - Collection symbol, usually "NFT"
/// * `uri` - Off-chain JSON metadata location
/// * `royalty_bps` - Secondary sale royalty in basis points
pub fn handle(
    ctx: Context<CreateNft>,
    name: String,
    symbol: String,
    uri: String,
    royalty_bps: u16,
) -> Result<()> {
    let accs = ctx.accounts;

    let data = nft_data(name, symbol, uri, royalty_bps, accs.creator.key())?;
    let uri = data.uri.clone();
    let royalty_bps = data.seller_fee_basis_points;

    token::mint_to(accs.mint_one_ctx(), 1)?;
    create_metadata_accounts_v3(accs.create_metadata_ctx(), data, true, true, None)?;
    create_master_edition_v3(accs.create_master_edition_ctx(), Some(0))?;

    emit!(NftCreated {
        mint: accs.mint.key(),
        creator: accs.creator.key(),
        uri,
        royalty_bps,
    });

    msg!(
        "nft {} created with royalty {} bps",
        accs.mint.key(),
        royalty_bps
    );

    Ok(())
}

/// Account validation struct for minting an NFT
///
/// # Account Requirements
/// * `creator` - Signer paying for every account, becomes owner and update authority
/// * `mint` - New zero-decimal mint keypair
/// * `metadata` - Metadata PDA of `mint`, created by the metadata program
/// * `master_edition` - Edition PDA of `mint`, created by the metadata program
#[derive(Accounts)]
pub struct CreateNft<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer = creator,
        mint::decimals = NFT_DECIMALS,
        mint::authority = creator,
        mint::freeze_authority = creator
    )]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = creator
    )]
    pub creator_token: Box<Account<'info, TokenAccount>>,

    /// CHECK: created by the token metadata program
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key()
    )]
    pub metadata: UncheckedAccount<'info>,

    /// CHECK: created by the token metadata program
    #[account(
        mut,
        seeds = [
            b"metadata",
            token_metadata_program.key().as_ref(),
            mint.key().as_ref(),
            b"edition"
        ],
        bump,
        seeds::program = token_metadata_program.key()
    )]
    pub master_edition: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

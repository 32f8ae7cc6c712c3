use crate::err::SolanaLabError;
use crate::events::NftUpdated;
use crate::models::token_metadata::{check_metadata, clamp_royalty, unpad};
use anchor_lang::prelude::*;
use anchor_spl::metadata::mpl_token_metadata::types::DataV2;
use anchor_spl::metadata::{
    update_metadata_accounts_v2, Metadata, MetadataAccount, UpdateMetadataAccountsV2,
};
use anchor_spl::token::Mint;

impl<'info> UpdateNft<'info> {
    fn update_metadata_ctx(
        &self,
    ) -> CpiContext<'_, '_, '_, 'info, UpdateMetadataAccountsV2<'info>> {
        let cpi_accounts = UpdateMetadataAccountsV2 {
            metadata: self.metadata.to_account_info(),
            update_authority: self.update_authority.to_account_info(),
        };
        CpiContext::new(self.token_metadata_program.to_account_info(), cpi_accounts)
    }
}

/// Rewrites name, uri and royalty of an NFT. Symbol, creators, collection
/// and uses are carried over from the current metadata.
pub fn handle(ctx: Context<UpdateNft>, name: String, uri: String, royalty_bps: u16) -> Result<()> {
    let accs = ctx.accounts;

    let symbol = unpad(&accs.metadata.symbol);
    check_metadata(&name, &symbol, &uri)?;
    let royalty_bps = clamp_royalty(royalty_bps);

    let data = DataV2 {
        name,
        symbol,
        uri: uri.clone(),
        seller_fee_basis_points: royalty_bps,
        creators: accs.metadata.creators.clone(),
        collection: accs.metadata.collection.clone(),
        uses: accs.metadata.uses.clone(),
    };
    update_metadata_accounts_v2(accs.update_metadata_ctx(), None, Some(data), None, None)?;

    emit!(NftUpdated {
        mint: accs.mint.key(),
        uri,
        royalty_bps,
    });

    msg!("nft {} metadata updated", accs.mint.key());

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateNft<'info> {
    pub update_authority: Signer<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
        constraint = metadata.update_authority == update_authority.key()
            @ SolanaLabError::InvalidAuthority,
        constraint = metadata.is_mutable @ SolanaLabError::InvalidAuthority
    )]
    pub metadata: Box<Account<'info, MetadataAccount>>,

    pub token_metadata_program: Program<'info, Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NFT_SYMBOL;

    #[test]
    fn test_stored_symbol_is_reused() {
        let stored = format!("{}{}", NFT_SYMBOL, "\0".repeat(7));
        assert_eq!(stored.len(), 10);

        let symbol = unpad(&stored);
        assert_eq!(symbol, NFT_SYMBOL);
        assert!(check_metadata("Renamed", &symbol, "ipfs://QmNew").is_ok());
    }

    #[test]
    #[should_panic(expected = "InvalidName")]
    fn test_rename_to_empty() {
        check_metadata("", NFT_SYMBOL, "ipfs://QmNew").unwrap();
    }
}

pub use add_liquidity::*;
pub use burn_tokens::*;
pub use buy_from_pool::*;
pub use cancel_escrow::*;
pub use close_pool::*;
pub use close_token_account::*;
pub use create_escrow::*;
pub use create_nft::*;
pub use create_token::*;
pub use fund_faucet::*;
pub use get_pool_quote::*;
pub use init_faucet::*;
pub use init_marketplace::*;
pub use mint_tokens::*;
pub use new_pool::*;
pub use purchase_escrow::*;
pub use remove_liquidity::*;
pub use request_airdrop::*;
pub use set_token_authority::*;
pub use transfer_sol::*;
pub use update_escrow_price::*;
pub use update_marketplace::*;
pub use update_nft::*;
pub use update_pool::*;

pub mod add_liquidity;
pub mod burn_tokens;
pub mod buy_from_pool;
pub mod cancel_escrow;
pub mod close_pool;
pub mod close_token_account;
pub mod create_escrow;
pub mod create_nft;
pub mod create_token;
pub mod fund_faucet;
pub mod get_pool_quote;
pub mod init_faucet;
pub mod init_marketplace;
pub mod mint_tokens;
pub mod new_pool;
pub mod purchase_escrow;
pub mod remove_liquidity;
pub mod request_airdrop;
pub mod set_token_authority;
pub mod transfer_sol;
pub mod update_escrow_price;
pub mod update_marketplace;
pub mod update_nft;
pub mod update_pool;

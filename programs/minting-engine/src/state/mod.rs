pub mod engine_config;
pub mod minted_token;
pub mod pending_mint;

pub use engine_config::*;
pub use minted_token::*;
pub use pending_mint::*;

use anchor_lang::prelude::*;
use crate::state::*;

/// Reserve one copy of a content. Signed by the wired minting engine (via CPI).
#[derive(Accounts)]
#[instruction(content_id: u64)]
pub struct ReserveCopy<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry_config.bump
    )]
    pub registry_config: Account<'info, RegistryConfig>,

    /// CHECK: Loaded in the handler so an unregistered id surfaces as NotFound
    #[account(
        mut,
        seeds = [CONTENT_SEED, &content_id.to_le_bytes()],
        bump
    )]
    pub content: UncheckedAccount<'info>,

    /// Minting engine authority PDA
    pub minting_engine: Signer<'info>,
}

use anchor_lang::prelude::*;
use crate::state::*;

#[derive(Accounts)]
pub struct RegisterContent<'info> {
    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry_config.bump
    )]
    pub registry_config: Account<'info, RegistryConfig>,

    /// New content entry, keyed by the next sequential id
    #[account(
        init,
        payer = admin,
        space = 8 + Content::INIT_SPACE,
        seeds = [CONTENT_SEED, &(registry_config.content_count + 1).to_le_bytes()],
        bump
    )]
    pub content: Account<'info, Content>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Read-only access to a content entry by id
#[derive(Accounts)]
#[instruction(content_id: u64)]
pub struct ReadContent<'info> {
    /// CHECK: Loaded in the handler so an unregistered id surfaces as NotFound
    #[account(
        seeds = [CONTENT_SEED, &content_id.to_le_bytes()],
        bump
    )]
    pub content: UncheckedAccount<'info>,
}

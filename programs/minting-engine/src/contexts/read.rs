use anchor_lang::prelude::*;
use crate::state::*;

/// Read-only access to the engine config
#[derive(Accounts)]
pub struct ReadEngine<'info> {
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Account<'info, EngineConfig>,
}

/// Read-only access to a token record; the handler checks it is issued with the asked id
#[derive(Accounts)]
pub struct ReadToken<'info> {
    /// CHECK: Loaded in the handler so unknown tokens surface as NotFound
    pub minted_token: UncheckedAccount<'info>,
}

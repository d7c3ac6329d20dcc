use anchor_lang::prelude::*;
use randomness_oracle::state::{OracleConfig, CONSUMER_SEED, ORACLE_CONFIG_SEED};

use crate::state::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeEngineParams {
    pub treasury: Pubkey,
    pub mint_price: u64,
    pub num_words: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateEngineParams {
    pub treasury: Option<Pubkey>,
    pub mint_price: Option<u64>,
    pub is_paused: Option<bool>,
}

#[derive(Accounts)]
pub struct InitializeEngine<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + EngineConfig::INIT_SPACE,
        seeds = [ENGINE_CONFIG_SEED],
        bump
    )]
    pub engine_config: Account<'info, EngineConfig>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateEngine<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Account<'info, EngineConfig>,

    pub admin: Signer<'info>,
}

/// Verify the oracle has registered the engine authority as a consumer
#[derive(Accounts)]
pub struct ConfirmOracleConsumer<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Account<'info, EngineConfig>,

    /// CHECK: Engine signing PDA
    #[account(
        seeds = [ENGINE_AUTHORITY_SEED],
        bump
    )]
    pub engine_authority: UncheckedAccount<'info>,

    /// CHECK: Oracle-owned registration; loaded in the handler so absence is reported
    #[account(
        seeds = [CONSUMER_SEED, engine_authority.key().as_ref()],
        bump,
        seeds::program = randomness_oracle::ID
    )]
    pub consumer_registration: UncheckedAccount<'info>,

    /// Oracle config, for its per-request word limit
    #[account(
        seeds = [ORACLE_CONFIG_SEED],
        bump = oracle_config.bump,
        seeds::program = randomness_oracle::ID
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    pub admin: Signer<'info>,
}

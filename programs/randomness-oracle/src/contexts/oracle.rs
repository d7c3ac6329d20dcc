use anchor_lang::prelude::*;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeOracle<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + OracleConfig::INIT_SPACE,
        seeds = [ORACLE_CONFIG_SEED],
        bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Whitelist a consumer address (admin only)
#[derive(Accounts)]
#[instruction(consumer: Pubkey)]
pub struct RegisterConsumer<'info> {
    #[account(
        seeds = [ORACLE_CONFIG_SEED],
        bump = oracle_config.bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    #[account(
        init,
        payer = admin,
        space = 8 + ConsumerRegistration::INIT_SPACE,
        seeds = [CONSUMER_SEED, consumer.as_ref()],
        bump
    )]
    pub consumer_registration: Account<'info, ConsumerRegistration>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

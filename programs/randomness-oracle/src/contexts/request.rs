use anchor_lang::prelude::*;
use crate::errors::RandomnessOracleError;
use crate::state::*;

/// Open a randomness request.
/// Usually invoked through CPI by a consumer program signing with its PDA.
#[derive(Accounts)]
#[instruction(params: RequestRandomnessParams)]
pub struct RequestRandomness<'info> {
    #[account(
        mut,
        seeds = [ORACLE_CONFIG_SEED],
        bump = oracle_config.bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    /// CHECK: Loaded in the handler so a missing registration surfaces as ConsumerNotRegistered
    #[account(
        mut,
        seeds = [CONSUMER_SEED, consumer.key().as_ref()],
        bump
    )]
    pub consumer_registration: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + RandomnessRequest::INIT_SPACE,
        seeds = [REQUEST_SEED, consumer.key().as_ref(), params.caller_seed.as_ref()],
        bump
    )]
    pub request: Account<'info, RandomnessRequest>,

    pub consumer: Signer<'info>,

    /// Pays request rent; refunded on delivery
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Oracle authority posts the randomness for a pending request
#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    #[account(
        mut,
        seeds = [ORACLE_CONFIG_SEED],
        bump = oracle_config.bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [REQUEST_SEED, request.consumer.as_ref(), request.caller_seed.as_ref()],
        bump = request.bump
    )]
    pub request: Account<'info, RandomnessRequest>,

    pub authority: Signer<'info>,
}

/// Withdraw an undelivered request. Signed by the consumer that opened it;
/// rent goes back to the requester.
#[derive(Accounts)]
pub struct CloseRequest<'info> {
    #[account(
        mut,
        seeds = [REQUEST_SEED, request.consumer.as_ref(), request.caller_seed.as_ref()],
        bump = request.bump,
        has_one = consumer @ RandomnessOracleError::Unauthorized,
        has_one = requester,
        close = requester
    )]
    pub request: Account<'info, RandomnessRequest>,

    /// CHECK: Rent refund destination, checked against the request
    #[account(mut)]
    pub requester: UncheckedAccount<'info>,

    pub consumer: Signer<'info>,
}

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

use crate::errors::RandomnessOracleError;
use crate::events::RandomnessDelivered;
use crate::randomness::{callback_data, expand_random_words};
use crate::state::*;

// ============================================================================
// DELIVER - permissionless crank that hands fulfilled randomness to the consumer
// ============================================================================

/// Remaining accounts: the request's callback accounts, in the stored order.
#[derive(Accounts)]
pub struct DeliverRandomness<'info> {
    /// Closed to the requester once the callback succeeds
    #[account(
        mut,
        seeds = [REQUEST_SEED, request.consumer.as_ref(), request.caller_seed.as_ref()],
        bump = request.bump,
        has_one = requester,
        close = requester,
        constraint = request.status == RequestStatus::Fulfilled @ RandomnessOracleError::NotFulfilled
    )]
    pub request: Account<'info, RandomnessRequest>,

    /// CHECK: Rent refund destination, checked against the request
    #[account(mut)]
    pub requester: UncheckedAccount<'info>,

    /// CHECK: Oracle identity PDA - signs the callback, holds no data
    #[account(
        seeds = [ORACLE_IDENTITY_SEED],
        bump
    )]
    pub identity: UncheckedAccount<'info>,

    /// CHECK: Consumer program chosen at request time
    #[account(
        executable,
        address = request.callback_program @ RandomnessOracleError::InvalidCallback
    )]
    pub callback_program: UncheckedAccount<'info>,
}

impl<'info> DeliverRandomness<'info> {
    pub fn handler<'a>(ctx: Context<'_, '_, 'a, 'a, DeliverRandomness<'a>>) -> Result<()> {
        let request = &ctx.accounts.request;
        let identity_key = ctx.accounts.identity.key();

        let supplied: Vec<Pubkey> = ctx.remaining_accounts.iter().map(|a| a.key()).collect();
        request.check_callback_accounts(&supplied)?;

        let words = expand_random_words(&request.randomness, &request.request_id, request.num_words);
        let data = callback_data(&request.callback_discriminator, &request.request_id, &words)?;

        // Identity first, as signer, then the consumer's accounts
        let mut metas = Vec::with_capacity(request.callback_accounts.len() + 1);
        metas.push(AccountMeta::new_readonly(identity_key, true));
        metas.extend(request.callback_accounts.iter().map(|m| m.to_account_meta()));

        let ix = Instruction {
            program_id: request.callback_program,
            accounts: metas,
            data,
        };

        let mut infos = Vec::with_capacity(ctx.remaining_accounts.len() + 2);
        infos.push(ctx.accounts.identity.to_account_info());
        infos.extend(ctx.remaining_accounts.iter().cloned());
        infos.push(ctx.accounts.callback_program.to_account_info());

        let bump = [ctx.bumps.identity];
        let identity_seeds: &[&[u8]] = &[ORACLE_IDENTITY_SEED, &bump];
        invoke_signed(&ix, &infos, &[identity_seeds])?;

        emit!(RandomnessDelivered {
            request_id: request.request_id,
            consumer: request.consumer,
            callback_program: request.callback_program,
            num_words: request.num_words,
        });
        msg!("Randomness delivered to {}", request.callback_program);

        Ok(())
    }
}

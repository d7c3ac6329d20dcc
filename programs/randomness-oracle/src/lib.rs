use anchor_lang::prelude::*;

pub mod contexts;
pub mod errors;
pub mod events;
pub mod guard;
pub mod randomness;
pub mod state;

use contexts::*;
use errors::RandomnessOracleError;
use events::*;
use state::*;

declare_id!("5pJKLBnmLTMnb4rhgPAPnYnghuDWTJYUXZz2Prph8mzy");

/// PDA that signs every callback. Consumers accept fulfillments only from this key.
pub fn oracle_identity() -> Pubkey {
    Pubkey::find_program_address(&[ORACLE_IDENTITY_SEED], &ID).0
}

#[program]
pub mod randomness_oracle {
    use super::*;

    // ============================================
    // ADMINISTRATION
    // ============================================

    pub fn initialize_oracle(
        ctx: Context<InitializeOracle>,
        authority: Pubkey,
        max_num_words: u32,
    ) -> Result<()> {
        require!(
            max_num_words > 0 && max_num_words <= MAX_NUM_WORDS_LIMIT,
            RandomnessOracleError::InvalidNumWords
        );

        let config = &mut ctx.accounts.oracle_config;
        config.admin = ctx.accounts.admin.key();
        config.authority = authority;
        config.max_num_words = max_num_words;
        config.request_counter = 0;
        config.fulfilled_count = 0;
        config.bump = ctx.bumps.oracle_config;

        msg!("Oracle initialized, authority: {}", authority);
        Ok(())
    }

    /// Allow `consumer` to open requests (admin only)
    pub fn register_consumer(ctx: Context<RegisterConsumer>, consumer: Pubkey) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        guard::require_caller(&admin, &ctx.accounts.oracle_config.admin)?;

        let timestamp = Clock::get()?.unix_timestamp;
        let registration = &mut ctx.accounts.consumer_registration;
        registration.consumer = consumer;
        registration.registered_at = timestamp;
        registration.request_count = 0;
        registration.bump = ctx.bumps.consumer_registration;

        emit!(ConsumerRegistered {
            consumer,
            admin,
            timestamp,
        });
        msg!("Consumer registered: {}", consumer);
        Ok(())
    }

    // ============================================
    // REQUEST / FULFILL / DELIVER
    // ============================================

    /// Open a request and return its id
    pub fn request_randomness(
        ctx: Context<RequestRandomness>,
        params: RequestRandomnessParams,
    ) -> Result<[u8; 32]> {
        let registration_info = ctx.accounts.consumer_registration.to_account_info();
        let mut registration = ConsumerRegistration::load(&registration_info)?;

        let config = &mut ctx.accounts.oracle_config;
        config.validate_num_words(params.num_words)?;
        params.validate_callback()?;

        let consumer = ctx.accounts.consumer.key();
        let slot = Clock::get()?.slot;
        let counter = config.next_request()?;
        let request_id = randomness::derive_request_id(&consumer, &params.caller_seed, counter, slot);

        registration.request_count = registration
            .request_count
            .checked_add(1)
            .ok_or(RandomnessOracleError::MathOverflow)?;
        registration.store(&registration_info)?;

        let request = &mut ctx.accounts.request;
        request.request_id = request_id;
        request.consumer = consumer;
        request.requester = ctx.accounts.payer.key();
        request.caller_seed = params.caller_seed;
        request.num_words = params.num_words;
        request.request_slot = slot;
        request.callback_program = params.callback_program;
        request.callback_discriminator = params.callback_discriminator;
        request.callback_accounts = params.callback_accounts;
        request.status = RequestStatus::Pending;
        request.randomness = [0u8; 32];
        request.fulfilled_slot = 0;
        request.bump = ctx.bumps.request;

        emit!(RandomnessRequested {
            request_id,
            consumer,
            requester: request.requester,
            num_words: request.num_words,
            request_slot: slot,
        });
        msg!("Randomness requested by {} ({} words)", consumer, request.num_words);

        Ok(request_id)
    }

    /// Record randomness for a pending request (oracle authority only).
    /// Commits independently of delivery.
    pub fn fulfill_randomness(ctx: Context<FulfillRandomness>, randomness: [u8; 32]) -> Result<()> {
        let config = &mut ctx.accounts.oracle_config;
        guard::require_caller(&ctx.accounts.authority.key(), &config.authority)?;

        let slot = Clock::get()?.slot;
        let request = &mut ctx.accounts.request;
        request.record_fulfillment(randomness, slot)?;

        config.fulfilled_count = config
            .fulfilled_count
            .checked_add(1)
            .ok_or(RandomnessOracleError::MathOverflow)?;

        emit!(RandomnessFulfilled {
            request_id: request.request_id,
            consumer: request.consumer,
            randomness,
            fulfilled_slot: slot,
        });
        msg!("Randomness fulfilled at slot {}", slot);
        Ok(())
    }

    /// Drop a request the consumer no longer wants delivered (consumer only).
    /// Works for pending and fulfilled requests alike.
    pub fn close_request(ctx: Context<CloseRequest>) -> Result<()> {
        let request = &ctx.accounts.request;

        emit!(RandomnessRequestClosed {
            request_id: request.request_id,
            consumer: request.consumer,
            requester: request.requester,
            was_fulfilled: request.status == RequestStatus::Fulfilled,
        });
        msg!("Randomness request closed by {}", request.consumer);
        Ok(())
    }

    /// Invoke the consumer callback with the expanded words; anyone may crank.
    /// A rejected callback leaves the request fulfilled and retryable.
    pub fn deliver_randomness<'info>(
        ctx: Context<'_, '_, 'info, 'info, DeliverRandomness<'info>>,
    ) -> Result<()> {
        DeliverRandomness::handler(ctx)
    }
}

use anchor_lang::prelude::*;
use randomness_oracle::state::ConsumerRegistration;

pub mod contexts;
pub mod errors;
pub mod events;
pub mod guard;
pub mod randomness;
pub mod state;
pub mod utils;

use contexts::*;
use errors::MintingEngineError;
use events::*;
use state::*;

declare_id!("8o2C4GsYWX7w8LU7TLJmj2CnexYM2WQiwY43KYcAncMq");

/// The engine's signing PDA: the registry's minting engine and the oracle's consumer
pub fn engine_authority() -> Pubkey {
    Pubkey::find_program_address(&[ENGINE_AUTHORITY_SEED], &ID).0
}

#[program]
pub mod minting_engine {
    use super::*;

    // ============================================
    // ENGINE MANAGEMENT
    // ============================================

    /// Initialize the engine config (admin only, once)
    pub fn initialize_engine(ctx: Context<InitializeEngine>, params: InitializeEngineParams) -> Result<()> {
        EngineConfig::validate_settings(params.mint_price, params.num_words)?;
        require!(params.treasury != Pubkey::default(), MintingEngineError::InvalidArgument);

        let timestamp = Clock::get()?.unix_timestamp;
        let config = &mut ctx.accounts.engine_config;
        config.admin = ctx.accounts.admin.key();
        config.treasury = params.treasury;
        config.mint_price = params.mint_price;
        config.oracle_identity = randomness_oracle::oracle_identity();
        config.num_words = params.num_words;
        config.oracle_consumer_confirmed = false;
        config.is_paused = false;
        config.mint_nonce = 0;
        config.token_count = 0;
        config.pending_count = 0;
        config.total_collected = 0;
        config.created_at = timestamp;
        config.bump = ctx.bumps.engine_config;

        emit!(EngineInitialized {
            admin: config.admin,
            treasury: config.treasury,
            mint_price: config.mint_price,
            oracle_identity: config.oracle_identity,
            timestamp,
        });
        msg!("Engine initialized, price: {} lamports", config.mint_price);
        Ok(())
    }

    /// Update treasury, price or pause flag (admin only)
    pub fn update_engine(ctx: Context<UpdateEngine>, params: UpdateEngineParams) -> Result<()> {
        let config = &mut ctx.accounts.engine_config;
        guard::require_caller(&ctx.accounts.admin.key(), &config.admin)?;

        if let Some(treasury) = params.treasury {
            require!(treasury != Pubkey::default(), MintingEngineError::InvalidArgument);
            config.treasury = treasury;
        }
        if let Some(mint_price) = params.mint_price {
            EngineConfig::validate_settings(mint_price, config.num_words)?;
            config.mint_price = mint_price;
        }
        if let Some(is_paused) = params.is_paused {
            config.is_paused = is_paused;
        }

        emit!(EngineUpdated {
            treasury: config.treasury,
            mint_price: config.mint_price,
            is_paused: config.is_paused,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    /// Confirm the oracle knows the engine authority as a consumer (admin only).
    /// Minting stays blocked until this succeeds.
    /// Also checks the oracle can serve the configured number of words.
    pub fn confirm_oracle_consumer(ctx: Context<ConfirmOracleConsumer>) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        guard::require_caller(&admin, &ctx.accounts.engine_config.admin)?;

        let consumer = ctx.accounts.engine_authority.key();
        let registration = ConsumerRegistration::load(&ctx.accounts.consumer_registration.to_account_info())
            .map_err(|_| error!(MintingEngineError::OracleConsumerNotRegistered))?;
        require_keys_eq!(
            registration.consumer,
            consumer,
            MintingEngineError::OracleConsumerNotRegistered
        );
        ctx.accounts
            .engine_config
            .check_oracle_word_limit(ctx.accounts.oracle_config.max_num_words)?;

        ctx.accounts.engine_config.oracle_consumer_confirmed = true;

        emit!(OracleConsumerConfirmed {
            consumer,
            admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!("Oracle consumer confirmed: {}", consumer);
        Ok(())
    }

    // ============================================
    // MINTING
    // ============================================

    /// Pay, reserve a copy and request randomness. Returns the oracle request id.
    pub fn mint_token(ctx: Context<MintToken>, content_id: u64, payment: u64) -> Result<[u8; 32]> {
        MintToken::handler(ctx, content_id, payment)
    }

    /// Oracle callback: issue the token for `request_id`
    pub fn on_randomness_fulfilled(
        ctx: Context<FulfillMint>,
        request_id: [u8; 32],
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        FulfillMint::handler(ctx, request_id, random_words)
    }

    /// Refund a pending mint the oracle never answered (admin only)
    pub fn expire_pending_mint(ctx: Context<ExpirePendingMint>, mint_nonce: u64) -> Result<()> {
        ExpirePendingMint::handler(ctx, mint_nonce)
    }

    // ============================================
    // QUERIES
    // ============================================

    pub fn get_nft_metadata(ctx: Context<ReadToken>, token_id: u64) -> Result<TokenMetadata> {
        let token = MintedToken::load(&ctx.accounts.minted_token.to_account_info())?;
        token.metadata(token_id)
    }

    pub fn total_supply(ctx: Context<ReadEngine>) -> Result<u64> {
        Ok(ctx.accounts.engine_config.total_supply())
    }

    pub fn owner_of(ctx: Context<ReadToken>, token_id: u64) -> Result<Pubkey> {
        let token = MintedToken::load(&ctx.accounts.minted_token.to_account_info())?;
        token.owner_of(token_id)
    }
}

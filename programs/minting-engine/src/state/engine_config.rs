use anchor_lang::prelude::*;

use crate::errors::MintingEngineError;

pub const ENGINE_CONFIG_SEED: &[u8] = b"engine_config";

/// Seed of the engine's signing PDA. This address is what the registry wires
/// as its minting engine and what the oracle registers as a consumer.
pub const ENGINE_AUTHORITY_SEED: &[u8] = b"engine_authority";

/// 0.05 SOL
pub const DEFAULT_MINT_PRICE_LAMPORTS: u64 = 50_000_000;
/// Rent-exempt minimum of a zero-data account. A single payment must be enough
/// to leave an unfunded treasury rent exempt, or every callback would fail.
pub const MIN_MINT_PRICE_LAMPORTS: u64 = 890_880;

/// Words requested from the oracle per mint; only the first becomes the seed
pub const DEFAULT_NUM_WORDS: u32 = 1;
pub const MAX_NUM_WORDS: u32 = 4;

/// Global engine configuration
/// PDA seeds: ["engine_config"]
#[account]
#[derive(InitSpace)]
pub struct EngineConfig {
    pub admin: Pubkey,
    /// Receives payments once the token is issued
    pub treasury: Pubkey,
    /// Fixed price per mint in lamports
    pub mint_price: u64,
    /// Oracle PDA that signs fulfillment callbacks
    pub oracle_identity: Pubkey,
    pub num_words: u32,
    /// Set once the oracle consumer registration has been verified
    pub oracle_consumer_confirmed: bool,
    pub is_paused: bool,
    /// Accepted mint requests; keys PendingMint and MintedToken accounts
    pub mint_nonce: u64,
    /// Issued tokens; the next token id is token_count + 1
    pub token_count: u64,
    /// Requests still waiting on randomness
    pub pending_count: u64,
    /// Lamports moved to the treasury
    pub total_collected: u64,
    pub created_at: i64,
    pub bump: u8,
}

impl EngineConfig {
    pub fn validate_settings(mint_price: u64, num_words: u32) -> Result<()> {
        require!(mint_price >= MIN_MINT_PRICE_LAMPORTS, MintingEngineError::PriceTooLow);
        require!(
            num_words > 0 && num_words <= MAX_NUM_WORDS,
            MintingEngineError::InvalidArgument
        );
        Ok(())
    }

    /// Every request asks for `num_words`; the oracle must be able to serve them
    pub fn check_oracle_word_limit(&self, oracle_max_num_words: u32) -> Result<()> {
        require!(
            self.num_words <= oracle_max_num_words,
            MintingEngineError::OracleWordLimitExceeded
        );
        Ok(())
    }

    /// Gate for new requests; fulfillments are never gated
    pub fn validate_mint_request(&self) -> Result<()> {
        require!(!self.is_paused, MintingEngineError::EnginePaused);
        require!(
            self.oracle_consumer_confirmed,
            MintingEngineError::OracleConsumerNotRegistered
        );
        Ok(())
    }

    pub fn check_payment(&self, payment: u64) -> Result<()> {
        require!(payment >= self.mint_price, MintingEngineError::InsufficientPayment);
        Ok(())
    }

    pub fn next_mint_nonce(&self) -> Result<u64> {
        self.mint_nonce
            .checked_add(1)
            .ok_or_else(|| error!(MintingEngineError::MathOverflow))
    }

    /// Account for an accepted request and return its nonce
    pub fn record_request(&mut self) -> Result<u64> {
        let nonce = self.next_mint_nonce()?;
        self.mint_nonce = nonce;
        self.pending_count = self
            .pending_count
            .checked_add(1)
            .ok_or(MintingEngineError::MathOverflow)?;
        Ok(nonce)
    }

    /// Assign the next token id for a fulfilled request
    pub fn issue_token(&mut self, payment: u64) -> Result<u64> {
        let token_id = self
            .token_count
            .checked_add(1)
            .ok_or(MintingEngineError::MathOverflow)?;
        self.settle_pending()?;
        self.total_collected = self
            .total_collected
            .checked_add(payment)
            .ok_or(MintingEngineError::MathOverflow)?;
        self.token_count = token_id;
        Ok(token_id)
    }

    /// Drop one outstanding request (fulfilled or expired)
    pub fn settle_pending(&mut self) -> Result<()> {
        self.pending_count = self
            .pending_count
            .checked_sub(1)
            .ok_or(MintingEngineError::MathOverflow)?;
        Ok(())
    }

    pub fn total_supply(&self) -> u64 {
        self.token_count
    }
}

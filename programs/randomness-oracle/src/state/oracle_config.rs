use anchor_lang::prelude::*;

use crate::errors::RandomnessOracleError;

pub const ORACLE_CONFIG_SEED: &[u8] = b"oracle_config";

/// Seed of the PDA that signs every callback CPI.
/// Consumers whitelist this address as the only caller of their callback.
pub const ORACLE_IDENTITY_SEED: &[u8] = b"identity";

/// Upper bound on `max_num_words` accepted at initialization
pub const MAX_NUM_WORDS_LIMIT: u32 = 16;

/// Global oracle configuration
/// PDA seeds: ["oracle_config"]
#[account]
#[derive(InitSpace)]
pub struct OracleConfig {
    /// Registers consumers
    pub admin: Pubkey,
    /// Off-chain oracle key that posts randomness
    pub authority: Pubkey,
    /// Maximum number of words a consumer may request at once
    pub max_num_words: u32,
    /// Requests accepted so far; mixed into every request id
    pub request_counter: u64,
    /// Requests the authority has fulfilled
    pub fulfilled_count: u64,
    pub bump: u8,
}

impl OracleConfig {
    pub fn validate_num_words(&self, num_words: u32) -> Result<()> {
        require!(
            num_words > 0 && num_words <= self.max_num_words,
            RandomnessOracleError::InvalidNumWords
        );
        Ok(())
    }

    /// Bump the request counter and return the value for this request
    pub fn next_request(&mut self) -> Result<u64> {
        self.request_counter = self
            .request_counter
            .checked_add(1)
            .ok_or(RandomnessOracleError::MathOverflow)?;
        Ok(self.request_counter)
    }
}

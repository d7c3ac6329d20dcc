use anchor_lang::prelude::*;

use crate::errors::RandomnessOracleError;

pub const CONSUMER_SEED: &[u8] = b"consumer";

/// Registration of a consumer allowed to request randomness.
/// PDA seeds: ["consumer", consumer]
///
/// The consumer is the signing address the requesting program uses
/// (typically one of its PDAs), not the program id itself.
#[account]
#[derive(InitSpace)]
pub struct ConsumerRegistration {
    pub consumer: Pubkey,
    pub registered_at: i64,
    /// Requests made by this consumer
    pub request_count: u64,
    pub bump: u8,
}

impl ConsumerRegistration {
    /// Load a registration; anything else (missing, foreign, garbage) means
    /// the consumer was never registered.
    pub fn load(info: &AccountInfo) -> Result<Self> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return err!(RandomnessOracleError::ConsumerNotRegistered);
        }
        let data = info.try_borrow_data()?;
        ConsumerRegistration::try_deserialize(&mut &data[..])
            .map_err(|_| error!(RandomnessOracleError::ConsumerNotRegistered))
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        self.try_serialize(&mut &mut data[..])
    }
}

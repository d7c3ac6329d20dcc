use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::errors::RandomnessOracleError;

/// Request id: sha256("request_id" ‖ consumer ‖ caller_seed ‖ counter ‖ slot).
/// The counter makes ids unique even for a repeated seed within one slot.
pub fn derive_request_id(consumer: &Pubkey, caller_seed: &[u8; 32], counter: u64, slot: u64) -> [u8; 32] {
    hashv(&[
        b"request_id",
        consumer.as_ref(),
        caller_seed,
        &counter.to_le_bytes(),
        &slot.to_le_bytes(),
    ])
    .to_bytes()
}

/// Expand the posted randomness into `num_words` words:
/// word i = sha256(randomness ‖ request_id ‖ i)
pub fn expand_random_words(randomness: &[u8; 32], request_id: &[u8; 32], num_words: u32) -> Vec<[u8; 32]> {
    (0..num_words)
        .map(|i| hashv(&[randomness, request_id, &i.to_le_bytes()]).to_bytes())
        .collect()
}

/// Instruction data for the consumer callback: discriminator ‖ borsh(request_id, words)
pub fn callback_data(discriminator: &[u8], request_id: &[u8; 32], words: &[[u8; 32]]) -> Result<Vec<u8>> {
    let mut data = discriminator.to_vec();
    request_id
        .serialize(&mut data)
        .map_err(|_| error!(RandomnessOracleError::CallbackEncodingFailed))?;
    words
        .serialize(&mut data)
        .map_err(|_| error!(RandomnessOracleError::CallbackEncodingFailed))?;
    Ok(data)
}

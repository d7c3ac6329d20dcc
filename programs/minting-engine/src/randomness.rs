use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::errors::MintingEngineError;

/// Caller seed for the oracle request of mint `nonce`.
/// Clients derive the oracle request address from it before sending `mint_token`.
pub fn mint_caller_seed(engine_authority: &Pubkey, nonce: u64) -> [u8; 32] {
    hashv(&[b"mint_seed", engine_authority.as_ref(), &nonce.to_le_bytes()]).to_bytes()
}

/// The token's seed is the first delivered word
pub fn select_random_seed(random_words: &[[u8; 32]]) -> Result<[u8; 32]> {
    random_words
        .first()
        .copied()
        .ok_or_else(|| error!(MintingEngineError::InvalidArgument))
}

pub fn is_zero_seed(seed: &[u8; 32]) -> bool {
    seed.iter().all(|b| *b == 0)
}

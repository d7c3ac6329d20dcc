use anchor_lang::prelude::*;

#[event]
pub struct EngineInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub mint_price: u64,
    pub oracle_identity: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct EngineUpdated {
    pub treasury: Pubkey,
    pub mint_price: u64,
    pub is_paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct OracleConsumerConfirmed {
    pub consumer: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}

/// Phase one: payment escrowed, copy reserved, randomness requested
#[event]
pub struct MintRequested {
    pub request_id: [u8; 32],
    pub mint_nonce: u64,
    pub content_id: u64,
    pub buyer: Pubkey,
    pub copy_number: u64,
    pub payment: u64,
}

/// Phase two: randomness arrived and the token was issued
#[event]
pub struct TokenMinted {
    pub token_id: u64,
    pub request_id: [u8; 32],
    pub mint_nonce: u64,
    pub content_id: u64,
    pub copy_number: u64,
    pub owner: Pubkey,
    pub random_seed: [u8; 32],
}

#[event]
pub struct PendingMintExpired {
    pub request_id: [u8; 32],
    pub mint_nonce: u64,
    pub content_id: u64,
    pub buyer: Pubkey,
    pub refunded: u64,
    pub timestamp: i64,
}

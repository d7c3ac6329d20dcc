use anchor_lang::prelude::*;

#[event]
pub struct ContentRegistered {
    pub content_id: u64,
    pub title: String,
    pub max_copies: u64,
    pub admin: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the minting engine reserves a copy.
/// `remaining` lets an indexer track availability without reading the account.
#[event]
pub struct CopyReserved {
    pub content_id: u64,
    pub copy_number: u64,
    pub remaining: u64,
    pub minting_engine: Pubkey,
}

#[event]
pub struct MintingEngineSet {
    pub minting_engine: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}

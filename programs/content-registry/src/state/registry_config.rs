use anchor_lang::prelude::*;

use crate::errors::ContentRegistryError;

pub const REGISTRY_SEED: &[u8] = b"registry";

/// Global registry configuration
/// PDA seeds: ["registry"]
/// Only one instance exists, controlled by admin
#[account]
#[derive(InitSpace)]
pub struct RegistryConfig {
    /// Admin who registers content and wires the minting engine
    pub admin: Pubkey,
    /// Minting engine authority allowed to reserve copies (default until wired)
    pub minting_engine: Pubkey,
    /// Number of registered contents; ids are assigned sequentially from 1
    pub content_count: u64,
    /// Timestamp when registry was created
    pub created_at: i64,
    pub bump: u8,
}

impl RegistryConfig {
    /// Identifier the next registration will receive
    pub fn next_content_id(&self) -> Result<u64> {
        self.content_count
            .checked_add(1)
            .ok_or_else(|| error!(ContentRegistryError::MathOverflow))
    }

    pub fn is_engine_wired(&self) -> bool {
        self.minting_engine != Pubkey::default()
    }

    /// Wiring is idempotent: the same engine may be set again, a different one may not.
    pub fn wire_minting_engine(&mut self, minting_engine: Pubkey) -> Result<()> {
        require!(
            minting_engine != Pubkey::default(),
            ContentRegistryError::InvalidArgument
        );
        if self.is_engine_wired() {
            require_keys_eq!(
                self.minting_engine,
                minting_engine,
                ContentRegistryError::MintingEngineAlreadySet
            );
        }
        self.minting_engine = minting_engine;
        Ok(())
    }
}

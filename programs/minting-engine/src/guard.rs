use anchor_lang::prelude::*;

use crate::errors::MintingEngineError;

/// Caller check for admin instructions and the oracle-only fulfillment callback.
pub fn require_caller(caller: &Pubkey, expected: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, *expected, MintingEngineError::Unauthorized);
    Ok(())
}

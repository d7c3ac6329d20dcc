use anchor_lang::prelude::*;

use crate::errors::RandomnessOracleError;

/// Caller check shared by admin-only and authority-only instructions.
pub fn require_caller(caller: &Pubkey, expected: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, *expected, RandomnessOracleError::Unauthorized);
    Ok(())
}

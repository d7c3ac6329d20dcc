use anchor_lang::prelude::*;

use crate::errors::ContentRegistryError;

/// Single caller check for every privileged path: the administrator on
/// registration/wiring and the minting engine on reservation.
pub fn require_caller(caller: &Pubkey, expected: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, *expected, ContentRegistryError::Unauthorized);
    Ok(())
}

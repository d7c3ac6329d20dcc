use anchor_lang::prelude::*;

use crate::errors::MintingEngineError;

pub const PENDING_MINT_SEED: &[u8] = b"pending_mint";

/// Admin may expire a pending mint after this long without randomness
pub const PENDING_MINT_TIMEOUT_SECS: i64 = 3600;

/// Reservation waiting on randomness. Holds the buyer's payment in escrow.
/// PDA seeds: ["pending_mint", mint_nonce.to_le_bytes()]
///
/// Closed exactly once: by the matching fulfillment or by expiry.
#[account]
#[derive(InitSpace)]
pub struct PendingMint {
    /// Oracle request id this reservation is waiting on
    pub request_id: [u8; 32],
    pub mint_nonce: u64,
    pub content_id: u64,
    pub buyer: Pubkey,
    /// 1-based, in reservation order
    pub copy_number: u64,
    /// Escrowed lamports, moved to the treasury on fulfillment
    pub payment: u64,
    /// Treasury at request time
    pub treasury: Pubkey,
    pub requested_at: i64,
    pub bump: u8,
}

impl PendingMint {
    /// A closed or never-created pending mint is an unknown request
    pub fn load(info: &AccountInfo) -> Result<Self> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return err!(MintingEngineError::UnknownRequest);
        }
        let data = info.try_borrow_data()?;
        PendingMint::try_deserialize(&mut &data[..])
            .map_err(|_| error!(MintingEngineError::UnknownRequest))
    }

    pub fn check_request(&self, request_id: &[u8; 32]) -> Result<()> {
        require!(
            self.request_id == *request_id,
            MintingEngineError::UnknownRequest
        );
        Ok(())
    }

    pub fn check_expirable(&self, now: i64) -> Result<()> {
        let expires_at = self
            .requested_at
            .checked_add(PENDING_MINT_TIMEOUT_SECS)
            .ok_or(MintingEngineError::MathOverflow)?;
        require!(now >= expires_at, MintingEngineError::ExpiryTooEarly);
        Ok(())
    }
}

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::AccountMeta;

use crate::errors::RandomnessOracleError;

pub const REQUEST_SEED: &[u8] = b"request";

pub const MAX_CALLBACK_ACCOUNTS: usize = 8;
pub const CALLBACK_DISCRIMINATOR_LEN: usize = 8;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}

/// Account forwarded to the consumer callback, after the oracle identity signer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct CallbackAccountMeta {
    pub pubkey: Pubkey,
    pub is_writable: bool,
}

impl CallbackAccountMeta {
    pub fn to_account_meta(&self) -> AccountMeta {
        if self.is_writable {
            AccountMeta::new(self.pubkey, false)
        } else {
            AccountMeta::new_readonly(self.pubkey, false)
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RequestRandomnessParams {
    /// Consumer-chosen seed; together with the consumer it locates the request account
    pub caller_seed: [u8; 32],
    pub num_words: u32,
    pub callback_program: Pubkey,
    /// Instruction discriminator of the consumer's fulfillment handler
    pub callback_discriminator: Vec<u8>,
    pub callback_accounts: Vec<CallbackAccountMeta>,
}

impl RequestRandomnessParams {
    pub fn validate_callback(&self) -> Result<()> {
        require!(
            !self.callback_discriminator.is_empty()
                && self.callback_discriminator.len() <= CALLBACK_DISCRIMINATOR_LEN,
            RandomnessOracleError::InvalidCallback
        );
        require!(
            self.callback_accounts.len() <= MAX_CALLBACK_ACCOUNTS,
            RandomnessOracleError::TooManyCallbackAccounts
        );
        Ok(())
    }
}

/// One randomness request.
/// PDA seeds: ["request", consumer, caller_seed]
///
/// Pending -> Fulfilled (randomness recorded) -> closed once the callback succeeds.
#[account]
#[derive(InitSpace)]
pub struct RandomnessRequest {
    /// Opaque identifier minted by the oracle at request time
    pub request_id: [u8; 32],
    pub consumer: Pubkey,
    /// Paid the rent; refunded when the request is delivered
    pub requester: Pubkey,
    pub caller_seed: [u8; 32],
    pub num_words: u32,
    pub request_slot: u64,
    pub callback_program: Pubkey,
    #[max_len(8)]
    pub callback_discriminator: Vec<u8>,
    #[max_len(8)]
    pub callback_accounts: Vec<CallbackAccountMeta>,
    pub status: RequestStatus,
    pub randomness: [u8; 32],
    pub fulfilled_slot: u64,
    pub bump: u8,
}

impl RandomnessRequest {
    pub fn record_fulfillment(&mut self, randomness: [u8; 32], slot: u64) -> Result<()> {
        require!(
            self.status == RequestStatus::Pending,
            RandomnessOracleError::AlreadyFulfilled
        );
        self.randomness = randomness;
        self.fulfilled_slot = slot;
        self.status = RequestStatus::Fulfilled;
        Ok(())
    }

    /// The accounts supplied for delivery must be exactly the ones fixed at request time
    pub fn check_callback_accounts(&self, supplied: &[Pubkey]) -> Result<()> {
        require!(
            supplied.len() == self.callback_accounts.len(),
            RandomnessOracleError::CallbackAccountMismatch
        );
        for (meta, key) in self.callback_accounts.iter().zip(supplied) {
            require_keys_eq!(meta.pubkey, *key, RandomnessOracleError::CallbackAccountMismatch);
        }
        Ok(())
    }
}

use anchor_lang::prelude::*;

#[event]
pub struct ConsumerRegistered {
    pub consumer: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RandomnessRequested {
    pub request_id: [u8; 32],
    pub consumer: Pubkey,
    pub requester: Pubkey,
    pub num_words: u32,
    pub request_slot: u64,
}

/// Randomness recorded by the oracle authority. Stands on its own even if
/// the consumer later rejects the callback.
#[event]
pub struct RandomnessFulfilled {
    pub request_id: [u8; 32],
    pub consumer: Pubkey,
    pub randomness: [u8; 32],
    pub fulfilled_slot: u64,
}

#[event]
pub struct RandomnessDelivered {
    pub request_id: [u8; 32],
    pub consumer: Pubkey,
    pub callback_program: Pubkey,
    pub num_words: u32,
}

/// Request withdrawn by its consumer before delivery
#[event]
pub struct RandomnessRequestClosed {
    pub request_id: [u8; 32],
    pub consumer: Pubkey,
    pub requester: Pubkey,
    pub was_fulfilled: bool,
}

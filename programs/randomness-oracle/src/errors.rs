use anchor_lang::prelude::*;

#[error_code]
pub enum RandomnessOracleError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Consumer is not registered with the oracle")]
    ConsumerNotRegistered,
    #[msg("Number of words out of allowed range")]
    InvalidNumWords,
    #[msg("Too many callback accounts")]
    TooManyCallbackAccounts,
    #[msg("Callback discriminator must be at most 8 bytes")]
    InvalidCallback,

    // Fulfillment errors
    #[msg("Randomness already fulfilled for this request")]
    AlreadyFulfilled,
    #[msg("Request not yet fulfilled")]
    NotFulfilled,
    #[msg("Supplied accounts do not match the stored callback accounts")]
    CallbackAccountMismatch,
    #[msg("Failed to encode callback data")]
    CallbackEncodingFailed,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}

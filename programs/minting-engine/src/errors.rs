use anchor_lang::prelude::*;

#[error_code]
pub enum MintingEngineError {
    #[msg("Invalid argument")]
    InvalidArgument,
    #[msg("Not found")]
    NotFound,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("No copies remain for this content")]
    Exhausted,
    #[msg("Payment below the mint price")]
    InsufficientPayment,
    #[msg("No pending mint for this request id")]
    UnknownRequest,

    // Configuration errors
    #[msg("Minting is paused")]
    EnginePaused,
    #[msg("Engine is not a confirmed consumer of the randomness oracle")]
    OracleConsumerNotRegistered,
    #[msg("Mint price below minimum")]
    PriceTooLow,
    #[msg("Oracle serves fewer words per request than the engine asks for")]
    OracleWordLimitExceeded,

    // Pending mint errors
    #[msg("Pending mint has not reached its expiry timeout")]
    ExpiryTooEarly,
    #[msg("Supplied account does not belong to this pending mint")]
    AccountMismatch,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}

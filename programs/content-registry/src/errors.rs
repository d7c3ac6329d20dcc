use anchor_lang::prelude::*;

#[error_code]
pub enum ContentRegistryError {
    #[msg("Invalid registration argument")]
    InvalidArgument,
    #[msg("Content not found")]
    NotFound,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("No copies remain for this content")]
    Exhausted,

    // Wiring errors
    #[msg("Minting engine is already set to a different address")]
    MintingEngineAlreadySet,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}

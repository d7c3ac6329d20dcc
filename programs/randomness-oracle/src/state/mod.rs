pub mod consumer;
pub mod oracle_config;
pub mod request;

pub use consumer::{ConsumerRegistration, CONSUMER_SEED};
pub use oracle_config::{OracleConfig, MAX_NUM_WORDS_LIMIT, ORACLE_CONFIG_SEED, ORACLE_IDENTITY_SEED};
pub use request::{
    CallbackAccountMeta, RandomnessRequest, RequestRandomnessParams, RequestStatus,
    CALLBACK_DISCRIMINATOR_LEN, MAX_CALLBACK_ACCOUNTS, REQUEST_SEED,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    #[error("game not served by any transactor")]
    GameNotServed,

    #[error("invalid random id")]
    InvalidRandomId,

    #[error("player already joined")]
    PlayerAlreadyJoined,

    #[error("invalid player address")]
    InvalidPlayerAddress,

    #[error("malformed data: {0}")]
    MalformedData(String),

    #[error("randomization error: {0}")]
    RandomizationError(String),

    #[error("crypto error: {0}")]
    CryptoError(String),

    #[error("invalid decrypted value: {0}")]
    InvalidDecryptedValue(String),

    #[error("ciphertexts size mismatch")]
    InvalidCiphertextsSize,

    #[error("invalid key index")]
    InvalidKeyIndex,

    #[error("missing secret")]
    MissingSecret,
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedData(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

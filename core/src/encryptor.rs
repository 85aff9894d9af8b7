//! The boundary to the cryptography provider.  This core never
//! inspects the meaning of the bytes it shuffles around; everything
//! cryptographic happens behind [`EncryptorT`].

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Ciphertext, SecretDigest, SecretKey};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncryptorError {
    #[error("Encode failed")]
    EncodeFailed,

    #[error("Decode failed")]
    DecodeFailed,

    #[error("Missing secrets")]
    MissingSecret,

    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

impl From<EncryptorError> for crate::error::Error {
    fn from(e: EncryptorError) -> Self {
        crate::error::Error::CryptoError(e.to_string())
    }
}

pub type EncryptorResult<T> = std::result::Result<T, EncryptorError>;

pub trait EncryptorT: std::fmt::Debug + Send + Sync {
    fn gen_secret(&self) -> SecretKey;

    /// Encrypt for the node at `addr`, or for ourselves when `None`.
    fn encrypt(&self, addr: Option<&str>, text: &[u8]) -> EncryptorResult<Vec<u8>>;

    fn decrypt(&self, text: &[u8]) -> EncryptorResult<Vec<u8>>;

    /// Apply a symmetric secret to the buffer in place.  Applying the
    /// same secret twice must restore the buffer.
    fn apply(&self, secret: &SecretKey, buf: &mut [u8]);

    fn apply_multi(&self, secrets: Vec<SecretKey>, buf: &mut [u8]);

    fn shuffle(&self, items: &mut Vec<Ciphertext>);

    fn digest(&self, text: &[u8]) -> SecretDigest;

    /// Open ciphertexts with their collected secrets.  Each decrypted
    /// value must be one of `valid_options`.
    fn decrypt_with_secrets(
        &self,
        ciphertext_map: HashMap<usize, Ciphertext>,
        mut secret_map: HashMap<usize, Vec<SecretKey>>,
        valid_options: &[String],
    ) -> EncryptorResult<HashMap<usize, String>> {
        let mut ret = HashMap::new();
        for (i, mut buf) in ciphertext_map.into_iter() {
            let secrets = secret_map.remove(&i).ok_or(EncryptorError::MissingSecret)?;
            self.apply_multi(secrets, &mut buf);
            let value = String::from_utf8(buf).or(Err(EncryptorError::DecodeFailed))?;
            if !valid_options.contains(&value) {
                return Err(EncryptorError::InvalidResult(value));
            }
            ret.insert(i, value);
        }
        Ok(ret)
    }
}

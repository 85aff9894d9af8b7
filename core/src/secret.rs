use std::sync::Arc;

use crate::encryptor::EncryptorT;
use crate::error::{Error, Result};
use crate::random::RandomState;
use crate::types::{Ciphertext, SecretDigest, SecretKey};

/// One node's private keys for one randomness: the mask key used in
/// the masking round and one lock key per item.  This is the secret
/// counterpart of the public [`RandomState`].
#[derive(Debug)]
pub struct SecretState {
    encryptor: Arc<dyn EncryptorT>,
    pub mask: SecretKey,
    pub lock_keys: Vec<SecretKey>,
    pub size: usize,
}

impl SecretState {
    pub fn new(encryptor: Arc<dyn EncryptorT>, size: usize) -> Self {
        let mask = encryptor.gen_secret();
        let lock_keys = std::iter::repeat_with(|| encryptor.gen_secret())
            .take(size)
            .collect();
        Self {
            encryptor,
            mask,
            lock_keys,
            size,
        }
    }

    pub fn from_random_state(encryptor: Arc<dyn EncryptorT>, random_state: &RandomState) -> Self {
        Self::new(encryptor, random_state.size)
    }

    pub fn get_key(&self, index: usize) -> Result<SecretKey> {
        self.lock_keys
            .get(index)
            .cloned()
            .ok_or(Error::InvalidKeyIndex)
    }

    /// Add our mask layer over every ciphertext.
    pub fn mask(&self, mut ciphertexts: Vec<Ciphertext>) -> Result<Vec<Ciphertext>> {
        if ciphertexts.len() != self.size {
            return Err(Error::InvalidCiphertextsSize);
        }
        for c in ciphertexts.iter_mut() {
            self.encryptor.apply(&self.mask, c.as_mut());
        }
        Ok(ciphertexts)
    }

    /// Remove our mask layer.  The mask transform is an involution, so
    /// this is the same application again.
    pub fn unmask(&self, ciphertexts: Vec<Ciphertext>) -> Result<Vec<Ciphertext>> {
        self.mask(ciphertexts)
    }

    /// Replace our mask with per-item lock keys, committing to each
    /// key's digest.
    pub fn lock(&self, ciphertexts: Vec<Ciphertext>) -> Result<Vec<(Ciphertext, SecretDigest)>> {
        if ciphertexts.len() != self.size {
            return Err(Error::InvalidCiphertextsSize);
        }
        let mut ret = Vec::with_capacity(self.size);
        for (i, mut c) in ciphertexts.into_iter().enumerate() {
            let lock = &self.lock_keys[i];
            let digest = self.encryptor.digest(lock);
            self.encryptor.apply(lock, c.as_mut());
            ret.push((c, digest));
        }
        Ok(ret)
    }
}

use rand::seq::SliceRandom;
use rand::{thread_rng, RngCore};

use croupier_core::encryptor::{EncryptorResult, EncryptorT};
use croupier_core::types::{Ciphertext, SecretDigest, SecretKey};

const TEST_SECRET_LEN: usize = 16;

/// An [`EncryptorT`] for tests.  Masks and locks are XOR keystreams,
/// the digest is a real SHA-256, and transport encryption is the
/// identity.  Not cryptography; just the right algebra for the
/// protocol to go through its motions.
#[derive(Debug, Default)]
pub struct TestEncryptor {}

impl EncryptorT for TestEncryptor {
    fn gen_secret(&self) -> SecretKey {
        let mut secret = vec![0u8; TEST_SECRET_LEN];
        thread_rng().fill_bytes(&mut secret);
        secret
    }

    fn encrypt(&self, _addr: Option<&str>, text: &[u8]) -> EncryptorResult<Vec<u8>> {
        Ok(text.to_vec())
    }

    fn decrypt(&self, text: &[u8]) -> EncryptorResult<Vec<u8>> {
        Ok(text.to_vec())
    }

    fn apply(&self, secret: &SecretKey, buf: &mut [u8]) {
        for (i, b) in buf.iter_mut().enumerate() {
            *b ^= secret[i % secret.len()];
        }
    }

    fn apply_multi(&self, secrets: Vec<SecretKey>, buf: &mut [u8]) {
        for secret in secrets.iter() {
            self.apply(secret, buf);
        }
    }

    fn shuffle(&self, items: &mut Vec<Ciphertext>) {
        items.shuffle(&mut thread_rng());
    }

    fn digest(&self, text: &[u8]) -> SecretDigest {
        sha256::digest(text).into_bytes()
    }
}

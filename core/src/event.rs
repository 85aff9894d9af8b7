use borsh::{BorshDeserialize, BorshSerialize};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Addr, Ciphertext, RandomId, SecretDelivery, SecretDigest};

/// The event vocabulary spoken by the protocol drivers.  The context's
/// dispatch slot schedules one of these for later delivery.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
pub enum Event {
    /// Game-specific event sent by a player, JSON-encoded from a type
    /// implementing [`CustomEvent`].
    Custom { sender: Addr, raw: String },

    /// A node marks itself as ready for the next round.
    Ready { sender: Addr },

    /// A server hands over the secrets it owes.
    ShareSecrets {
        sender: Addr,
        shares: Vec<SecretDelivery>,
    },

    /// One masking round over a randomness.
    Mask {
        sender: Addr,
        random_id: RandomId,
        ciphertexts: Vec<Ciphertext>,
    },

    /// One locking round over a randomness.
    Lock {
        sender: Addr,
        random_id: RandomId,
        ciphertexts_and_digests: Vec<(Ciphertext, SecretDigest)>,
    },

    /// Every randomness in the session is ready.
    RandomnessReady,

    /// The start of a game round.
    GameStart,

    /// Timeout while waiting for the round to start.
    WaitTimeout,

    /// The listed addresses failed to act in time.
    OperationTimeout { addrs: Vec<Addr> },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Custom { sender, raw } => write!(f, "Custom from {}, inner: {}", sender, raw),
            Event::Ready { sender } => write!(f, "Ready from {}", sender),
            Event::ShareSecrets { sender, shares } => {
                write!(f, "ShareSecrets from {}, {} shares", sender, shares.len())
            }
            Event::Mask { sender, random_id, .. } => {
                write!(f, "Mask from {} for random {}", sender, random_id)
            }
            Event::Lock { sender, random_id, .. } => {
                write!(f, "Lock from {} for random {}", sender, random_id)
            }
            Event::RandomnessReady => write!(f, "RandomnessReady"),
            Event::GameStart => write!(f, "GameStart"),
            Event::WaitTimeout => write!(f, "WaitTimeout"),
            Event::OperationTimeout { addrs } => {
                write!(f, "OperationTimeout for {}", addrs.join(","))
            }
        }
    }
}

impl Event {
    pub fn custom<S: Into<String>, E: CustomEvent>(sender: S, e: &E) -> Result<Self> {
        Ok(Self::Custom {
            sender: sender.into(),
            raw: serde_json::to_string(e)?,
        })
    }
}

/// An application-defined event payload.
pub trait CustomEvent: Serialize + DeserializeOwned + Sized {}

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

pub type Addr = String;

pub type Amount = u64;

/// The key of a randomness within its game session.
pub type RandomId = usize;

pub type Ciphertext = Vec<u8>;

pub type SecretKey = Vec<u8>;

pub type SecretDigest = Vec<u8>;

/// Points to one secret share inside one randomness.
/// A `to_addr` of `None` stands for a public reveal.
#[derive(
    Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, BorshSerialize, BorshDeserialize,
    Serialize, Deserialize,
)]
pub struct SecretIdent {
    pub from_addr: Addr,
    pub to_addr: Option<Addr>,
    pub random_id: RandomId,
    pub index: usize,
}

impl SecretIdent {
    pub fn new_for_assigned<S: Into<String>>(
        random_id: RandomId,
        index: usize,
        from_addr: S,
        to_addr: S,
    ) -> Self {
        Self {
            from_addr: from_addr.into(),
            to_addr: Some(to_addr.into()),
            random_id,
            index,
        }
    }

    pub fn new_for_revealed<S: Into<String>>(random_id: RandomId, index: usize, from_addr: S) -> Self {
        Self {
            from_addr: from_addr.into(),
            to_addr: None,
            random_id,
            index,
        }
    }
}

/// A delivered secret, as it travels in a `ShareSecrets` event.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct SecretDelivery {
    pub from_addr: Addr,
    pub to_addr: Option<Addr>,
    pub random_id: RandomId,
    pub index: usize,
    pub secret: Vec<u8>,
}

impl SecretDelivery {
    pub fn new(ident: SecretIdent, secret: Vec<u8>) -> Self {
        Self {
            from_addr: ident.from_addr,
            to_addr: ident.to_addr,
            random_id: ident.random_id,
            index: ident.index,
            secret,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum SettleOp {
    Add(Amount),
    Sub(Amount),
    Eject,
}

/// A balance adjustment to be submitted on-chain after a game round.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Settle {
    pub addr: Addr,
    pub op: SettleOp,
}

impl Settle {
    pub fn add<S: Into<String>>(addr: S, amount: Amount) -> Self {
        Self {
            addr: addr.into(),
            op: SettleOp::Add(amount),
        }
    }

    pub fn sub<S: Into<String>>(addr: S, amount: Amount) -> Self {
        Self {
            addr: addr.into(),
            op: SettleOp::Sub(amount),
        }
    }

    pub fn eject<S: Into<String>>(addr: S) -> Self {
        Self {
            addr: addr.into(),
            op: SettleOp::Eject,
        }
    }
}

mod accounts;
mod common;

pub use accounts::GameAccount;

pub use common::{
    Addr, Amount, Ciphertext, RandomId, SecretDelivery, SecretDigest, SecretIdent, SecretKey,
    Settle, SettleOp,
};

pub use crate::context::{DispatchEvent, GameContext, GameStatus, Player, PlayerStatus, Server, ServerStatus};
pub use crate::encryptor::{EncryptorError, EncryptorResult, EncryptorT};
pub use crate::error::{Error, Result};
pub use crate::event::{CustomEvent, Event};
pub use crate::random::{
    CipherOwner, Lock, LockedCiphertext, Mask, MaskStatus, RandomSpec, RandomState, RandomStatus,
    SecretShare,
};
pub use crate::secret::SecretState;
pub use crate::types::{
    Addr, Amount, Ciphertext, GameAccount, RandomId, SecretDelivery, SecretDigest, SecretIdent,
    SecretKey, Settle, SettleOp,
};
pub use borsh::{BorshDeserialize, BorshSerialize};

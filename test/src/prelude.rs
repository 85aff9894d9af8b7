pub use crate::account_helpers::*;
pub use crate::client_helpers::*;
pub use crate::constants::*;
pub use crate::context_helpers::*;
pub use crate::encryptor_helpers::*;

pub use croupier_core::error::{Error, Result};
pub use croupier_core::event::Event;
pub use croupier_core::prelude::GameContext;
pub use croupier_core::random::{RandomSpec, RandomStatus};
pub use croupier_core::types::GameAccount;

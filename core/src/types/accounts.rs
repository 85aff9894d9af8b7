use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::common::Addr;

/// The on-chain snapshot of a game account, the input for
/// [`GameContext`](crate::context::GameContext) construction.
///
/// `transactor_addr` is `None` until a server claims the transactor
/// role; a game without a transactor cannot be served.
#[derive(
    Debug, Default, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct GameAccount {
    pub addr: Addr,
    pub title: String,
    pub bundle_addr: Addr,
    pub owner_addr: Addr,
    pub transactor_addr: Option<Addr>,
    pub server_addrs: Vec<Addr>,
    pub max_players: u16,
    pub access_version: u64,
    pub settle_version: u64,
    pub data: Vec<u8>,
}

use croupier_core::types::GameAccount;

use crate::constants::*;

pub fn game_account_addr() -> String {
    TEST_GAME_ACCOUNT_ADDR.into()
}

pub fn server_account_addr(idx: usize) -> String {
    SERVER_ADDRS[idx].to_owned()
}

pub fn player_account_addr(idx: usize) -> String {
    PLAYER_ADDRS[idx].to_owned()
}

/// Builds [`GameAccount`] snapshots for tests.  The first server added
/// becomes the transactor.
pub struct TestGameAccountBuilder {
    account: GameAccount,
}

impl Default for TestGameAccountBuilder {
    fn default() -> Self {
        let account = GameAccount {
            addr: game_account_addr(),
            title: "Unnamed".into(),
            bundle_addr: TEST_GAME_BUNDLE_ADDR.into(),
            owner_addr: TEST_OWNER_ADDR.into(),
            transactor_addr: None,
            server_addrs: vec![],
            max_players: 6,
            access_version: 0,
            settle_version: 0,
            data: vec![],
        };
        TestGameAccountBuilder { account }
    }
}

impl TestGameAccountBuilder {
    pub fn new() -> Self {
        TestGameAccountBuilder::default()
    }

    pub fn build(self) -> GameAccount {
        self.account
    }

    pub fn add_servers(mut self, num_of_servers: usize) -> Self {
        if self.account.server_addrs.len() + num_of_servers > SERVER_ADDRS.len() {
            panic!("only {} test servers available", SERVER_ADDRS.len());
        }
        for addr in SERVER_ADDRS
            .iter()
            .skip(self.account.server_addrs.len())
            .take(num_of_servers)
        {
            self.account.server_addrs.push((*addr).into());
            if self.account.transactor_addr.is_none() {
                self.account.transactor_addr = Some((*addr).into());
            }
        }
        self
    }

    pub fn with_max_players(mut self, max_players: u16) -> Self {
        self.account.max_players = max_players;
        self
    }
}

pub const TEST_GAME_ACCOUNT_ADDR: &str = "GAME_ACCOUNT_ADDR";
pub const TEST_GAME_BUNDLE_ADDR: &str = "GAME_BUNDLE_ADDR";
pub const TEST_OWNER_ADDR: &str = "GAME_OWNER_ADDR";

pub const SERVER_ADDRS: [&str; 3] = ["SERVER_ADDR_0", "SERVER_ADDR_1", "SERVER_ADDR_2"];

pub const PLAYER_ADDRS: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::event::{CustomEvent, Event};
use crate::random::{RandomSpec, RandomState, RandomStatus};
use crate::types::{Addr, Amount, Ciphertext, GameAccount, RandomId, SecretDelivery, SecretDigest, Settle};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum PlayerStatus {
    #[default]
    Absent,
    Ready,
    Disconnected,
    DropOff,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ServerStatus {
    #[default]
    Absent,
    Ready,
    DropOff,
}

/// The session lifecycle.  Driven one way by the event loop; only the
/// `Ready <-> WaitingSecrets` oscillation of the random states sits
/// below this.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum GameStatus {
    #[default]
    Uninit,
    Initializing,
    Waiting,
    Running,
    Sharing,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Player {
    pub addr: Addr,
    pub position: usize,
    pub status: PlayerStatus,
    pub balance: Amount,
}

impl Player {
    pub fn new<S: Into<String>>(addr: S, balance: Amount, position: usize) -> Self {
        Self {
            addr: addr.into(),
            position,
            status: PlayerStatus::Ready,
            balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Server {
    pub addr: Addr,
    pub status: ServerStatus,
}

impl Server {
    pub fn new<S: Into<String>>(addr: S) -> Self {
        Self {
            addr: addr.into(),
            status: ServerStatus::Absent,
        }
    }
}

/// A scheduled event.  The timeout is bookkeeping for the driver; this
/// core never fires timers.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DispatchEvent {
    pub timeout: u64,
    pub event: Event,
}

impl DispatchEvent {
    pub fn new(event: Event, timeout: u64) -> Self {
        Self { timeout, event }
    }
}

/// The public state of one game session: its players and servers, the
/// randomnesses created so far, and the single pending-dispatch slot.
/// Mutated only by the session's event loop, one event at a time.
#[derive(Debug, Default, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GameContext {
    pub(crate) game_addr: Addr,
    pub(crate) transactor_addr: Addr,
    pub(crate) status: GameStatus,
    pub(crate) players: Vec<Player>,
    pub(crate) servers: Vec<Server>,
    pub(crate) dispatch: Option<DispatchEvent>,
    pub(crate) random_states: Vec<RandomState>,
    pub(crate) settles: Option<Vec<Settle>>,
}

impl GameContext {
    pub fn try_new(game_account: &GameAccount) -> Result<Self> {
        let transactor_addr = game_account
            .transactor_addr
            .as_ref()
            .ok_or(Error::GameNotServed)?;

        Ok(Self {
            game_addr: game_account.addr.clone(),
            transactor_addr: transactor_addr.clone(),
            status: GameStatus::Uninit,
            players: Vec::new(),
            servers: game_account.server_addrs.iter().map(Server::new).collect(),
            dispatch: None,
            random_states: Vec::new(),
            settles: None,
        })
    }

    pub fn get_game_addr(&self) -> &str {
        &self.game_addr
    }

    pub fn get_transactor_addr(&self) -> &str {
        &self.transactor_addr
    }

    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    pub fn set_game_status(&mut self, status: GameStatus) {
        debug!("Game {} status: {:?}", self.game_addr, status);
        self.status = status;
    }

    pub fn get_players(&self) -> &[Player] {
        &self.players
    }

    pub fn get_servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn get_dispatch(&self) -> &Option<DispatchEvent> {
        &self.dispatch
    }

    /// Schedule an event, replacing whatever was scheduled before.  At
    /// most one dispatch is outstanding per session.
    pub fn dispatch_event(&mut self, event: Event, timeout: u64) {
        debug!("Game {} dispatch: {}", self.game_addr, event);
        self.dispatch = Some(DispatchEvent::new(event, timeout));
    }

    pub fn dispatch_custom_event<E: CustomEvent>(&mut self, e: &E, timeout: u64) -> Result<()> {
        let event = Event::custom(self.transactor_addr.clone(), e)?;
        self.dispatch_event(event, timeout);
        Ok(())
    }

    // Player directory

    pub fn get_player_by_address(&self, addr: &str) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.addr.eq(addr))
            .ok_or(Error::InvalidPlayerAddress)
    }

    pub fn add_player(&mut self, addr: &str, balance: Amount, position: usize) -> Result<()> {
        if self.players.iter().any(|p| p.addr.eq(addr)) {
            return Err(Error::PlayerAlreadyJoined);
        }
        self.players.push(Player::new(addr, balance, position));
        Ok(())
    }

    /// Remove every entry with this address.
    pub fn remove_player(&mut self, addr: &str) {
        self.players.retain(|p| p.addr.ne(addr));
    }

    pub fn set_player_status(&mut self, addr: &str, status: PlayerStatus) -> Result<()> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.addr.eq(addr))
            .ok_or(Error::InvalidPlayerAddress)?;
        player.status = status;
        Ok(())
    }

    // Randomness

    /// Create a new randomness owned by the current server set.  Ids
    /// follow creation order.
    pub fn init_random_state(&mut self, spec: RandomSpec) -> Result<RandomId> {
        let random_id = self.random_states.len();
        let owners: Vec<Addr> = self.servers.iter().map(|s| s.addr.clone()).collect();
        let random_state = RandomState::try_new(random_id, spec, &owners)?;
        debug!(
            "Game {} init random {} with {} owners",
            self.game_addr,
            random_id,
            random_state.owners.len()
        );
        self.random_states.push(random_state);
        Ok(random_id)
    }

    pub fn list_random_states(&self) -> &[RandomState] {
        &self.random_states
    }

    pub fn get_random_state(&self, random_id: RandomId) -> Result<&RandomState> {
        self.random_states
            .get(random_id)
            .ok_or(Error::InvalidRandomId)
    }

    pub fn get_random_state_mut(&mut self, random_id: RandomId) -> Result<&mut RandomState> {
        self.random_states
            .get_mut(random_id)
            .ok_or(Error::InvalidRandomId)
    }

    pub fn is_all_random_ready(&self) -> bool {
        self.random_states
            .iter()
            .all(|st| st.status == RandomStatus::Ready)
    }

    /// Apply one owner's masking round.
    pub fn randomize(
        &mut self,
        addr: &str,
        random_id: RandomId,
        ciphertexts: Vec<Ciphertext>,
    ) -> Result<()> {
        let random_state = self.get_random_state_mut(random_id)?;
        random_state.mask(addr, ciphertexts)?;
        Ok(())
    }

    /// Apply one owner's locking round.  Schedules `RandomnessReady`
    /// once the last randomness becomes ready.
    pub fn lock(
        &mut self,
        addr: &str,
        random_id: RandomId,
        ciphertexts_and_digests: Vec<(Ciphertext, SecretDigest)>,
    ) -> Result<()> {
        let random_state = self.get_random_state_mut(random_id)?;
        random_state.lock(addr, ciphertexts_and_digests)?;
        if self.is_all_random_ready() {
            self.dispatch_event(Event::RandomnessReady, 0);
        }
        Ok(())
    }

    pub fn assign(
        &mut self,
        random_id: RandomId,
        player_addr: &str,
        indexes: Vec<usize>,
    ) -> Result<()> {
        let random_state = self.get_random_state_mut(random_id)?;
        random_state.assign(player_addr, indexes)?;
        Ok(())
    }

    pub fn reveal(&mut self, random_id: RandomId, indexes: Vec<usize>) -> Result<()> {
        let random_state = self.get_random_state_mut(random_id)?;
        random_state.reveal(indexes)?;
        Ok(())
    }

    pub fn add_shared_secrets(&mut self, shares: Vec<SecretDelivery>) -> Result<()> {
        for share in shares.into_iter() {
            let random_state = self.get_random_state_mut(share.random_id)?;
            random_state.add_secret(share.from_addr, share.to_addr, share.index, share.secret)?;
        }
        Ok(())
    }

    pub fn add_revealed(
        &mut self,
        random_id: RandomId,
        revealed: HashMap<usize, String>,
    ) -> Result<()> {
        let random_state = self.get_random_state_mut(random_id)?;
        random_state
            .add_revealed(revealed)
            .map_err(|e| Error::InvalidDecryptedValue(e.to_string()))
    }

    pub fn get_revealed(&self, random_id: RandomId) -> Result<&HashMap<usize, String>> {
        Ok(self.get_random_state(random_id)?.get_revealed())
    }

    // Settlement

    pub fn settle(&mut self, settles: Vec<Settle>) {
        self.settles = Some(settles);
    }

    pub fn get_settles(&self) -> &Option<Vec<Settle>> {
        &self.settles
    }
}

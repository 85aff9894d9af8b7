//! # Randomization
//!
//! Mutually distrusting game servers jointly produce a verifiable
//! shuffle through a mask/lock commitment scheme.  Every owner first
//! re-encrypts (masks) the whole option list in turn, then replaces its
//! mask with per-item lock keys while committing to their digests.
//! Opening any item afterwards requires one secret share from every
//! owner, collected through [`RandomState::add_secret`].

use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

use crate::types::{Addr, Ciphertext, RandomId, SecretDigest, SecretIdent, SecretKey};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("no owners for randomness")]
    EmptyOwners,

    #[error("operation not allowed in status: {0:?}")]
    InvalidCipherStatus(RandomStatus),

    #[error("invalid mask provider, expected: {0}, actual: {1}")]
    InvalidMaskProvider(String, String),

    #[error("invalid lock provider, expected: {0}, actual: {1}")]
    InvalidLockProvider(String, String),

    #[error("duplicated mask")]
    DuplicatedMask,

    #[error("duplicated lock")]
    DuplicatedLock,

    #[error("invalid ciphertexts")]
    InvalidCiphertexts,

    #[error("invalid index: {0}")]
    InvalidIndex(usize),

    #[error("ciphertext already assigned: {0}")]
    AlreadyAssigned(usize),

    #[error("ciphertext already revealed: {0}")]
    AlreadyRevealed(usize),

    #[error("duplicated secret")]
    DuplicatedSecret,

    #[error("invalid secret")]
    InvalidSecret,

    #[error("secrets are not ready")]
    SecretsNotReady,
}

impl From<Error> for crate::error::Error {
    fn from(e: Error) -> Self {
        Self::RandomizationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The fixed, ordered universe of items to be randomized.  Indexes and
/// labels are fixed here once and for all; the shuffle itself emerges
/// from the masking rounds, never from this value.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub enum RandomSpec {
    ShuffledList { options: Vec<String> },
}

impl RandomSpec {
    pub fn shuffled_list(options: Vec<String>) -> Self {
        RandomSpec::ShuffledList { options }
    }

    /// The standard 52-card deck.
    /// Kinds are a, 2-9, t, j, q, k; suits are h, s, d, c.
    pub fn deck_of_cards() -> Self {
        let mut options = Vec::with_capacity(52);
        for suit in ["h", "s", "d", "c"] {
            for kind in [
                "a", "2", "3", "4", "5", "6", "7", "8", "9", "t", "j", "q", "k",
            ] {
                options.push(format!("{}{}", suit, kind));
            }
        }
        RandomSpec::ShuffledList { options }
    }

    pub fn as_options(self) -> Vec<String> {
        match self {
            RandomSpec::ShuffledList { options } => options,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            RandomSpec::ShuffledList { options } => options,
        }
    }

    pub fn size(&self) -> usize {
        self.options().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub enum MaskStatus {
    Required,
    Applied,
    Removed,
}

/// One mask layer per owner.  The status only ever advances
/// `Required -> Applied -> Removed`.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct Mask {
    pub status: MaskStatus,
    pub owner: Addr,
}

impl Mask {
    pub fn new<S: Into<String>>(owner: S) -> Self {
        Self {
            status: MaskStatus::Required,
            owner: owner.into(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.status == MaskStatus::Required
    }

    pub fn is_applied(&self) -> bool {
        self.status == MaskStatus::Applied
    }

    pub fn is_removed(&self) -> bool {
        self.status == MaskStatus::Removed
    }

    pub fn belongs_to<S: AsRef<str>>(&self, addr: S) -> bool {
        self.owner.eq(addr.as_ref())
    }
}

/// An owner's commitment to the lock key it applied to one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct Lock {
    pub digest: SecretDigest,
    pub owner: Addr,
}

impl Lock {
    pub fn new<S: Into<String>>(owner: S, digest: SecretDigest) -> Self {
        Self {
            digest,
            owner: owner.into(),
        }
    }
}

/// Who may eventually open a ciphertext.  An item is claimed at most
/// once; `MultiAssigned` is reserved in the wire format but produced by
/// no operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub enum CipherOwner {
    #[default]
    Unclaimed,
    Assigned(Addr),
    MultiAssigned(Vec<Addr>),
    Revealed,
}

/// The encrypted value stored at one index, with the locks deposited
/// over it during the locking round.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct LockedCiphertext {
    pub locks: Vec<Lock>,
    pub owner: CipherOwner,
    pub ciphertext: Ciphertext,
}

impl LockedCiphertext {
    pub fn new(text: Ciphertext) -> Self {
        Self {
            locks: vec![],
            owner: CipherOwner::Unclaimed,
            ciphertext: text,
        }
    }

    pub fn ciphertext(&self) -> &Ciphertext {
        &self.ciphertext
    }
}

/// One owner's obligation to hand over the key for one item, either to
/// a specific receiver or to the public (`to_addr` of `None`).
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct SecretShare {
    pub from_addr: Addr,
    pub to_addr: Option<Addr>,
    pub index: usize,
    pub secret: Option<SecretKey>,
}

impl SecretShare {
    pub fn new(from_addr: Addr, to_addr: Option<Addr>, index: usize) -> Self {
        Self {
            from_addr,
            to_addr,
            index,
            secret: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.secret.is_none()
    }
}

/// Non-terminal masking/locking states name the only address allowed
/// to act next.  A randomness oscillates between `Ready` and
/// `WaitingSecrets` once locked; there is no terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub enum RandomStatus {
    Masking(Addr),
    Locking(Addr),
    #[default]
    Ready,
    WaitingSecrets,
}

/// The public state of a single randomness.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct RandomState {
    pub id: RandomId,
    pub size: usize,
    pub owners: Vec<Addr>,
    pub options: Vec<String>,
    pub status: RandomStatus,
    pub masks: Vec<Mask>,
    pub ciphertexts: Vec<LockedCiphertext>,
    pub secret_shares: Vec<SecretShare>,
    pub revealed: HashMap<usize, String>,
}

impl RandomState {
    /// Create the randomness in its initial `Masking` state.  Each
    /// ciphertext is seeded with the option's raw bytes; the first
    /// masking round replaces them.
    pub fn try_new(id: RandomId, spec: RandomSpec, owners: &[Addr]) -> Result<Self> {
        let first_owner = owners.first().ok_or(Error::EmptyOwners)?;

        let options = spec.as_options();
        let size = options.len();

        let ciphertexts = options
            .iter()
            .map(|o| LockedCiphertext::new(o.as_bytes().to_owned()))
            .collect();

        let masks = owners.iter().map(Mask::new).collect();

        Ok(Self {
            id,
            size,
            owners: owners.to_owned(),
            options,
            status: RandomStatus::Masking(first_owner.clone()),
            masks,
            ciphertexts,
            secret_shares: Vec::new(),
            revealed: HashMap::new(),
        })
    }

    pub fn is_fully_masked(&self) -> bool {
        self.masks.iter().all(|m| !m.is_required())
    }

    pub fn is_fully_locked(&self) -> bool {
        self.masks.iter().all(|m| m.is_removed())
    }

    pub fn is_ready(&self) -> bool {
        self.status == RandomStatus::Ready
    }

    pub fn get_ciphertext(&self, index: usize) -> Option<&LockedCiphertext> {
        self.ciphertexts.get(index)
    }

    /// Apply one owner's masking round, overwriting every ciphertext in
    /// place.  Only the address named in the current `Masking` status
    /// may call this, with exactly one ciphertext per item.
    pub fn mask<S: AsRef<str>>(&mut self, addr: S, mut ciphertexts: Vec<Ciphertext>) -> Result<()> {
        let addr = addr.as_ref();
        let expected = match &self.status {
            RandomStatus::Masking(expected) => expected.clone(),
            _ => return Err(Error::InvalidCipherStatus(self.status.clone())),
        };
        if expected.ne(addr) {
            return Err(Error::InvalidMaskProvider(expected, addr.into()));
        }
        let mask_idx = self
            .masks
            .iter()
            .position(|m| m.belongs_to(addr))
            .ok_or(Error::InvalidMaskProvider(expected, addr.into()))?;
        if !self.masks[mask_idx].is_required() {
            return Err(Error::DuplicatedMask);
        }
        if ciphertexts.len() != self.ciphertexts.len() {
            return Err(Error::InvalidCiphertexts);
        }

        for c in self.ciphertexts.iter_mut() {
            c.ciphertext = ciphertexts.remove(0);
        }
        self.masks[mask_idx].status = MaskStatus::Applied;
        self.update_status();
        Ok(())
    }

    /// Apply one owner's locking round.  Replaces every ciphertext and
    /// deposits this owner's lock digest on each item, then removes the
    /// owner's mask.
    pub fn lock<S: AsRef<str>>(
        &mut self,
        addr: S,
        mut ciphertexts_and_digests: Vec<(Ciphertext, SecretDigest)>,
    ) -> Result<()> {
        let addr = addr.as_ref();
        let expected = match &self.status {
            RandomStatus::Locking(expected) => expected.clone(),
            _ => return Err(Error::InvalidCipherStatus(self.status.clone())),
        };
        if expected.ne(addr) {
            return Err(Error::InvalidLockProvider(expected, addr.into()));
        }
        let mask_idx = self
            .masks
            .iter()
            .position(|m| m.belongs_to(addr))
            .ok_or(Error::InvalidLockProvider(expected, addr.into()))?;
        if self.masks[mask_idx].is_removed() {
            return Err(Error::DuplicatedLock);
        }
        if ciphertexts_and_digests.len() != self.ciphertexts.len() {
            return Err(Error::InvalidCiphertexts);
        }

        for c in self.ciphertexts.iter_mut() {
            let (new_text, digest) = ciphertexts_and_digests.remove(0);
            c.ciphertext = new_text;
            c.locks.push(Lock::new(addr, digest));
        }
        self.masks[mask_idx].status = MaskStatus::Removed;
        self.update_status();
        Ok(())
    }

    /// Grant `addr` the eventual right to open the given items.  Every
    /// owner owes one secret share per item afterwards.
    pub fn assign<S: Into<String>>(&mut self, addr: S, indexes: Vec<usize>) -> Result<()> {
        if !matches!(
            self.status,
            RandomStatus::Ready | RandomStatus::WaitingSecrets
        ) {
            return Err(Error::InvalidCipherStatus(self.status.clone()));
        }

        for (n, i) in indexes.iter().enumerate() {
            let ciphertext = self.get_ciphertext(*i).ok_or(Error::InvalidIndex(*i))?;
            if !matches!(ciphertext.owner, CipherOwner::Unclaimed) || indexes[..n].contains(i) {
                return Err(Error::AlreadyAssigned(*i));
            }
        }

        let addr = addr.into();
        for i in indexes.into_iter() {
            self.ciphertexts[i].owner = CipherOwner::Assigned(addr.clone());
            for o in self.owners.iter() {
                self.secret_shares
                    .push(SecretShare::new(o.clone(), Some(addr.clone()), i));
            }
        }
        self.status = RandomStatus::WaitingSecrets;
        Ok(())
    }

    /// Publish the given items.  Every owner owes one public secret
    /// share per item afterwards.
    pub fn reveal(&mut self, indexes: Vec<usize>) -> Result<()> {
        if !matches!(
            self.status,
            RandomStatus::Ready | RandomStatus::WaitingSecrets
        ) {
            return Err(Error::InvalidCipherStatus(self.status.clone()));
        }

        for (n, i) in indexes.iter().enumerate() {
            let ciphertext = self.get_ciphertext(*i).ok_or(Error::InvalidIndex(*i))?;
            if matches!(ciphertext.owner, CipherOwner::Revealed) || indexes[..n].contains(i) {
                return Err(Error::AlreadyRevealed(*i));
            }
        }

        for i in indexes.into_iter() {
            self.ciphertexts[i].owner = CipherOwner::Revealed;
            for o in self.owners.iter() {
                self.secret_shares.push(SecretShare::new(o.clone(), None, i));
            }
        }
        self.status = RandomStatus::WaitingSecrets;
        Ok(())
    }

    /// Deliver one secret share.  A delivery that matches no share is
    /// ignored; a second delivery for the same share is rejected.  The
    /// randomness becomes `Ready` again once no share is pending.
    pub fn add_secret(
        &mut self,
        from_addr: Addr,
        to_addr: Option<Addr>,
        index: usize,
        secret: SecretKey,
    ) -> Result<()> {
        let share_idx = self.secret_shares.iter().position(|ss| {
            ss.from_addr.eq(&from_addr) && ss.to_addr.eq(&to_addr) && ss.index == index
        });
        if let Some(share_idx) = share_idx {
            if self.secret_shares[share_idx].secret.is_some() {
                return Err(Error::DuplicatedSecret);
            }
            if self.ciphertexts.get(index).is_none() {
                return Err(Error::InvalidSecret);
            }
            self.secret_shares[share_idx].secret = Some(secret);
            self.update_status();
        }
        Ok(())
    }

    /// Pending shares owed by `from_addr`.
    pub fn list_required_secrets_by_from_addr(&self, from_addr: &str) -> Vec<SecretIdent> {
        self.secret_shares
            .iter()
            .filter(|ss| ss.is_pending() && ss.from_addr.eq(from_addr))
            .map(|ss| SecretIdent {
                from_addr: ss.from_addr.clone(),
                to_addr: ss.to_addr.clone(),
                random_id: self.id,
                index: ss.index,
            })
            .collect()
    }

    /// Collect the publicly revealed secrets, grouped by item index.
    /// The secrets of one item keep their delivery order.
    pub fn list_revealed_secrets(&self) -> Result<HashMap<usize, Vec<SecretKey>>> {
        if self.status.ne(&RandomStatus::Ready) {
            return Err(Error::SecretsNotReady);
        }
        let mut ret: HashMap<usize, Vec<SecretKey>> = HashMap::new();
        for ss in self.secret_shares.iter().filter(|ss| ss.to_addr.is_none()) {
            if let Some(secret) = ss.secret.as_ref() {
                ret.entry(ss.index).or_default().push(secret.clone());
            }
        }
        Ok(ret)
    }

    /// Collect the secrets shared to `to_addr`, grouped by item index.
    pub fn list_shared_secrets(&self, to_addr: &str) -> Result<HashMap<usize, Vec<SecretKey>>> {
        if self.status.ne(&RandomStatus::Ready) {
            return Err(Error::SecretsNotReady);
        }
        let mut ret: HashMap<usize, Vec<SecretKey>> = HashMap::new();
        for ss in self
            .secret_shares
            .iter()
            .filter(|ss| matches!(&ss.to_addr, Some(a) if a.eq(to_addr)))
        {
            if let Some(secret) = ss.secret.as_ref() {
                ret.entry(ss.index).or_default().push(secret.clone());
            }
        }
        Ok(ret)
    }

    /// The ciphertexts currently assigned to `addr`, keyed by index.
    pub fn list_assigned_ciphertexts(&self, addr: &str) -> HashMap<usize, Ciphertext> {
        self.ciphertexts
            .iter()
            .enumerate()
            .filter_map(|(i, c)| match &c.owner {
                CipherOwner::Assigned(a) if a.eq(addr) => Some((i, c.ciphertext.clone())),
                _ => None,
            })
            .collect()
    }

    /// The publicly revealed ciphertexts, keyed by index.
    pub fn list_revealed_ciphertexts(&self) -> HashMap<usize, Ciphertext> {
        self.ciphertexts
            .iter()
            .enumerate()
            .filter_map(|(i, c)| match c.owner {
                CipherOwner::Revealed => Some((i, c.ciphertext.clone())),
                _ => None,
            })
            .collect()
    }

    /// Cache plaintext values reconstructed outside this state machine.
    /// All indexes are checked before anything is written.
    pub fn add_revealed(&mut self, revealed: HashMap<usize, String>) -> Result<()> {
        if let Some(index) = revealed.keys().find(|i| **i >= self.size) {
            return Err(Error::InvalidIndex(*index));
        }
        for (index, value) in revealed.into_iter() {
            self.revealed.entry(index).or_insert(value);
        }
        Ok(())
    }

    pub fn get_revealed(&self) -> &HashMap<usize, String> {
        &self.revealed
    }

    /// The addresses the protocol is currently waiting on.
    pub fn list_operating_addrs(&self) -> Vec<Addr> {
        match &self.status {
            RandomStatus::Masking(addr) => vec![addr.clone()],
            RandomStatus::Locking(addr) => vec![addr.clone()],
            RandomStatus::Ready => Vec::new(),
            RandomStatus::WaitingSecrets => self
                .secret_shares
                .iter()
                .filter(|ss| ss.is_pending())
                .map(|ss| ss.from_addr.clone())
                .collect(),
        }
    }

    fn update_status(&mut self) {
        if let Some(mask) = self.masks.iter().find(|m| m.is_required()) {
            self.status = RandomStatus::Masking(mask.owner.clone());
        } else if let Some(mask) = self.masks.iter().find(|m| m.is_applied()) {
            self.status = RandomStatus::Locking(mask.owner.clone());
        } else if self.secret_shares.iter().any(|ss| ss.is_pending()) {
            self.status = RandomStatus::WaitingSecrets;
        } else {
            self.status = RandomStatus::Ready;
        }
    }
}

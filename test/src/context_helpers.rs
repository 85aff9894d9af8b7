use croupier_core::error::{Error, Result};
use croupier_core::event::Event;
use croupier_core::prelude::GameContext;

use crate::account_helpers::TestGameAccountBuilder;
use crate::client_helpers::TestServer;

/// A context served by `num_of_servers` test servers, and the servers
/// driving it.
pub fn setup_context(num_of_servers: usize) -> (GameContext, Vec<TestServer>) {
    let account = TestGameAccountBuilder::new()
        .add_servers(num_of_servers)
        .build();
    let context = GameContext::try_new(&account).expect("failed to build context");
    let servers = (0..num_of_servers).map(TestServer::new).collect();
    (context, servers)
}

/// Feed one event into the context the way the event loop would.
pub fn apply_event(context: &mut GameContext, event: Event) -> Result<()> {
    match event {
        Event::Mask {
            sender,
            random_id,
            ciphertexts,
        } => context.randomize(&sender, random_id, ciphertexts),
        Event::Lock {
            sender,
            random_id,
            ciphertexts_and_digests,
        } => context.lock(&sender, random_id, ciphertexts_and_digests),
        Event::ShareSecrets { shares, .. } => context.add_shared_secrets(shares),
        _ => Ok(()),
    }
}

/// Exchange events between the servers and the context until no server
/// has anything left to submit.
pub fn drive_until_idle(context: &mut GameContext, servers: &mut [TestServer]) -> Result<()> {
    for _ in 0..100 {
        let mut events = Vec::new();
        for server in servers.iter_mut() {
            events.extend(server.handle_updated_context(context)?);
        }
        if events.is_empty() {
            return Ok(());
        }
        for event in events.into_iter() {
            apply_event(context, event)?;
        }
    }
    Err(Error::RandomizationError("protocol did not settle".into()))
}

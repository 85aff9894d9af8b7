//! Full protocol rounds driven in memory: masking, locking, public
//! reveals and private assignments, down to the decrypted values.

use anyhow::Result;
use borsh::BorshDeserialize;
use croupier_test::prelude::*;

fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}

#[test]
fn test_full_reveal_cycle() -> Result<()> {
    let (mut context, mut servers) = setup_context(3);
    let options = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
    let random_id = context.init_random_state(RandomSpec::shuffled_list(options.clone()))?;

    drive_until_idle(&mut context, &mut servers)?;
    assert!(context.is_all_random_ready());
    {
        let random_state = context.get_random_state(random_id)?;
        assert!(random_state.is_fully_masked());
        assert!(random_state.is_fully_locked());
        // every item carries one lock per server
        assert!(random_state.ciphertexts.iter().all(|c| c.locks.len() == 3));
    }

    context.reveal(random_id, vec![0, 1, 2, 3])?;
    drive_until_idle(&mut context, &mut servers)?;
    assert!(context.is_all_random_ready());

    let revealed = servers[0].decrypt_revealed(&context, random_id)?;
    assert_eq!(4, revealed.len());
    assert_eq!(sorted(revealed.values().cloned().collect()), sorted(options));

    // every server reconstructs the same values
    for server in servers.iter().skip(1) {
        assert_eq!(revealed, server.decrypt_revealed(&context, random_id)?);
    }

    context.add_revealed(random_id, revealed.clone())?;
    assert_eq!(&revealed, context.get_revealed(random_id)?);
    Ok(())
}

#[test]
fn test_assign_cycle() -> Result<()> {
    let (mut context, mut servers) = setup_context(2);
    let options = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let random_id = context.init_random_state(RandomSpec::shuffled_list(options.clone()))?;
    drive_until_idle(&mut context, &mut servers)?;

    let alice = player_account_addr(0);
    context.assign(random_id, &alice, vec![0, 2])?;
    {
        let random_state = context.get_random_state(random_id)?;
        assert_eq!(RandomStatus::WaitingSecrets, random_state.status);
        // two owners, two items
        assert_eq!(4, random_state.secret_shares.len());
    }
    drive_until_idle(&mut context, &mut servers)?;
    assert!(context.is_all_random_ready());

    let encryptor = TestEncryptor::default();
    let opened = decrypt_assigned(&encryptor, &context, random_id, &alice)?;
    assert_eq!(2, opened.len());
    assert!(opened.contains_key(&0) && opened.contains_key(&2));
    let mut values: Vec<String> = opened.values().cloned().collect();
    values.sort();
    values.dedup();
    assert_eq!(2, values.len());
    assert!(values.iter().all(|v| options.contains(v)));
    Ok(())
}

#[test]
fn test_deck_shuffle_reveals_every_card() -> Result<()> {
    let (mut context, mut servers) = setup_context(3);
    let spec = RandomSpec::deck_of_cards();
    let options: Vec<String> = spec.options().to_vec();
    let random_id = context.init_random_state(spec)?;
    drive_until_idle(&mut context, &mut servers)?;

    context.reveal(random_id, (0..52).collect())?;
    drive_until_idle(&mut context, &mut servers)?;

    let revealed = servers[0].decrypt_revealed(&context, random_id)?;
    assert_eq!(sorted(revealed.values().cloned().collect()), sorted(options));
    Ok(())
}

#[test]
fn test_context_serialize_roundtrip() -> Result<()> {
    let (mut context, mut servers) = setup_context(2);
    let options = vec!["a".to_string(), "b".to_string()];
    let random_id = context.init_random_state(RandomSpec::shuffled_list(options))?;
    drive_until_idle(&mut context, &mut servers)?;
    context.reveal(random_id, vec![1])?;

    let encoded = borsh::to_vec(&context).expect("serialize");
    let decoded = GameContext::try_from_slice(&encoded).expect("deserialize");
    assert_eq!(context, decoded);
    Ok(())
}

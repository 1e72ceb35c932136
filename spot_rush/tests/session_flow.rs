/// End-to-end round scenarios through the public engine API, covering the
/// reference configuration: order 7, 9-card grid, 3 points per match.
use spot_rush::{
    Card, CardId, GameSettings, GuessOutcome, LocalGame, PlayerName, Recipient, RoomId,
    ServerEvent, Session, SessionError, Status, matching,
};

/// Any three grid cards with one common symbol. A random 9-card layout of an
/// order-7 deck almost always holds several; callers restart the round until
/// one appears.
fn find_matching_triple(cards: &[Card]) -> Option<[CardId; 3]> {
    for i in 0..cards.len() {
        for j in (i + 1)..cards.len() {
            for k in (j + 1)..cards.len() {
                if matching::find_common_symbol(&[&cards[i], &cards[j], &cards[k]]).is_some() {
                    return Some([cards[i].id, cards[j].id, cards[k].id]);
                }
            }
        }
    }
    None
}

/// Three grid cards with no common symbol, for the wrong-guess path.
fn find_non_matching_triple(cards: &[Card]) -> Option<[CardId; 3]> {
    for i in 0..cards.len() {
        for j in (i + 1)..cards.len() {
            for k in (j + 1)..cards.len() {
                if matching::find_common_symbol(&[&cards[i], &cards[j], &cards[k]]).is_none() {
                    return Some([cards[i].id, cards[j].id, cards[k].id]);
                }
            }
        }
    }
    None
}

/// Restart until the dealt grid holds a matchable triple.
fn start_until_matchable(session: &mut Session, host: spot_rush::PlayerId) -> [CardId; 3] {
    for _ in 0..64 {
        session.start(host).unwrap();
        if let Some(triple) = find_matching_triple(session.grid().cards()) {
            return triple;
        }
    }
    panic!("no matchable layout dealt in 64 rounds");
}

#[test]
fn full_round_against_the_session_engine() {
    let mut session = Session::new(RoomId::new("E2E"), GameSettings::default());
    let host = session.join(PlayerName::new("ana")).unwrap();

    let triple = start_until_matchable(&mut session, host.id);
    assert_eq!(session.status(), Status::Playing);
    assert_eq!(session.grid().len(), 9);
    assert_eq!(session.deck_size(), 48);

    let before: Vec<CardId> = session.grid().cards().iter().map(|c| c.id).collect();
    let matched_slots = session.grid().resolve(&triple);
    assert_eq!(matched_slots.len(), 3);

    let outcome = session.guess(host.id, &triple);
    let GuessOutcome::Matched {
        symbol,
        card_ids,
        finished,
    } = outcome
    else {
        panic!("expected a match, got {outcome:?}");
    };
    assert!(!finished);

    let mut expected_ids = triple.to_vec();
    expected_ids.sort_unstable();
    let mut got_ids = card_ids.clone();
    got_ids.sort_unstable();
    assert_eq!(got_ids, expected_ids);

    let state = session.snapshot();
    assert_eq!(state.players[0].score, 3);
    assert_eq!(state.last_match, Some(symbol));
    assert_eq!(state.deck_size, 45);
    assert_eq!(state.grid.len(), 9);

    // Matched slots hold fresh cards; every other slot is untouched.
    for (slot, card) in state.grid.iter().enumerate() {
        if matched_slots.contains(&slot) {
            assert!(
                !before.contains(&card.id),
                "slot {slot} should hold a freshly drawn card"
            );
        } else {
            assert_eq!(card.id, before[slot], "slot {slot} should be untouched");
        }
    }
}

#[test]
fn wrong_guess_changes_nothing() {
    let mut session = Session::new(RoomId::new("E2E"), GameSettings::default());
    let host = session.join(PlayerName::new("ana")).unwrap();

    // Any dealt layout will do; a 9-card grid always has non-matching
    // triples to spare.
    session.start(host.id).unwrap();
    let triple = find_non_matching_triple(session.grid().cards())
        .expect("a 9-card layout always holds a non-matching triple");

    let before: Vec<CardId> = session.grid().cards().iter().map(|c| c.id).collect();
    assert_eq!(session.guess(host.id, &triple), GuessOutcome::Wrong);

    let state = session.snapshot();
    assert_eq!(state.players[0].score, 0);
    assert_eq!(state.deck_size, 48);
    assert_eq!(state.last_match, None);
    let after: Vec<CardId> = state.grid.iter().map(|c| c.id).collect();
    assert_eq!(after, before);
}

#[test]
fn stale_ids_are_ignored_not_penalized() {
    let mut session = Session::new(RoomId::new("E2E"), GameSettings::default());
    let host = session.join(PlayerName::new("ana")).unwrap();
    session.start(host.id).unwrap();

    // Card ids far outside the 0..57 range can never be on the grid.
    let outcome = session.guess(host.id, &[900, 901, 902]);
    assert_eq!(outcome, GuessOutcome::Ignored);
    assert_eq!(session.snapshot().players[0].score, 0);
}

#[test]
fn full_round_against_the_local_adapter() {
    let mut game = LocalGame::new(GameSettings::default());
    let (result, _) = game.join("ana");
    let host = result.unwrap();
    let (result, outgoing) = game.join("bo");
    let bo = result.unwrap();
    // bo's private joined event plus the room-wide snapshot.
    assert_eq!(outgoing.len(), 2);

    // Restart until a matchable layout lands, as a real lobby host would
    // mash the button.
    let mut triple = None;
    for _ in 0..64 {
        let outgoing = game.start(host.id);
        assert_eq!(outgoing.len(), 1);
        triple = find_matching_triple(&game.state().grid);
        if triple.is_some() {
            break;
        }
    }
    let triple = triple.expect("no matchable layout dealt in 64 rounds");

    let outgoing = game.guess(bo.id, &triple);
    assert_eq!(outgoing.len(), 2);
    assert_eq!(outgoing[0].to, Recipient::Room);
    assert!(matches!(
        &outgoing[0].event,
        ServerEvent::CorrectGuess { player_id, .. } if *player_id == bo.id
    ));
    assert!(matches!(outgoing[1].event, ServerEvent::GameState(_)));

    let state = game.state();
    let scores: Vec<u32> = state.players.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![0, 3]);
    assert_eq!(state.deck_size, 45);
}

#[test]
fn local_adapter_surfaces_join_errors() {
    let settings = GameSettings {
        max_players: 2,
        ..GameSettings::default()
    };
    let mut game = LocalGame::new(settings);
    game.join("ana").0.unwrap();
    game.join("bo").0.unwrap();

    let (result, outgoing) = game.join("cy");
    assert_eq!(result.unwrap_err(), SessionError::RoomFull);
    assert!(outgoing.is_empty());

    // A round in progress rejects joins outright.
    let host_id = game.state().players[0].id;
    game.start(host_id);
    let (result, _) = game.join("dee");
    assert_eq!(result.unwrap_err(), SessionError::GameInProgress);
}

//! Session tests - lifecycle, epoch boundaries, observation stream

use std::time::Duration;

use sumstack::core::GameState;
use sumstack::session::{ObservationMessage, Session, TickEvent};
use sumstack::types::{GameMode, RowOutcome, TickOutcome, TileId, TIME_LIMIT_SECS};

#[test]
fn test_session_lifecycle() {
    let (mut session, mut rx) = Session::new().unwrap();
    assert!(session.state().is_none());

    session.start(GameMode::Classic, 12345);
    assert_eq!(session.epoch(), 1);
    assert!(!session.timer_running());

    let obs = rx.try_recv().unwrap();
    assert_eq!(obs.epoch, 1);
    assert!(!obs.game_over);
}

#[test]
fn test_selection_streams_observations() {
    let (mut session, mut rx) = Session::new().unwrap();
    session.start(GameMode::Classic, 42);
    let first = rx.try_recv().unwrap();

    let id = first.ids[9][0];
    assert_ne!(id, 0);
    session.select_tile(TileId(id));

    let second = rx.try_recv().unwrap();
    assert_eq!(second.seq, first.seq + 1);
    assert_eq!(second.selected, vec![id]);
    assert_eq!(second.epoch, first.epoch);
}

#[test]
fn test_observation_serializes_to_line_json() {
    let (mut session, mut rx) = Session::new().unwrap();
    session.start(GameMode::Time, 7);
    let obs = rx.try_recv().unwrap();

    let line = serde_json::to_string(&obs).unwrap();
    assert!(!line.contains('\n'));

    let parsed: ObservationMessage = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed.target, obs.target);
    assert_eq!(parsed.values, obs.values);

    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["type"], "observation");
    assert_eq!(value["mode"], "time");
}

#[test]
fn test_restart_discards_stale_epoch_ticks() {
    let (mut session, _rx) = Session::new().unwrap();
    session.start(GameMode::Time, 1);
    let old_epoch = session.epoch();

    session.start(GameMode::Time, 2);

    // A tick scheduled under the old run must not touch the new one.
    assert_eq!(
        session.apply_tick(TickEvent { epoch: old_epoch }),
        TickOutcome::Ignored
    );
    assert_eq!(session.state().unwrap().time_left(), TIME_LIMIT_SECS);

    // The current epoch still ticks normally.
    assert_eq!(
        session.apply_tick(TickEvent {
            epoch: session.epoch()
        }),
        TickOutcome::Counting {
            remaining: TIME_LIMIT_SECS - 1
        }
    );
}

#[test]
fn test_timer_cancelled_on_loss() {
    let mut layout = [[0u8; 6]; 10];
    layout[0][0] = 9;
    let state = GameState::with_layout(GameMode::Time, 1, &layout, 15);

    let (mut session, mut rx) = Session::new().unwrap();
    session.restore(state);
    assert!(session.timer_running());
    let _ = rx.try_recv();

    assert_eq!(session.add_row(), RowOutcome::Overflowed);
    assert!(!session.timer_running());

    let obs = rx.try_recv().unwrap();
    assert!(obs.game_over);
}

#[test]
fn test_spawned_timer_drives_countdown_through_pump() {
    let (mut session, mut rx) = Session::new().unwrap();
    session.start(GameMode::Time, 9);
    let _ = rx.try_recv();

    // The interval's immediate first tick is swallowed, so well inside
    // the first second the queue is still empty.
    std::thread::sleep(Duration::from_millis(250));
    session.pump();
    assert_eq!(session.state().unwrap().time_left(), TIME_LIMIT_SECS);
    assert!(rx.try_recv().is_err());

    // Past the first period a real tick has crossed the channel.
    std::thread::sleep(Duration::from_millis(1100));
    session.pump();
    let left = session.state().unwrap().time_left();
    assert!(left < TIME_LIMIT_SECS);

    let mut last = None;
    while let Ok(obs) = rx.try_recv() {
        last = Some(obs);
    }
    assert_eq!(last.unwrap().time_left, left);
}

#[test]
fn test_full_time_mode_round_via_manual_ticks() {
    let (mut session, mut rx) = Session::new().unwrap();
    session.start(GameMode::Time, 321);
    let before = rx.try_recv().unwrap();
    let epoch = session.epoch();

    for _ in 0..TIME_LIMIT_SECS {
        session.apply_tick(TickEvent { epoch });
    }

    // Exactly one injection: one extra bottom row relative to the start.
    let after = session.snapshot().unwrap();
    let before_count = before.values.iter().flatten().filter(|&&v| v != 0).count();
    assert_eq!(after.tile_count(), before_count + 6);
    assert_eq!(after.time_left, TIME_LIMIT_SECS);
}

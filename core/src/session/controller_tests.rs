//! Tests for the session controller state machine.
//!
//! All timing runs on a `ManualClock` and all power-up rolls on a
//! `ScriptedRng`, so every path is deterministic.

use clickrush_types::PowerUpKind;

use crate::clock::ManualClock;
use crate::error::SessionError;
use crate::rng::{ClickRng, ScriptedRng};

use super::controller::{SessionController, SessionNotice};
use super::state::SessionPhase;

const START_MS: i64 = 1_700_000_000_000;

fn make_controller(rng: ScriptedRng) -> (SessionController<ManualClock, ScriptedRng>, ManualClock) {
    let clock = ManualClock::new(START_MS);
    let controller = SessionController::new(clock.clone(), rng);
    (controller, clock)
}

fn ended_notices(notices: &[SessionNotice]) -> usize {
    notices
        .iter()
        .filter(|n| matches!(n, SessionNotice::SessionEnded { .. }))
        .count()
}

#[test]
fn start_rejects_blank_name_and_zero_limit() {
    let (mut c, _clock) = make_controller(ScriptedRng::new());
    assert_eq!(c.start("   ", 10), Err(SessionError::EmptyName));
    assert_eq!(c.start("Ada", 0), Err(SessionError::InvalidTimeLimit));
    assert_eq!(c.phase(), SessionPhase::Idle);

    c.start("  Ada  ", 10).unwrap();
    assert_eq!(c.state().player_name, "Ada");
    assert_eq!(c.phase(), SessionPhase::Active);
}

#[test]
fn click_outside_a_session_is_rejected() {
    let (mut c, clock) = make_controller(ScriptedRng::new());
    assert_eq!(c.register_click().unwrap_err(), SessionError::NotActive);

    // Expired-but-not-yet-ticked sessions also reject clicks.
    c.start("Ada", 10).unwrap();
    clock.advance_secs(10);
    assert_eq!(c.register_click().unwrap_err(), SessionError::NotActive);
}

#[test]
fn session_clicks_sum_the_multiplier_at_each_call() {
    // Third click triggers Double; the activating click itself still
    // counts single.
    let mut rng = ScriptedRng::new();
    rng.script_activation(false)
        .script_activation(false)
        .script_activation(true)
        .script_kind(PowerUpKind::Double);
    let (mut c, _clock) = make_controller(rng);
    c.start("Ada", 30).unwrap();

    let mut expected = 0;
    for multiplier in [1, 1, 1, 2, 2] {
        let outcome = c.register_click().unwrap();
        assert_eq!(outcome.multiplier, multiplier);
        expected += multiplier;
    }
    assert_eq!(c.state().session_clicks, expected);
    assert_eq!(c.total_clicks(), expected);
}

#[test]
fn mega_counts_five_per_click() {
    let mut rng = ScriptedRng::new();
    rng.script_activation(true).script_kind(PowerUpKind::Mega);
    let (mut c, _clock) = make_controller(rng);
    c.start("Ada", 30).unwrap();

    c.register_click().unwrap(); // activates, counts 1
    let outcome = c.register_click().unwrap();
    assert_eq!(outcome.multiplier, 5);
    assert_eq!(c.state().session_clicks, 6);
}

#[test]
fn at_most_one_power_up_active() {
    // Both clicks are scripted to activate, but the second roll must
    // never be consulted while Double is still running.
    let mut rng = ScriptedRng::new();
    rng.script_activation(true)
        .script_activation(true)
        .script_kind(PowerUpKind::Double)
        .script_kind(PowerUpKind::Mega);
    let (mut c, _clock) = make_controller(rng);
    c.start("Ada", 30).unwrap();

    c.register_click().unwrap();
    c.register_click().unwrap();

    let up = c.state().active_power_up.expect("power-up active");
    assert_eq!(up.kind, PowerUpKind::Double);
    let activations = c
        .take_notices()
        .iter()
        .filter(|n| matches!(n, SessionNotice::PowerUpActivated { .. }))
        .count();
    assert_eq!(activations, 1);
}

#[test]
fn power_up_expires_on_tick_and_multiplier_reverts() {
    let mut rng = ScriptedRng::new();
    rng.script_activation(true).script_kind(PowerUpKind::Double);
    let (mut c, clock) = make_controller(rng);
    c.start("Ada", 30).unwrap();

    c.register_click().unwrap();
    clock.advance_secs(5);
    c.tick();
    assert!(c.state().active_power_up.is_none());
    assert!(
        c.take_notices()
            .iter()
            .any(|n| matches!(n, SessionNotice::PowerUpExpired { kind: PowerUpKind::Double }))
    );

    let outcome = c.register_click().unwrap();
    assert_eq!(outcome.multiplier, 1);
}

#[test]
fn slow_mo_extends_the_limit_once() {
    let mut rng = ScriptedRng::new();
    rng.script_activation(true).script_kind(PowerUpKind::SlowMo);
    let (mut c, clock) = make_controller(rng);
    c.start("Ada", 10).unwrap();

    c.register_click().unwrap();
    assert_eq!(c.state().time_limit_seconds, 13);

    // Ticks reflect the new limit immediately, and the bonus survives
    // the power-up's own expiry.
    clock.advance_secs(11);
    c.tick();
    assert_eq!(c.phase(), SessionPhase::Active);
    assert_eq!(c.snapshot().remaining_secs, 2);
    assert!(c.state().active_power_up.is_none());
    assert_eq!(c.state().time_limit_seconds, 13);

    clock.advance_secs(2);
    c.tick();
    assert_eq!(c.phase(), SessionPhase::Ending);
}

#[test]
fn countdown_is_monotonic_and_end_fires_once() {
    let (mut c, clock) = make_controller(ScriptedRng::new());
    c.start("Ada", 10).unwrap();

    let mut last_remaining = i64::MAX;
    for _ in 0..30 {
        clock.advance_ms(400);
        c.tick();
        let snap = c.snapshot();
        assert!(snap.remaining_secs <= last_remaining);
        last_remaining = snap.remaining_secs;
    }
    assert_eq!(c.phase(), SessionPhase::Ending);
    assert_eq!(ended_notices(&c.take_notices()), 1);

    // Repeated ticks after the end must not re-trigger it.
    for _ in 0..10 {
        clock.advance_ms(100);
        c.tick();
    }
    assert_eq!(ended_notices(&c.take_notices()), 0);
}

#[test]
fn ada_scenario_reports_average() {
    let (mut c, clock) = make_controller(ScriptedRng::new());
    c.start("Ada", 10).unwrap();
    for _ in 0..7 {
        c.register_click().unwrap();
    }
    assert_eq!(c.state().session_clicks, 7);

    clock.advance_secs(10);
    c.tick();
    let notices = c.take_notices();
    match notices.as_slice() {
        [SessionNotice::SessionEnded {
            session_clicks,
            average_cps,
        }] => {
            assert_eq!(*session_clicks, 7);
            assert!((average_cps - 0.7).abs() < f64::EPSILON);
        }
        other => panic!("expected a single end report, got {other:?}"),
    }
}

#[test]
fn reset_clears_state_and_pending_expiry() {
    let mut rng = ScriptedRng::new();
    rng.script_activation(true).script_kind(PowerUpKind::Mega);
    let (mut c, clock) = make_controller(rng);
    c.start("Ada", 10).unwrap();
    c.register_click().unwrap();
    assert!(c.state().active_power_up.is_some());

    c.reset();
    assert_eq!(c.phase(), SessionPhase::Idle);
    assert_eq!(c.state().session_clicks, 0);
    assert!(c.state().active_power_up.is_none());

    // The activation notice from before the reset is still deliverable.
    assert_eq!(
        c.take_notices(),
        vec![SessionNotice::PowerUpActivated {
            kind: PowerUpKind::Mega
        }]
    );

    // Advance past the original expiry: nothing new may fire.
    clock.advance_secs(10);
    c.tick();
    assert!(c.take_notices().is_empty());
    assert_eq!(c.phase(), SessionPhase::Idle);
}

#[test]
fn end_report_survives_an_immediate_restart() {
    let (mut c, clock) = make_controller(ScriptedRng::new());
    c.start("Ada", 10).unwrap();
    c.register_click().unwrap();
    clock.advance_secs(10);
    c.tick();
    assert_eq!(c.phase(), SessionPhase::Ending);

    // Restart before the driving loop drains: the report must still
    // come out of the queue.
    c.start("Grace", 10).unwrap();
    assert_eq!(ended_notices(&c.take_notices()), 1);
    assert_eq!(c.state().player_name, "Grace");
    assert_eq!(c.state().session_clicks, 0);
}

#[test]
fn reset_is_safe_from_any_phase() {
    let (mut c, clock) = make_controller(ScriptedRng::new());
    c.reset(); // Idle

    c.start("Ada", 1).unwrap();
    clock.advance_secs(1);
    c.tick();
    assert_eq!(c.phase(), SessionPhase::Ending);
    c.reset(); // Ending
    assert_eq!(c.phase(), SessionPhase::Idle);
}

#[test]
fn total_clicks_accumulates_across_sessions() {
    let (mut c, clock) = make_controller(ScriptedRng::new());
    c.start("Ada", 10).unwrap();
    c.register_click().unwrap();
    c.register_click().unwrap();
    clock.advance_secs(10);
    c.tick();
    c.reset();

    c.start("Ada", 10).unwrap();
    c.register_click().unwrap();
    assert_eq!(c.state().session_clicks, 1);
    assert_eq!(c.total_clicks(), 3);
}

#[test]
fn rate_limit_notice_is_one_time_and_leaves_counters_alone() {
    let (mut c, _clock) = make_controller(ScriptedRng::new());
    c.start("Ada", 10).unwrap();
    c.register_click().unwrap();

    c.note_rate_limited("Too many clicks! Slow down.");
    c.note_rate_limited("Too many clicks! Slow down.");
    let warnings = c
        .take_notices()
        .iter()
        .filter(|n| matches!(n, SessionNotice::RateLimited { .. }))
        .count();
    assert_eq!(warnings, 1);
    assert_eq!(c.state().session_clicks, 1);
}

#[test]
fn snapshot_guards_divide_by_zero_and_clamps_remaining() {
    let (mut c, clock) = make_controller(ScriptedRng::new());
    c.start("Ada", 10).unwrap();
    c.register_click().unwrap();

    let snap = c.snapshot();
    assert_eq!(snap.elapsed_secs, 0);
    assert_eq!(snap.clicks_per_second, 0.0);

    clock.advance_secs(2);
    let snap = c.snapshot();
    assert_eq!(snap.clicks_per_second, 0.5);

    clock.advance_secs(20);
    c.tick();
    assert_eq!(c.snapshot().remaining_secs, 0);
}

#[test]
fn unused_scripted_rolls_stay_queued_while_power_up_active() {
    // Companion check for the exclusivity test: the roll queue is only
    // popped when the controller actually consults the RNG.
    let mut rng = ScriptedRng::new();
    rng.script_activation(true)
        .script_activation(true)
        .script_kind(PowerUpKind::Double);
    assert_eq!(rng.pending_activations(), 2);
    assert!(rng.roll_activation());
    assert_eq!(rng.pending_activations(), 1);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use proptest::prelude::*;
use std::time::Duration;
use yare::parameterized;

fn five_minutes() -> Timer {
    Timer::new(5 * MINUTE, None, false).with_id(TimerId(1))
}

fn in_state(state: TimerState, clock: &FakeClock) -> Timer {
    let timer = five_minutes();
    match state {
        TimerState::Reset => timer,
        TimerState::Running => timer.start(clock),
        TimerState::Paused => timer.start(clock).pause(clock),
        TimerState::Expired => timer.start(clock).expire(clock),
        TimerState::Missed => timer.start(clock).miss(clock),
    }
}

#[test]
fn new_timer_is_reset_with_full_remaining_time() {
    let clock = FakeClock::new();
    let timer = Timer::new(30_000, Some("tea".to_string()), true);
    assert!(timer.is_reset());
    assert_eq!(timer.id, None);
    assert_eq!(timer.total_length, 30_000);
    assert_eq!(timer.remaining_time(&clock), 30_000);
    assert_eq!(timer.expiration_time(), None);
}

#[test]
fn running_timer_counts_down() {
    let clock = FakeClock::new();
    let timer = five_minutes().start(&clock);
    clock.advance(Duration::from_secs(90));

    assert!(timer.is_running());
    assert_eq!(timer.remaining_time(&clock), 5 * MINUTE - 90_000);
    assert_eq!(timer.elapsed_time(&clock), 90_000);
    assert_eq!(
        timer.expiration_time(),
        Some(FakeClock::START_ELAPSED + 5 * MINUTE)
    );
    assert_eq!(
        timer.wall_clock_expiration_time(),
        Some(FakeClock::START_WALL + 5 * MINUTE)
    );
}

#[test]
fn pause_snapshots_remaining_time() {
    let clock = FakeClock::new();
    let timer = five_minutes().start(&clock);
    clock.advance(Duration::from_secs(60));
    let paused = timer.pause(&clock);

    assert!(paused.is_paused());
    assert_eq!(paused.last_remaining_time, 4 * MINUTE);
    assert_eq!(paused.last_start_time, None);
    assert_eq!(paused.last_wall_clock_time, None);

    clock.advance(Duration::from_secs(60));
    assert_eq!(paused.remaining_time(&clock), 4 * MINUTE);
}

#[test]
fn resume_keeps_remaining_time() {
    let clock = FakeClock::new();
    let paused = five_minutes().start(&clock).pause(&clock);
    clock.advance(Duration::from_secs(30));
    let resumed = paused.start(&clock);

    assert!(resumed.is_running());
    assert_eq!(resumed.remaining_time(&clock), 5 * MINUTE);
    assert_eq!(
        resumed.last_start_time,
        Some(FakeClock::START_ELAPSED + 30_000)
    );
}

#[parameterized(
    running = { TimerState::Running },
    expired = { TimerState::Expired },
    missed = { TimerState::Missed },
)]
fn start_is_noop_when_ticking(state: TimerState) {
    let clock = FakeClock::new();
    let timer = in_state(state, &clock);
    clock.advance(Duration::from_secs(5));
    assert_eq!(timer.start(&clock), timer);
}

#[parameterized(
    expired = { TimerState::Expired },
    missed = { TimerState::Missed },
)]
fn pause_of_finished_timer_resets(state: TimerState) {
    let clock = FakeClock::new();
    let timer = in_state(state, &clock);
    let paused = timer.pause(&clock);
    assert!(paused.is_reset());
    assert_eq!(paused.last_remaining_time, 5 * MINUTE);
    assert_eq!(paused.total_length, 5 * MINUTE);
}

#[parameterized(
    expired = { TimerState::Expired },
    reset = { TimerState::Reset },
    missed = { TimerState::Missed },
)]
fn expire_is_noop(state: TimerState) {
    let clock = FakeClock::new();
    let timer = in_state(state, &clock);
    assert_eq!(timer.expire(&clock), timer);
}

#[parameterized(
    reset = { TimerState::Reset },
    missed = { TimerState::Missed },
)]
fn miss_is_noop(state: TimerState) {
    let clock = FakeClock::new();
    let timer = in_state(state, &clock);
    assert_eq!(timer.miss(&clock), timer);
}

#[test]
fn expire_zeroes_total_and_clamps_remaining() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    clock.advance(Duration::from_secs(300));
    let expired = running.expire(&clock);

    assert!(expired.is_expired());
    assert_eq!(expired.total_length, 0);
    assert_eq!(expired.last_remaining_time, 0);
    assert_eq!(
        expired.last_start_time,
        Some(FakeClock::START_ELAPSED + 300_000)
    );

    clock.advance(Duration::from_secs(10));
    assert_eq!(expired.remaining_time(&clock), -10_000);
}

#[test]
fn expired_timer_can_be_missed() {
    let clock = FakeClock::new();
    let missed = in_state(TimerState::Expired, &clock).miss(&clock);
    assert!(missed.is_missed());
    assert_eq!(missed.total_length, 0);
}

#[parameterized(
    running = { TimerState::Running },
    paused = { TimerState::Paused },
    expired = { TimerState::Expired },
    missed = { TimerState::Missed },
    reset = { TimerState::Reset },
)]
fn reset_is_idempotent(state: TimerState) {
    let clock = FakeClock::new();
    let timer = in_state(state, &clock);
    let once = timer.reset();
    assert_eq!(once.reset(), once);
    assert!(once.is_reset());
    assert_eq!(once.last_remaining_time, once.length);
    assert_eq!(once.total_length, once.length);
}

#[parameterized(
    running = { TimerState::Running },
    paused = { TimerState::Paused },
    reset = { TimerState::Reset },
)]
fn pause_is_idempotent(state: TimerState) {
    let clock = FakeClock::new();
    let timer = in_state(state, &clock);
    clock.advance(Duration::from_secs(3));
    let once = timer.pause(&clock);
    clock.advance(Duration::from_secs(3));
    assert_eq!(once.pause(&clock), once);
}

#[test]
fn add_minute_restarts_expired_timer() {
    let clock = FakeClock::new();
    let expired = in_state(TimerState::Expired, &clock);
    clock.advance(Duration::from_secs(20));
    let restarted = expired.add_minute(&clock);

    assert!(restarted.is_running());
    assert_eq!(restarted.remaining_time(&clock), MINUTE);
    assert_eq!(restarted.total_length, MINUTE);
}

#[test]
fn add_minute_restarts_missed_timer() {
    let clock = FakeClock::new();
    let missed = in_state(TimerState::Missed, &clock);
    let restarted = missed.add_minute(&clock);
    assert!(restarted.is_running());
    assert_eq!(restarted.remaining_time(&clock), MINUTE);
}

#[test]
fn add_minute_extends_running_timer() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    clock.advance(Duration::from_secs(60));
    let extended = running.add_minute(&clock);

    assert!(extended.is_running());
    assert_eq!(extended.total_length, 6 * MINUTE);
    assert_eq!(extended.remaining_time(&clock), 5 * MINUTE);
}

#[test]
fn add_minute_ignores_reset_timer() {
    let clock = FakeClock::new();
    let timer = five_minutes();
    assert_eq!(timer.add_minute(&clock), timer);
}

#[test]
fn set_remaining_time_same_value_is_noop() {
    let clock = FakeClock::new();
    let paused = in_state(TimerState::Paused, &clock);
    assert_eq!(
        paused.set_remaining_time(paused.last_remaining_time, &clock),
        paused
    );
}

#[test]
fn set_remaining_time_non_positive_keeps_expired_state() {
    let clock = FakeClock::new();
    let expired = in_state(TimerState::Expired, &clock);
    let updated = expired.set_remaining_time(-5_000, &clock);
    assert!(updated.is_expired());
    assert_eq!(updated.last_remaining_time, -5_000);
    assert_eq!(updated.total_length, -5_000);
}

#[test]
fn set_length_on_reset_timer_resets_remaining() {
    let timer = five_minutes().set_length(2 * MINUTE);
    assert_eq!(timer.length, 2 * MINUTE);
    assert_eq!(timer.total_length, 2 * MINUTE);
    assert_eq!(timer.last_remaining_time, 2 * MINUTE);
}

#[test]
fn set_length_on_running_timer_only_changes_length() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    let updated = running.set_length(2 * MINUTE);
    assert_eq!(updated.length, 2 * MINUTE);
    assert_eq!(updated.total_length, 5 * MINUTE);
    assert_eq!(updated.last_remaining_time, 5 * MINUTE);
}

#[parameterized(
    at_minimum = { MIN_LENGTH },
    below_minimum = { 500 },
    negative = { -1 },
)]
fn set_length_rejects_short_lengths(length: i64) {
    let timer = five_minutes();
    assert_eq!(timer.set_length(length), timer);
}

#[test]
fn set_label_replaces_label() {
    let timer = five_minutes().set_label(Some("eggs".to_string()));
    assert_eq!(timer.label.as_deref(), Some("eggs"));
    assert_eq!(timer.set_label(Some("eggs".to_string())), timer);
}

#[test]
fn reboot_subtracts_wall_clock_downtime() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    clock.advance(Duration::from_secs(60));
    clock.reboot(Duration::from_secs(30));

    let recovered = running.update_after_reboot(&clock);
    assert!(recovered.is_running());
    assert_eq!(recovered.last_start_time, Some(0));
    assert_eq!(recovered.last_remaining_time, 5 * MINUTE - 90_000);
    assert_eq!(recovered.remaining_time(&clock), 5 * MINUTE - 90_000);
}

#[test]
fn reboot_with_stale_timer_goes_far_negative() {
    let clock = FakeClock::new();
    let running = Timer::new(5_000, None, false)
        .with_id(TimerId(3))
        .start(&clock);
    clock.reboot(Duration::from_millis(125_000));

    let recovered = running.update_after_reboot(&clock);
    assert_eq!(recovered.remaining_time(&clock), -120_000);
    assert!(recovered.remaining_time(&clock) < MISSED_THRESHOLD);
}

#[test]
fn reboot_ignores_backwards_wall_clock() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    clock.reboot(Duration::ZERO);
    clock.set_wall_clock(FakeClock::START_WALL - 3_600_000);

    let recovered = running.update_after_reboot(&clock);
    assert_eq!(recovered.last_remaining_time, 5 * MINUTE);
}

#[parameterized(
    reset = { TimerState::Reset },
    paused = { TimerState::Paused },
)]
fn clock_updates_skip_idle_timers(state: TimerState) {
    let clock = FakeClock::new();
    let timer = in_state(state, &clock);
    clock.reboot(Duration::from_secs(10));
    assert_eq!(timer.update_after_reboot(&clock), timer);
    assert_eq!(timer.update_after_time_set(&clock), timer);
}

#[test]
fn time_set_rebases_on_boot_clock() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    clock.advance(Duration::from_secs(60));
    clock.set_wall_clock(FakeClock::START_WALL + 86_400_000);

    let updated = running.update_after_time_set(&clock);
    assert_eq!(updated.last_remaining_time, 4 * MINUTE);
    assert_eq!(
        updated.last_start_time,
        Some(FakeClock::START_ELAPSED + 60_000)
    );
    assert_eq!(
        updated.last_wall_clock_time,
        Some(FakeClock::START_WALL + 86_400_000)
    );
    assert_eq!(updated.remaining_time(&clock), 4 * MINUTE);
}

#[test]
fn time_set_before_reboot_recovery_is_ignored() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    clock.reboot(Duration::from_secs(5));
    assert_eq!(running.update_after_time_set(&clock), running);
}

#[test]
fn remaining_time_ignores_boot_clock_going_backwards() {
    let clock = FakeClock::new();
    let running = five_minutes().start(&clock);
    clock.set_elapsed_realtime(0);
    assert_eq!(running.remaining_time(&clock), 5 * MINUTE);
}

#[test]
fn same_timer_compares_ids_only() {
    let clock = FakeClock::new();
    let a = five_minutes();
    let b = a.start(&clock);
    assert!(a.same_timer(&b));
    assert_ne!(a, b);
    assert!(!Timer::new(1, None, false).same_timer(&Timer::new(1, None, false)));
}

#[test]
fn state_ordinals_round_trip() {
    for state in [
        TimerState::Running,
        TimerState::Paused,
        TimerState::Expired,
        TimerState::Reset,
        TimerState::Missed,
    ] {
        assert_eq!(TimerState::from_ordinal(state.ordinal()), Some(state));
    }
    assert_eq!(TimerState::from_ordinal(0), None);
    assert_eq!(TimerState::from_ordinal(6), None);
}

#[test]
fn by_id_desc_sorts_newest_first() {
    let mut timers = vec![
        Timer::new(1_000, None, false).with_id(TimerId(1)),
        Timer::new(1_000, None, false).with_id(TimerId(3)),
        Timer::new(1_000, None, false).with_id(TimerId(2)),
    ];
    timers.sort_by(by_id_desc);
    let ids: Vec<_> = timers.iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![TimerId(3), TimerId(2), TimerId(1)]);
}

#[test]
fn by_expiry_ranks_states_then_remaining() {
    let clock = FakeClock::new();
    let reset_long = Timer::new(9 * MINUTE, None, false).with_id(TimerId(1));
    let reset_short = Timer::new(2 * MINUTE, None, false).with_id(TimerId(2));
    let running_long = Timer::new(8 * MINUTE, None, false)
        .with_id(TimerId(3))
        .start(&clock);
    let running_short = Timer::new(3 * MINUTE, None, false)
        .with_id(TimerId(4))
        .start(&clock);
    let paused = in_state(TimerState::Paused, &clock).with_id(TimerId(5));
    let expired = in_state(TimerState::Expired, &clock).with_id(TimerId(6));
    let missed = in_state(TimerState::Missed, &clock).with_id(TimerId(7));

    let mut timers = vec![
        reset_long,
        running_long,
        paused,
        reset_short,
        expired,
        running_short,
        missed,
    ];
    timers.sort_by(by_expiry);
    let ids: Vec<_> = timers.iter().filter_map(|t| t.id.map(|id| id.0)).collect();
    assert_eq!(ids, vec![7, 6, 4, 3, 5, 2, 1]);
}

proptest! {
    #[test]
    fn running_remaining_time_never_increases(
        length in 1_000i64..10_000_000,
        steps in proptest::collection::vec(0u64..100_000, 1..20),
    ) {
        let clock = FakeClock::new();
        let timer = Timer::new(length, None, false).with_id(TimerId(1)).start(&clock);
        let mut previous = timer.remaining_time(&clock);
        for step in steps {
            clock.advance(Duration::from_millis(step));
            let current = timer.remaining_time(&clock);
            prop_assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn elapsed_plus_remaining_is_total(
        length in 1_000i64..10_000_000,
        advance in 0u64..20_000_000,
    ) {
        let clock = FakeClock::new();
        let timer = Timer::new(length, None, false).start(&clock);
        clock.advance(Duration::from_millis(advance));
        prop_assert_eq!(
            timer.elapsed_time(&clock) + timer.remaining_time(&clock),
            timer.total_length
        );
    }
}

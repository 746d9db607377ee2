//! Integration tests for the sensor → threshold → relay → telemetry loop.
//!
//! These run on the host (x86_64) and drive [`Controller`] through
//! scripted reading sequences, asserting on relay commands, telemetry
//! lines and the tick / sample counters.

use super::mock_hw::{HUMIDITY, MockDelay, Reading, RecordingTelemetry, ScriptedHardware, fail, ok};

use proofbox::app::events::READ_FAILURE_LINE;
use proofbox::app::service::{Controller, StepOutcome};
use proofbox::config::ControllerConfig;

fn started(script: Vec<Reading>) -> (Controller, ScriptedHardware, RecordingTelemetry) {
    let mut ctl = Controller::new(ControllerConfig::default());
    let mut hw = ScriptedHardware::new(script);
    ctl.start(&mut hw);
    (ctl, hw, RecordingTelemetry::new())
}

fn run_steps(ctl: &mut Controller, hw: &mut ScriptedHardware, tele: &mut RecordingTelemetry, n: usize) {
    for _ in 0..n {
        ctl.step(hw, tele);
    }
}

// ── Scenario A: steady below-target readings ─────────────────

#[test]
fn below_target_energizes_and_first_record_follows_ten_ticks() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(23.0); 11]);

    ctl.step(&mut hw, &mut tele);
    assert!(ctl.heater_on(), "heater must be on after the first cold reading");
    assert!(hw.relay_on());

    // Iterations 2..=10: accumulator climbs to 500 without emitting.
    run_steps(&mut ctl, &mut hw, &mut tele, 9);
    assert!(tele.lines.is_empty(), "no telemetry before the threshold check");
    assert_eq!(ctl.tick_ms(), 500);
    assert_eq!(ctl.sample_index(), 0);

    // Iteration 11 sees tick == 500 and emits record 0.
    let outcome = ctl.step(&mut hw, &mut tele);
    assert!(matches!(outcome, StepOutcome::Sampled { record: Some(_), .. }));
    assert_eq!(tele.lines, vec![format!("0 23.0 {:.1}", HUMIDITY)]);
    assert_eq!(ctl.sample_index(), 1);
    assert_eq!(ctl.tick_ms(), 50, "reset to 0 then advanced by one tick");
    assert!(hw.relay_on());
}

#[test]
fn records_repeat_every_ten_iterations() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(23.0); 41]);

    run_steps(&mut ctl, &mut hw, &mut tele, 41);

    assert_eq!(
        tele.lines,
        vec![
            "0 23.0 61.5".to_owned(),
            "1 23.0 61.5".to_owned(),
            "2 23.0 61.5".to_owned(),
            "3 23.0 61.5".to_owned(),
        ]
    );
    assert_eq!(ctl.sample_index(), 4);
}

// ── Scenario B: reading exactly on target ────────────────────

#[test]
fn on_target_reading_from_off_stays_off() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(24.0)]);

    ctl.step(&mut hw, &mut tele);

    assert_eq!(hw.relay_writes, vec![false], "only the start-up write");
    assert!(!ctl.heater_on());
}

#[test]
fn on_target_reading_from_on_stays_on() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(22.0), ok(24.0), ok(24.0)]);

    run_steps(&mut ctl, &mut hw, &mut tele, 3);

    assert_eq!(hw.relay_writes, vec![false, true]);
    assert!(ctl.heater_on());
}

#[test]
fn above_target_de_energizes() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(22.0), ok(24.1)]);

    ctl.step(&mut hw, &mut tele);
    assert!(hw.relay_on());
    ctl.step(&mut hw, &mut tele);
    assert!(!hw.relay_on());
    assert!(!ctl.heater_on());
}

#[test]
fn every_successful_decision_rewrites_the_relay() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(20.0); 3]);

    run_steps(&mut ctl, &mut hw, &mut tele, 3);

    assert_eq!(hw.relay_writes, vec![false, true, true, true]);
}

// ── Scenario C: failure between two successes ────────────────

#[test]
fn failure_in_the_middle_freezes_relay_and_keeps_ticking() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(22.0), fail(), ok(22.0)]);

    ctl.step(&mut hw, &mut tele);
    assert!(tele.lines.is_empty());
    assert_eq!(ctl.tick_ms(), 50);

    let outcome = ctl.step(&mut hw, &mut tele);
    assert!(matches!(outcome, StepOutcome::ReadFailed(_)));
    assert_eq!(tele.lines, vec![READ_FAILURE_LINE.to_owned()]);
    assert_eq!(ctl.tick_ms(), 100);
    assert!(ctl.heater_on(), "relay state survives the failed read");
    assert_eq!(hw.relay_writes, vec![false, true], "no relay write on failure");

    ctl.step(&mut hw, &mut tele);
    assert_eq!(tele.lines.len(), 1, "diagnostic only on the failed iteration");
    assert_eq!(ctl.tick_ms(), 150);
    assert!(ctl.heater_on());
}

// ── Failure handling ─────────────────────────────────────────

#[test]
fn failure_diagnostics_are_not_rate_limited() {
    let (mut ctl, mut hw, mut tele) = started(vec![fail(); 15]);

    run_steps(&mut ctl, &mut hw, &mut tele, 15);

    assert_eq!(tele.lines.len(), 15);
    assert!(tele.lines.iter().all(|l| l == READ_FAILURE_LINE));
    assert_eq!(ctl.sample_index(), 0);
    assert_eq!(ctl.tick_ms(), 750);
    assert_eq!(hw.relay_writes, vec![false]);
}

#[test]
fn failed_ticks_count_towards_the_next_record() {
    let mut script = vec![fail(); 5];
    script.extend(vec![ok(25.0); 6]);
    let (mut ctl, mut hw, mut tele) = started(script);

    run_steps(&mut ctl, &mut hw, &mut tele, 11);

    assert_eq!(tele.data_lines(), vec!["0 25.0 61.5"]);
    assert_eq!(tele.lines.len(), 6, "five diagnostics plus one record");
}

#[test]
fn failure_on_the_due_iteration_skips_the_record_for_good() {
    let mut script = vec![ok(23.0); 10];
    script.push(fail());
    script.extend(vec![ok(23.0); 200]);
    let (mut ctl, mut hw, mut tele) = started(script);

    run_steps(&mut ctl, &mut hw, &mut tele, 211);

    assert!(tele.data_lines().is_empty(), "accumulator ran past the threshold");
    assert_eq!(ctl.sample_index(), 0);
    assert_eq!(ctl.tick_ms(), 211 * 50);
}

#[test]
fn sensor_is_read_exactly_once_per_iteration() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(23.0), fail(), ok(25.0)]);

    run_steps(&mut ctl, &mut hw, &mut tele, 3);

    assert_eq!(hw.reads, 3);
    assert_eq!(ctl.iterations(), 3);
}

// ── Cadence ──────────────────────────────────────────────────

#[test]
fn cycle_sleeps_one_poll_interval_after_each_iteration() {
    let (mut ctl, mut hw, mut tele) = started(vec![ok(23.0), fail()]);
    let mut delay = MockDelay::default();

    ctl.cycle(&mut hw, &mut tele, &mut delay);
    assert_eq!(delay.total_ns, 50_000_000);

    ctl.cycle(&mut hw, &mut tele, &mut delay);
    assert_eq!(delay.total_ns, 100_000_000, "failed iterations sleep too");
}

#[test]
fn custom_cadence_scales_the_threshold() {
    let config = ControllerConfig {
        poll_interval_ms: 100,
        telemetry_threshold_ms: 300,
        ..ControllerConfig::default()
    };
    let mut ctl = Controller::new(config);
    let mut hw = ScriptedHardware::new(vec![ok(23.0); 8]);
    let mut tele = RecordingTelemetry::new();
    ctl.start(&mut hw);

    run_steps(&mut ctl, &mut hw, &mut tele, 8);

    // Due on iterations 4 and 7.
    assert_eq!(tele.lines, vec!["0 23.0 61.5".to_owned(), "1 23.0 61.5".to_owned()]);
}

//! End-to-end control-side behavior, observed through the command log:
//! key events and tuning changes in, engine command sequences out.

use keytone::engine::{CommandLog, EngineCommand};
use keytone::keyboard::{KeyMap, KeyboardRouter};
use keytone::synth::Instrument;
use keytone::tuning::{Scale, TuningController};

const BACKTICK: u32 = 96; // degree 0
const KEY_1: u32 = 49; // degree 1
const KEY_EQUALS: u32 = 61; // degree 12

fn setup() -> (KeyboardRouter, TuningController, CommandLog) {
    let keymap = KeyMap::reference();
    let tuning = TuningController::default();
    let scale = Scale::compute(tuning.config(), keymap.degree_count());
    let router = KeyboardRouter::new(keymap, scale, Instrument::detuned());
    (router, tuning, CommandLog::new())
}

#[test]
fn press_builds_detuned_voice_at_degree_frequency() {
    let (mut router, _, mut log) = setup();

    router.on_key_down(KEY_EQUALS, &mut log);

    match &log.commands[0] {
        EngineCommand::CreateOscillator { partials, .. } => {
            assert_eq!(partials.len(), 2);
            // Degree 12 of the default 12edo scale is one octave up.
            assert!((partials[0] - 220.0).abs() < 1e-2);
            assert!((partials[1] - 220.0 * std::f32::consts::SQRT_2).abs() < 1e-2);
        }
        other => panic!("expected CreateOscillator, got {:?}", other),
    }
}

#[test]
fn release_mid_attack_overrides_with_release_ramp() {
    let (mut router, _, mut log) = setup();

    router.on_key_down(BACKTICK, &mut log);
    router.on_key_up(BACKTICK, &mut log);

    // One oscillator, then exactly two ramp plans on its signal:
    // attack-with-queued-decay, then a bare release to zero.
    let plans: Vec<_> = log
        .commands
        .iter()
        .filter_map(|c| match c {
            EngineCommand::SetRamp { plan, .. } => Some(plan),
            _ => None,
        })
        .collect();

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].first.target, 0.25);
    assert!(plans[0].then.is_some());
    assert_eq!(plans[1].first.target, 0.0);
    assert_eq!(plans[1].first.seconds, 0.5);
    assert!(plans[1].then.is_none());
}

#[test]
fn invalid_tuning_edit_changes_nothing() {
    let (mut router, mut tuning, mut log) = setup();

    router.on_key_down(BACKTICK, &mut log);
    let commands_before = log.commands.len();
    let scale_before = router.scale().clone();

    // Bad values never make it into the draft, let alone past an apply.
    assert!(tuning.set_steps(f32::NAN).is_err());
    assert!(tuning.set_base_frequency(-1.0).is_err());
    assert!(tuning.set_unison(0.5).is_err());

    assert_eq!(router.scale().frequencies(), scale_before.frequencies());
    assert_eq!(
        log.commands.len(),
        commands_before,
        "rejected edits must not touch any voice"
    );
    assert_eq!(tuning.config().base_frequency, 110.0);
}

#[test]
fn applying_new_base_rebuilds_only_active_degrees() {
    let (mut router, mut tuning, mut log) = setup();

    router.on_key_down(BACKTICK, &mut log);
    router.on_key_down(KEY_1, &mut log);
    router.on_key_up(KEY_1, &mut log);

    tuning.set_base_frequency(220.0).unwrap();
    tuning.apply_tuning(&mut router, &mut log).unwrap();

    let created: Vec<&Vec<f32>> = log
        .commands
        .iter()
        .filter_map(|c| match c {
            EngineCommand::CreateOscillator { partials, .. } => Some(partials),
            _ => None,
        })
        .collect();

    // Two initial builds plus two rebuilds; degree 0 now roots at 220.
    assert_eq!(created.len(), 4);
    assert!((created[2][0] - 220.0).abs() < 1e-2);

    let freed = log
        .commands
        .iter()
        .filter(|c| matches!(c, EngineCommand::FreeOscillator { .. }))
        .count();
    assert_eq!(freed, 2);
}

#[test]
fn equal_cents_apply_retunes_held_voice() {
    let (mut router, mut tuning, mut log) = setup();

    router.on_key_down(KEY_EQUALS, &mut log);

    tuning.set_scheme("eqcents");
    tuning.set_cents(100.0).unwrap();
    tuning.apply_tuning(&mut router, &mut log).unwrap();

    // cents=100 reproduces 12edo: degree 12 still roots at 220 Hz.
    assert!(!router.scale().fallback_applied());
    assert!((router.scale().frequency(12) - 220.0).abs() < 1e-2);

    let last_create = log
        .commands
        .iter()
        .rev()
        .find_map(|c| match c {
            EngineCommand::CreateOscillator { partials, .. } => Some(partials),
            _ => None,
        })
        .unwrap();
    assert!((last_create[0] - 220.0).abs() < 1e-2);
}

#[test]
fn unknown_scheme_applies_with_observable_fallback() {
    let (mut router, mut tuning, mut log) = setup();

    assert_eq!(tuning.set_scheme("pythagorean-ish"), None);
    tuning.apply_tuning(&mut router, &mut log).unwrap();

    assert!(router.scale().fallback_applied());
    assert!((router.scale().frequency(12) - 220.0).abs() < 1e-2);
}

#[test]
fn full_performance_sequence_is_well_formed() {
    let (mut router, mut tuning, mut log) = setup();

    // Play a chord, retune under it, keep playing, release everything.
    router.on_key_down(BACKTICK, &mut log);
    router.on_key_down(KEY_1, &mut log);
    router.on_key_down(KEY_1, &mut log); // auto-repeat

    tuning.set_scheme("eqdiv");
    tuning.set_steps(19.0).unwrap();
    tuning.apply_tuning(&mut router, &mut log).unwrap();

    router.on_key_down(KEY_EQUALS, &mut log);
    router.on_key_up(BACKTICK, &mut log);
    router.on_key_up(KEY_1, &mut log);
    router.on_key_up(KEY_EQUALS, &mut log);

    // 2 initial + 2 rebuilt + 1 new = 5 creates, 2 frees.
    assert_eq!(log.oscillator_count(), 5);
    assert_eq!(
        log.commands
            .iter()
            .filter(|c| matches!(c, EngineCommand::FreeOscillator { .. }))
            .count(),
        2
    );
    assert!(router.held_degrees().is_empty());
}

use rstest::rstest;
use stepctl_core::mocks::RecordingObserver;
use stepctl_core::{Direction, Stepper, ValidationError};

fn build(initial: f64, recorder: &RecordingObserver) -> Stepper {
    Stepper::builder()
        .with_limits(Some(0.0), Some(200.0))
        .with_step(10.0)
        .with_initial(initial)
        .with_observer(recorder.observer())
        .build()
        .unwrap()
}

#[rstest]
#[case(Direction::Up, 60.0)]
#[case(Direction::Down, 40.0)]
fn tap_moves_one_step(#[case] direction: Direction, #[case] expected: f64) {
    let recorder = RecordingObserver::new();
    let mut stepper = build(50.0, &recorder);
    stepper.tap(direction);
    assert_eq!(stepper.value(), expected);
    assert!(recorder.errors().is_empty());
}

#[test]
fn tap_past_the_maximum_clamps_and_reports() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(195.0, &recorder);

    stepper.tap(Direction::Up); // requests 205

    assert_eq!(stepper.value(), 200.0);
    assert_eq!(stepper.display_text(), "200");
    assert_eq!(recorder.errors(), vec![ValidationError::CrossedMax]);
    assert!(!stepper.can_step_up());
    assert!(stepper.can_step_down());
}

#[test]
fn tap_past_the_minimum_clamps_and_reports() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(5.0, &recorder);

    stepper.tap(Direction::Down);

    assert_eq!(stepper.value(), 0.0);
    assert_eq!(recorder.errors(), vec![ValidationError::CrossedMin]);
    assert!(!stepper.can_step_down());
}

#[test]
fn press_ticks_accelerate_one_multiplier_per_tick() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(40.0, &recorder);

    stepper.press_begin(Direction::Up);
    assert_eq!(stepper.value(), 50.0); // immediate step at multiplier 1

    stepper.press_tick(Direction::Up); // x1 -> 60
    stepper.press_tick(Direction::Up); // x2 -> 80
    stepper.press_tick(Direction::Up); // x3 -> 110
    stepper.press_end();

    assert_eq!(stepper.value(), 110.0);
    assert!(recorder.errors().is_empty());
}

#[test]
fn acceleration_resets_between_presses() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(0.0, &recorder);

    stepper.press_begin(Direction::Up); // 10
    stepper.press_tick(Direction::Up); // x1 -> 20
    stepper.press_tick(Direction::Up); // x2 -> 40
    stepper.press_end();

    stepper.press_begin(Direction::Up); // 50
    stepper.press_tick(Direction::Up); // back to x1 -> 60
    stepper.press_end();

    assert_eq!(stepper.value(), 60.0);
}

#[test]
fn crossing_the_limit_mid_press_snaps_and_aborts() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(150.0, &recorder);

    stepper.press_begin(Direction::Up); // 160
    stepper.press_tick(Direction::Up); // x1 -> 170
    stepper.press_tick(Direction::Up); // x2 -> 190
    stepper.press_tick(Direction::Up); // x3 -> 220, clamps to 200
    assert_eq!(stepper.value(), 200.0);
    assert!(!stepper.press_active());
    assert_eq!(recorder.errors(), vec![ValidationError::CrossedMax]);

    // late ticks from a not-yet-cancelled timer are dropped
    stepper.press_tick(Direction::Up);
    assert_eq!(stepper.value(), 200.0);

    // and the next press starts back at multiplier 1
    stepper.press_begin(Direction::Down);
    stepper.press_tick(Direction::Down);
    assert_eq!(stepper.value(), 180.0);
}

#[test]
fn a_new_press_begin_supersedes_the_old_gesture() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(0.0, &recorder);

    stepper.press_begin(Direction::Up); // 10
    stepper.press_tick(Direction::Up); // x1 -> 20
    stepper.press_tick(Direction::Up); // x2 -> 40

    stepper.press_begin(Direction::Up); // implicit end + fresh press -> 50
    stepper.press_tick(Direction::Up); // x1 again -> 60
    assert_eq!(stepper.value(), 60.0);
}

#[test]
fn ticks_in_the_wrong_direction_are_dropped() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(50.0, &recorder);
    stepper.press_begin(Direction::Up); // 60
    stepper.press_tick(Direction::Down);
    assert_eq!(stepper.value(), 60.0);
}

#[test]
fn stepping_while_editing_commits_the_text_first() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(0.0, &recorder);

    stepper.edit_begin();
    stepper.edit_candidate(0..1, "50");
    stepper.tap(Direction::Up);

    assert!(!stepper.is_editing());
    assert_eq!(stepper.value(), 60.0);
}

#[test]
fn set_limits_revalidates_the_current_value() {
    let recorder = RecordingObserver::new();
    let mut stepper = Stepper::builder()
        .with_step(10.0)
        .with_initial(150.0)
        .with_observer(recorder.observer())
        .build()
        .unwrap();

    stepper.set_limits(Some(0.0), Some(100.0)).unwrap();

    assert_eq!(stepper.value(), 100.0);
    assert_eq!(recorder.errors(), vec![ValidationError::CrossedMax]);
    assert!(!stepper.can_step_up());
}

#[test]
fn set_step_rederives_display_precision_and_revalidates() {
    let recorder = RecordingObserver::new();
    let mut stepper = Stepper::builder()
        .with_limits(Some(0.0), Some(10.0))
        .with_step(0.5)
        .with_initial(2.5)
        .with_observer(recorder.observer())
        .build()
        .unwrap();
    assert_eq!(stepper.display_text(), "2.5");

    stepper.set_step(1.0).unwrap();

    assert_eq!(recorder.errors(), vec![ValidationError::NonMultiple]);
    assert_eq!(stepper.value(), 2.0);
    assert_eq!(stepper.display_text(), "2");
}

#[test]
fn config_contract_violations_are_reported_not_applied() {
    let recorder = RecordingObserver::new();
    let mut stepper = build(50.0, &recorder);

    assert!(stepper.set_step(0.0).is_err());
    assert!(stepper.set_step(-1.0).is_err());
    assert!(stepper.set_step(f64::NAN).is_err());
    assert!(stepper.set_limits(Some(5.0), Some(1.0)).is_err());
    assert!(stepper.set_limits(Some(f64::NEG_INFINITY), None).is_err());

    // configuration unchanged by the failed calls
    assert_eq!(stepper.step(), 10.0);
    assert_eq!(stepper.value(), 50.0);
}

#[test]
fn builder_rejects_broken_contracts() {
    assert!(Stepper::builder().with_step(0.0).build().is_err());
    assert!(
        Stepper::builder()
            .with_limits(Some(2.0), Some(1.0))
            .build()
            .is_err()
    );
    assert!(
        Stepper::builder()
            .with_initial(f64::INFINITY)
            .build()
            .is_err()
    );
    assert!(
        Stepper::builder()
            .with_repeat_interval(std::time::Duration::ZERO)
            .build()
            .is_err()
    );
}

#[test]
fn builder_defaults_the_value_to_the_minimum() {
    let stepper = Stepper::builder()
        .with_limits(Some(20.0), Some(100.0))
        .with_step(10.0)
        .build()
        .unwrap();
    assert_eq!(stepper.value(), 20.0);
    assert_eq!(stepper.display_text(), "20");
}

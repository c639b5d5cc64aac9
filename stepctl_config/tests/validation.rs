use stepctl_config::load_toml;

#[test]
fn rejects_zero_step() {
    let toml = r#"
[limits]
min = 0.0
max = 200.0

[stepping]
step = 0.0
repeat_interval_ms = 200
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject step=0");
    assert!(format!("{err}").contains("stepping.step must be > 0"));
}

#[test]
fn rejects_swapped_limits() {
    let toml = r#"
[limits]
min = 100.0
max = 10.0

[stepping]
step = 1.0
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject min > max");
    assert!(format!("{err}").contains("limits.min must be <= limits.max"));
}

#[test]
fn rejects_zero_repeat_interval() {
    let toml = r#"
[stepping]
step = 1.0
repeat_interval_ms = 0
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject interval=0");
    assert!(format!("{err}").contains("repeat_interval_ms must be > 0"));
}

#[test]
fn rejects_unknown_rotation_policy() {
    let toml = r#"
[stepping]
step = 1.0

[logging]
file = "stepctl.log"
rotation = "weekly"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject rotation=weekly");
    assert!(format!("{err}").contains("logging.rotation"));
}

#[test]
fn accepts_a_complete_config() {
    let toml = r#"
[limits]
min = 0.0
max = 200.0

[stepping]
step = 10.0
repeat_interval_ms = 150
initial = 50.0

[display]
min_fraction_digits = 1

[logging]
level = "debug"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.limits.max, Some(200.0));
    assert_eq!(cfg.stepping.initial, Some(50.0));
    assert_eq!(cfg.display.min_fraction_digits, 1);
}

#[test]
fn empty_document_falls_back_to_defaults() {
    let cfg = load_toml("").expect("empty TOML is valid");
    cfg.validate().expect("defaults are valid");
    assert_eq!(cfg.stepping.step, 1.0);
    assert_eq!(cfg.stepping.repeat_interval_ms, 200);
    assert!(cfg.limits.min.is_none());
    assert!(cfg.limits.max.is_none());
}

#[test]
fn integer_literals_coerce_to_floats() {
    let toml = r#"
[limits]
min = 0
max = 200

[stepping]
step = 10
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.stepping.step, 10.0);
    assert_eq!(cfg.limits.max, Some(200.0));
}

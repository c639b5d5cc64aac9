//! Human-readable error descriptions and structured JSON error formatting.

/// Map an eyre::Report to a human-readable explanation with likely causes
/// and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use stepctl_core::ConfigError;

    // Typed matches first
    if let Some(ce) = err.downcast_ref::<ConfigError>() {
        return match ce {
            ConfigError::StepNotPositive => {
                "What happened: The step size is not a positive finite number.\nLikely causes: stepping.step missing, zero, or negative in the TOML, or a step: op with a bad value.\nHow to fix: Use a positive step (e.g. `step = 10.0`).".to_string()
            }
            ConfigError::MinAboveMax => {
                "What happened: The minimum limit is above the maximum.\nLikely causes: limits.min and limits.max swapped in the config or in a limits: op.\nHow to fix: Make sure min <= max (leave a side empty for unbounded).".to_string()
            }
            ConfigError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. Run `stepctl check` to see the effective settings."
            ),
        };
    }

    // String-based heuristics for errors coming from config loading or
    // script parsing
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("parse config toml") || lower.contains("toml parse") {
        return "What happened: The config file is not valid TOML.\nLikely causes: Syntax error or a value of the wrong type.\nHow to fix: Fix the TOML and rerun `stepctl check`.".to_string();
    }

    if lower.contains("unknown op") || lower.contains("bad tick count") || lower.contains("bad step")
    {
        return format!(
            "What happened: The --ops script could not be parsed.\nHow to fix: Use `+`, `-`, `hold+:N`, `hold-:N`, `edit:TEXT`, `step:X`, or `limits:LO..HI`. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Configuration-contract violations get a stable exit code; everything
/// else returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<stepctl_core::ConfigError>().is_some() {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;
    use stepctl_core::ConfigError;

    let reason = match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::StepNotPositive) => "step_not_positive",
        Some(ConfigError::MinAboveMax) => "min_above_max",
        Some(ConfigError::InvalidConfig(_)) => "invalid_config",
        None => "error",
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}

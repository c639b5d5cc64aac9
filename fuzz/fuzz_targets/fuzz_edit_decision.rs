#![no_main]
use libfuzzer_sys::fuzz_target;

use stepctl_core::Limits;
use stepctl_core::validate::{self, EditDecision};

fuzz_target!(|input: (String, usize, usize, String)| {
    let (current, start, end, inserted) = input;
    let limits = Limits::new(Some(-1000.0), Some(1000.0));
    // The decision must never panic, whatever the range or text looks like,
    // and every Allow must describe an edit the text can actually absorb.
    let decision = validate::should_accept_edit(limits, &current, start..end, &inserted);
    if decision == EditDecision::Allow {
        let mut text = current;
        text.replace_range(start..end, &inserted);
    }
});

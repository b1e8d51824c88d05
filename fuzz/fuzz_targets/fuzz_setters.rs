#![no_main]

use libfuzzer_sys::fuzz_target;
use sepa_pain::core::validation::{Field, check};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Every rule must either reject or return a value it accepts again.
        for field in Field::ALL {
            if let Ok(normalized) = check(*field, s) {
                assert_eq!(check(*field, &normalized).as_deref(), Ok(normalized.as_str()));
            }
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use uv_tidy::domain::value_objects::SortKey;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(key) = content.parse::<SortKey>() {
            assert_eq!(key.as_str().parse::<SortKey>().ok(), Some(key));
        }
    }
});

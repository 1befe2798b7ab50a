#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use uv_tidy::domain::value_objects::ExcludePatterns;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // One pattern per line; the first line doubles as the candidate path
        let candidate = content.lines().next().unwrap_or_default();
        if let Ok(patterns) = ExcludePatterns::new(content.lines()) {
            let _ = patterns.is_excluded(Path::new(candidate));
        }
    }
});

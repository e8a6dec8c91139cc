#![no_main]

use libfuzzer_sys::fuzz_target;

use kiln::domain::services::{resolve, IncludeExtractor};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let extractor = IncludeExtractor::new("@import");
        for found in extractor.matches(text) {
            assert!(found.span.end <= text.len());
            for token in &found.tokens {
                let _ = resolve(std::path::Path::new("/site"), token);
            }
        }
    }
});

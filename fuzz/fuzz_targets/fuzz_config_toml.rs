#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing must never panic, and a parsed config must resolve
        if let Ok(config) = toml::from_str::<kiln::Config>(content) {
            let _ = config.sass.to_options();
            let _ = config.build.effective_jobs();
        }
    }
});

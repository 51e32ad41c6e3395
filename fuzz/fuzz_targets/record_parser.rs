#![no_main]

use libfuzzer_sys::fuzz_target;
use seganalyze::loader::parse_record;
use seganalyze::metrics::RecordSource;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed documents must be rejected with an error, never a panic
        for source in [RecordSource::Attack, RecordSource::Performance] {
            if let Ok((config, _record)) = parse_record(source, input) {
                assert!(!config.is_empty());
            }
        }
    }
});

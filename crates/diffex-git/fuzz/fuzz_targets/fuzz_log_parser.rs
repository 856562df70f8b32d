#![no_main]

use diffex_git::log::{self, LogEntry};
use diffex_git::search;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let entries = log::parse(input);
        for entry in &entries {
            assert!(LogEntry::is_valid_hash(&entry.commit_hash));
            let _ = entry.summary();
        }
        let query = input.lines().next().unwrap_or("");
        assert!(search::filter(&entries, query).len() <= entries.len());
    }
});

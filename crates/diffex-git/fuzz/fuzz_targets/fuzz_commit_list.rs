#![no_main]

use diffex_git::refs::RefNormalizer;
use diffex_git::request::parse_commit_list;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data)
        && let Ok(commits) = parse_commit_list(input)
    {
        let normalizer = RefNormalizer::default();
        for commit in &commits {
            assert!(!commit.as_str().starts_with('-'));
            let once = normalizer.normalize(commit);
            assert_eq!(normalizer.normalize(&once), once);
            assert!(!commit.file_stem().contains('/'));
        }
    }
});

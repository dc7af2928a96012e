#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing never fails, and the parsed term must be usable by the matcher
    let spec = findex::query::parse_query(data);
    let matcher = findex::query::NameMatcher::new(&spec.term, spec.mode);
    let _ = matcher.is_match(data);
});

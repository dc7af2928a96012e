#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or be rejected, never panic
    if let Ok(snapshot) = findex::index::store::decode_snapshot(data) {
        let _ = snapshot.file_count() + snapshot.folder_count();
    }
});

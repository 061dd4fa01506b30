#![no_main]

use libfuzzer_sys::fuzz_target;
use rigbook::storage::{DEFAULT_STORAGE_KEY, MemoryStore};
use rigbook::store::ConfigStore;

fuzz_target!(|data: &[u8]| {
    // Arbitrary persisted data must load (possibly as empty) without panicking
    if let Ok(s) = std::str::from_utf8(data) {
        let mut store = ConfigStore::load(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, s));
        let _ = store.statistics();
        let _ = store.search("a");

        // Importing the same bytes must either fail cleanly or append one entry
        let before = store.len();
        if let Ok(persisted) = store.import(data) {
            assert!(persisted.is_saved());
            assert_eq!(store.len(), before + 1);
        }
    }
});

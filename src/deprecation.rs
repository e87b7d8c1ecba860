use log::warn;
use std::{collections::BTreeSet, sync::Mutex};

static EMITTED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// Logs `message` the first time `key` is seen in this process.
///
/// Returns whether the notice was emitted.
pub fn warn_once(key: &str, message: &str) -> bool {
    let mut emitted = EMITTED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if emitted.insert(key.to_string()) {
        warn!("deprecated: {message}");
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn notices_are_emitted_once_per_key() {
        assert!(warn_once("test-key-a", "a"));
        assert!(!warn_once("test-key-a", "a"));
        assert!(warn_once("test-key-b", "b"));
    }
}

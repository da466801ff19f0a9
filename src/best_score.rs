//! Persisted best score
//!
//! A single numeric value in LocalStorage, read once at startup and written
//! whenever the record is beaten. Absent or malformed values read as 0;
//! storage failures are logged and ignored.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "tower_best";

/// Parse a stored payload; anything that is not a JSON number reads as 0
pub fn parse_stored(raw: &str) -> u32 {
    serde_json::from_str(raw.trim()).unwrap_or(0)
}

/// Load the best score from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            let best = parse_stored(&raw);
            log::info!("Loaded best score: {}", best);
            return best;
        }
    }

    log::info!("No best score stored, starting at 0");
    0
}

/// Save the best score to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(best: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        match serde_json::to_string(&best) {
            Ok(raw) => {
                if storage.set_item(STORAGE_KEY, &raw).is_ok() {
                    log::info!("Best score saved: {}", best);
                } else {
                    log::warn!("Best score write failed");
                }
            }
            Err(e) => log::warn!("Best score serialize failed: {}", e),
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_best: u32) {
    // No-op for native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_stored("42"), 42);
        assert_eq!(parse_stored(" 7 "), 7);
        assert_eq!(parse_stored("0"), 0);
    }

    #[test]
    fn test_parse_garbage_reads_zero() {
        assert_eq!(parse_stored(""), 0);
        assert_eq!(parse_stored("best"), 0);
        assert_eq!(parse_stored("-3"), 0);
        assert_eq!(parse_stored("3.7"), 0);
        assert_eq!(parse_stored("{\"best\":5}"), 0);
    }
}

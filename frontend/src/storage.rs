use bookgate_core::FlagStore;
use web_sys::{window, Storage};

/// `FlagStore` over the browser's local storage. Storage being unavailable
/// (private mode, disabled cookies) reads as empty and drops writes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserStore;

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

impl FlagStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::error!("Failed to persist {}", key);
                }
            }
            None => log::warn!("Local storage unavailable, not persisting {}", key),
        }
    }
}

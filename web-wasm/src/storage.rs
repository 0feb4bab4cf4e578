//! localStorageと `storage` イベントによる既見セットストア

use fishy_dex_common::{ChangeNotifier, Error, KeyValueStore, Result, SeenStore};
use gloo::console;
use wasm_bindgen::JsValue;
use web_sys::{StorageEvent, StorageEventInit};

/// ブラウザで使う既見セットストア
pub type WebSeenStore = SeenStore<BrowserStorage, StorageEventNotifier>;

pub fn seen_store() -> WebSeenStore {
    SeenStore::new(BrowserStorage, StorageEventNotifier)
}

fn js_error(context: &str, e: JsValue) -> Error {
    Error::Storage(format!("{}: {:?}", context, e))
}

fn local_storage() -> Result<web_sys::Storage> {
    let window = web_sys::window().ok_or_else(|| Error::Storage("window がありません".into()))?;
    window
        .local_storage()
        .map_err(|e| js_error("localStorage にアクセスできません", e))?
        .ok_or_else(|| Error::Storage("localStorage が無効です".into()))
}

/// localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| js_error("読込失敗", e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let result = local_storage()?
            .set_item(key, value)
            .map_err(|e| js_error("保存失敗", e));
        if let Err(e) = &result {
            console::warn!(format!("[seen-store] {}", e));
        }
        result
    }
}

/// 同じドキュメント内のリスナーへ `storage` イベントを送る
///
/// 他タブへの通知はブラウザが `setItem` 時に行う。
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageEventNotifier;

fn dispatch_storage_event(key: &str) -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let init = StorageEventInit::new();
    init.set_key(Some(key));
    let event = StorageEvent::new_with_event_init_dict("storage", &init)?;
    window.dispatch_event(&event)?;
    Ok(())
}

impl ChangeNotifier for StorageEventNotifier {
    fn notify(&self, key: &str) {
        if let Err(e) = dispatch_storage_event(key) {
            console::warn!(format!("[seen-store] 通知失敗: {:?}", e));
        }
    }
}

/// `storage` イベントが既見セットのものか
pub fn is_seen_set_event(event: &StorageEvent) -> bool {
    event.key().as_deref() == Some(fishy_dex_common::SEEN_STORE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishy_dex_common::SEEN_STORE_KEY;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn malformed_local_storage_reads_empty() {
        local_storage().unwrap().set_item(SEEN_STORE_KEY, "not json").unwrap();
        assert!(seen_store().read().is_empty());
    }

    #[wasm_bindgen_test]
    fn toggle_round_trip() {
        let store = seen_store();
        store.set_seen("a", false);

        assert!(store.toggle("a"));
        assert_eq!(
            local_storage().unwrap().get_item(SEEN_STORE_KEY).unwrap().as_deref(),
            Some(r#"["a"]"#)
        );
        assert!(!store.toggle("a"));
        assert!(!store.contains("a"));
    }
}

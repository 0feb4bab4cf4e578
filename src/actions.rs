//! カード操作

use crate::api::ApiClient;
use chrono::Utc;
use fishy_dex_common::{CardState, ChangeNotifier, Fish, KeyValueStore, SeenStore};
use tracing::warn;

/// 既見状態を切り替える
///
/// 既見になった場合のみ最終目撃日時をリモート更新する。更新に失敗しても
/// 既見フラグは戻さず、表示中の日時もそのまま残す。
pub async fn toggle_seen<S, N>(client: &ApiClient, store: &SeenStore<S, N>, fish: &Fish) -> CardState
where
    S: KeyValueStore,
    N: ChangeNotifier,
{
    let mut card = CardState::mount(fish, store);
    let toggle = card.toggle(store);

    if toggle.needs_remote_update() {
        let result = client.update_last_seen(&fish.id, Utc::now()).await;
        if let Err(e) = &result {
            warn!(fish = %fish.id, error = %e, "failed to update last seen");
        }
        card.apply_remote_result(result);
    }

    card
}

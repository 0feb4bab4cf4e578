//! 画面表示前のセッション確認

use crate::api::ApiClient;
use crate::error::{FishyDexError, Result};
use tracing::debug;

/// セッションが無ければログイン先を示すエラーを返す
pub async fn require_session(client: &ApiClient) -> Result<()> {
    let login_url = client.endpoints().login();

    if client.session_token().is_none() {
        return Err(FishyDexError::NotLoggedIn(login_url));
    }

    if client.has_session().await? {
        debug!("session ok");
        Ok(())
    } else {
        Err(FishyDexError::NotLoggedIn(login_url))
    }
}

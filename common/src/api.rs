//! REST APIのエンドポイント定義とペイロード
//!
//! HTTPクライアント自体はCLI（reqwest）とWeb（fetch）でそれぞれ実装する。

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// 既定のAPIベースURL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5555";

/// セッションが無いときの遷移先
pub const LOGIN_ROUTE: &str = "/login";

/// APIエンドポイント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fishes(&self) -> String {
        format!("{}/api/fish", self.base_url)
    }

    pub fn diving_centers(&self) -> String {
        format!("{}/api/diving-centers", self.base_url)
    }

    pub fn last_seen(&self, fish_id: &str) -> String {
        format!("{}/api/fish/{}/last-seen", self.base_url, encode_segment(fish_id))
    }

    pub fn session(&self) -> String {
        format!("{}/api/auth/get-session", self.base_url)
    }

    pub fn login(&self) -> String {
        format!("{}{}", self.base_url, LOGIN_ROUTE)
    }
}

/// パスセグメントでそのまま使える文字以外をエンコードする
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// 最終目撃日時の更新リクエスト / レスポンス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSeenUpdate {
    pub timestamp: DateTime<Utc>,
}

/// セッション確認のレスポンス本文を判定する
///
/// JSONの `null` や解釈できない本文はセッション無しとみなす。
pub fn session_present(body: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Null) | Err(_) => false,
        Ok(serde_json::Value::Object(map)) => !map.is_empty(),
        Ok(_) => true,
    }
}

//! Fishy Dex REST APIクライアント
//!
//! - 一覧取得は失敗しても空の一覧を返す（ログのみ）
//! - 最終目撃日時の更新は1回だけ送る。再試行・タイムアウトなし

use crate::error::{FishyDexError, Result};
use chrono::{DateTime, Utc};
use fishy_dex_common::{session_present, DivingCenter, Endpoints, Fish, LastSeenUpdate};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub struct ApiClient {
    client: reqwest::Client,
    endpoints: Endpoints,
    session_token: Option<String>,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints, session_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
            session_token,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(FishyDexError::Server {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET");
        let resp = self.authorize(self.client.get(url)).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn try_fetch_fishes(&self) -> Result<Vec<Fish>> {
        let fishes: Vec<Fish> = self.get_json(&self.endpoints.fishes()).await?;
        info!(count = fishes.len(), "fetched fishes");
        Ok(fishes)
    }

    /// 魚の一覧。失敗時は空
    pub async fn fetch_fishes(&self) -> Vec<Fish> {
        self.try_fetch_fishes().await.unwrap_or_else(|e| {
            warn!(error = %e, "[fetch_fishes] failed");
            Vec::new()
        })
    }

    pub async fn try_fetch_diving_centers(&self) -> Result<Vec<DivingCenter>> {
        let centers: Vec<DivingCenter> = self.get_json(&self.endpoints.diving_centers()).await?;
        info!(count = centers.len(), "fetched diving centers");
        Ok(centers)
    }

    /// ダイビングセンターの一覧。失敗時は空
    pub async fn fetch_diving_centers(&self) -> Vec<DivingCenter> {
        self.try_fetch_diving_centers().await.unwrap_or_else(|e| {
            warn!(error = %e, "[fetch_diving_centers] failed");
            Vec::new()
        })
    }

    /// 最終目撃日時を更新し、サーバーが受理した日時を返す
    pub async fn update_last_seen(
        &self,
        fish_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let url = self.endpoints.last_seen(fish_id);
        debug!(url = %url, %timestamp, "PATCH last seen");
        let request = self.client.patch(&url).json(&LastSeenUpdate { timestamp });
        let resp = self.authorize(request).send().await?;
        let resp = Self::check_status(resp).await?;
        let echoed: LastSeenUpdate = resp.json().await?;
        Ok(echoed.timestamp)
    }

    /// セッションの有無を問い合わせる
    pub async fn has_session(&self) -> Result<bool> {
        let resp = self
            .authorize(self.client.get(self.endpoints.session()))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let body = resp.text().await?;
        Ok(session_present(&body))
    }
}

//! APIクライアントのテスト
//!
//! 取得失敗時の空一覧、リモート更新失敗時の挙動、セッション確認を検証

use chrono::{TimeZone, Utc};
use fishy_dex::actions::toggle_seen;
use fishy_dex::api::ApiClient;
use fishy_dex::error::FishyDexError;
use fishy_dex::session::require_session;
use fishy_dex_common::{
    format_last_seen, Broadcaster, Endpoints, Fish, MemoryStore, Rarity, SeenStore, Sighting,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 固定レスポンスを返すだけのHTTPサーバー
async fn serve(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// ヘッダーと本文を読み切る
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                return;
            }
        }
    }
}

/// 接続できないアドレス
async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn client(base_url: &str, token: Option<&str>) -> ApiClient {
    ApiClient::new(Endpoints::new(base_url), token.map(str::to_string))
}

fn clownfish(prior: Option<chrono::DateTime<Utc>>) -> Fish {
    Fish {
        id: "a".to_string(),
        name: "Clownfish".to_string(),
        rarity: Rarity::Common,
        latest_sighting: prior.map(|timestamp| Sighting {
            latitude: 1.0,
            longitude: 2.0,
            timestamp,
        }),
        image: String::new(),
    }
}

/// HTTP 500 → 空の一覧、エラーは伝播しない
#[tokio::test]
async fn test_fetch_fishes_server_error_is_empty() {
    let base = serve(500, r#"{"error":"boom"}"#).await;
    let api = client(&base, None);

    assert!(api.fetch_fishes().await.is_empty());

    let err = api.try_fetch_fishes().await.unwrap_err();
    assert!(matches!(err, FishyDexError::Server { status: 500, .. }));
}

/// 接続失敗 → 空の一覧
#[tokio::test]
async fn test_fetch_centers_network_error_is_empty() {
    let api = client(&closed_port().await, None);
    assert!(api.fetch_diving_centers().await.is_empty());
}

/// 正常な一覧取得
#[tokio::test]
async fn test_fetch_fishes_ok() {
    let base = serve(
        200,
        r#"[{"id":"a","name":"Clownfish","rarity":"rare","latestSighting":{"latitude":1.5,"longitude":2.5,"timestamp":"2024-05-01T10:00:00Z"},"image":"a.png"},
            {"id":"b","name":"Tang","rarity":"common","latestSighting":{"latitude":0.0,"longitude":0.0,"timestamp":"2024-05-02T10:00:00Z"},"image":"b.png"}]"#,
    )
    .await;

    let fishes = client(&base, None).fetch_fishes().await;
    let ids: Vec<&str> = fishes.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(fishes[0].rarity, Rarity::Rare);
}

/// リモート更新失敗 → 既見のまま、表示日時は "Never"
#[tokio::test]
async fn test_toggle_remote_failure_keeps_seen_without_prior() {
    let api = client(&closed_port().await, None);
    let store = SeenStore::new(MemoryStore::new(), Broadcaster::new());
    let fish = clownfish(None);

    let card = toggle_seen(&api, &store, &fish).await;

    assert!(card.is_seen());
    assert!(store.contains("a"));
    assert_eq!(card.last_seen(), None);
    assert_eq!(format_last_seen(card.last_seen(), Utc::now()), "Never");
}

/// リモート更新がエラーステータス → 既見のまま、以前の日時を表示
#[tokio::test]
async fn test_toggle_remote_error_keeps_prior_timestamp() {
    let base = serve(503, "").await;
    let prior = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
    let store = SeenStore::new(MemoryStore::new(), Broadcaster::new());

    let card = toggle_seen(&client(&base, None), &store, &clownfish(Some(prior))).await;

    assert!(card.is_seen());
    assert!(store.contains("a"));
    assert_eq!(card.last_seen(), Some(prior));
}

/// リモート更新成功 → サーバーが返した日時を表示
#[tokio::test]
async fn test_toggle_remote_success_updates_timestamp() {
    let base = serve(200, r#"{"timestamp":"2024-06-01T08:30:00Z"}"#).await;
    let store = SeenStore::new(MemoryStore::new(), Broadcaster::new());

    let card = toggle_seen(&client(&base, None), &store, &clownfish(None)).await;

    assert_eq!(
        card.last_seen(),
        Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap())
    );
}

/// 未見に戻すときはリモート呼び出しをしない
#[tokio::test]
async fn test_toggle_to_unseen_makes_no_remote_call() {
    // 呼ばれたら失敗する先を指定しても結果は変わらない
    let api = client(&closed_port().await, None);
    let store = SeenStore::new(MemoryStore::new(), Broadcaster::new());
    store.set_seen("a", true);
    let prior = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();

    let card = toggle_seen(&api, &store, &clownfish(Some(prior))).await;

    assert!(!card.is_seen());
    assert!(!store.contains("a"));
    assert_eq!(card.last_seen(), Some(prior));
}

/// トークン無し → ログインへ
#[tokio::test]
async fn test_session_required_without_token() {
    let api = client(&closed_port().await, None);
    let err = require_session(&api).await.unwrap_err();
    match err {
        FishyDexError::NotLoggedIn(url) => assert!(url.ends_with("/login")),
        other => panic!("unexpected error: {other}"),
    }
}

/// サーバーが null を返す → ログインへ
#[tokio::test]
async fn test_session_null_redirects_to_login() {
    let base = serve(200, "null").await;
    let err = require_session(&client(&base, Some("expired"))).await.unwrap_err();
    assert!(matches!(err, FishyDexError::NotLoggedIn(_)));
}

/// 有効なセッション
#[tokio::test]
async fn test_session_ok() {
    let base = serve(200, r#"{"session":{"id":"s1"},"user":{"id":"u1"}}"#).await;
    assert!(require_session(&client(&base, Some("token"))).await.is_ok());
}

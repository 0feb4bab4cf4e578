use thiserror::Error;

#[derive(Error, Debug)]
pub enum FishyDexError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ログインしていません。{0} でログインし、`fishy-dex config --session-token TOKEN` で設定してください")]
    NotLoggedIn(String),

    #[error("魚が見つかりません: {0}")]
    FishNotFound(String),

    #[error("API呼び出しエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("APIがステータス {status} を返しました: {body}")]
    Server { status: u16, body: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FishyDexError>;

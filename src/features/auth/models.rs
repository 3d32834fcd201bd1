use serde::{Deserialize, Serialize};

/// ログイン中ユーザーを表す構造体
///
/// セッションストアのキー `"user"` にJSON文字列として保存されている。
/// このコアは読み取るだけで、書き込みはログイン画面（対象外）が行う。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// ユーザー種別（例: "Employee"）
    #[serde(rename = "type")]
    pub user_type: String,
    /// 申請者のメールアドレス（請求書の所有者として使用される）
    pub email: String,
}

/// セッションエラーの種類
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// ログインユーザーが保存されていない
    #[error("ログインユーザーが見つかりません")]
    NotLoggedIn,

    /// 保存されているユーザー情報が解析できない
    #[error("セッション内容の解析に失敗しました: {0}")]
    Malformed(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for SessionError {
    fn from(error: rusqlite::Error) -> Self {
        SessionError::DatabaseError(error.to_string())
    }
}

/// SessionErrorからAppErrorへの変換（操作の呼び出し元へはAppErrorで返す）
impl From<SessionError> for crate::shared::errors::AppError {
    fn from(error: SessionError) -> Self {
        crate::shared::errors::AppError::Session(error.to_string())
    }
}

use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー（入力不正・ファイル形式など）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// レコードストア連携でのエラー（HTTPステータスを保持する場合がある）
    #[error("ストアエラー: {message}")]
    Store {
        status: Option<u16>,
        message: String,
    },

    /// 画面遷移コールバックが報告したエラー
    #[error("ナビゲーションエラー: {message}")]
    Navigation {
        status: Option<u16>,
        message: String,
    },

    /// セッションストア関連のエラー
    #[error("セッションエラー: {0}")]
    Session(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Store {
                status: Some(code), ..
            } => format!("エラー {code}"),
            AppError::Store { status: None, .. } => {
                "レコードストアとの通信でエラーが発生しました".to_string()
            }
            AppError::Navigation {
                status: Some(code), ..
            } => format!("エラー {code}"),
            AppError::Navigation { status: None, .. } => {
                "画面遷移でエラーが発生しました".to_string()
            }
            AppError::Session(_) => "ログイン情報の取得でエラーが発生しました".to_string(),
            AppError::Configuration(_) => "設定エラーが発生しました".to_string(),
            AppError::Io(_) => "ファイル操作でエラーが発生しました".to_string(),
            AppError::Json(_) => "データ形式の解析でエラーが発生しました".to_string(),
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Store { .. } => ErrorSeverity::Medium,
            AppError::Navigation { .. } => ErrorSeverity::Medium,
            AppError::Session(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
        }
    }

    /// HTTPステータスを取得（ストア・ナビゲーション由来のエラーのみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Store { status, .. } | AppError::Navigation { status, .. } => *status,
            _ => None,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// ストアエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `status` - レコードストアが返したHTTPステータス（不明な場合はNone）
    /// * `message` - エラーメッセージ
    pub fn store<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        AppError::Store {
            status,
            message: message.into(),
        }
    }

    /// ナビゲーションエラーを作成するヘルパー関数
    pub fn navigation<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        AppError::Navigation {
            status,
            message: message.into(),
        }
    }

    /// セッションエラーを作成するヘルパー関数
    pub fn session<S: Into<String>>(message: S) -> Self {
        AppError::Session(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

}

/// reqwest::ErrorからAppErrorへの変換（HTTPステータスを可能な限り保持する）
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Store {
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

/// 共有エラー型とエラーハンドリング
pub mod errors;

/// 共有設定管理
pub mod config;

/// 画面遷移先の識別子とコールバック型
pub mod routes;

// 便利な再エクスポート
pub use config::{
    get_environment, get_session_database_filename, initialize_logging_system,
    load_environment_variables, Environment, EnvironmentConfig, StoreConfig,
};
pub use errors::{AppError, AppResult, ErrorSeverity};
pub use routes::{Navigator, PreviewHandler};

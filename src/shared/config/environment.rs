use crate::shared::errors::{AppError, AppResult};

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # 戻り値
    /// 環境設定
    pub fn from_env() -> Self {
        let environment = get_environment();
        let debug_mode = environment == Environment::Development;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            debug_mode,
            log_level,
        }
    }

    /// 開発環境かどうかを判定
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// 現在の実行環境を判定する
///
/// # 戻り値
/// 現在の実行環境（Development または Production）
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    // 実行時環境変数を確認
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// 環境に応じたセッションデータベースファイル名を取得する
///
/// # 引数
/// * `env` - 実行環境
///
/// # 戻り値
/// セッションデータベースファイル名
///
/// # ファイル名の規則
/// - 開発環境: "dev_session.db"
/// - プロダクション環境: "session.db"
pub fn get_session_database_filename(env: Environment) -> &'static str {
    match env {
        Environment::Development => "dev_session.db",
        Environment::Production => "session.db",
    }
}

/// 環境に応じた.envファイルを読み込む
///
/// # 処理内容
/// 1. ENVIRONMENT に応じた.envファイルを読み込み
/// 2. フォールバック処理
pub fn load_environment_variables() {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    // 環境に応じた.envファイルのパスを決定
    let env_file = match environment.as_str() {
        "production" => ".env.production",
        _ => ".env", // デフォルトは開発環境
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) => {
            // 環境固有のファイルがない場合は、デフォルトの.envを試行
            if env_file != ".env" && dotenv::dotenv().is_ok() {
                log::warn!("{env_file}が見つからないため、デフォルトの.envファイルを読み込みました");
            } else {
                log::warn!("環境変数ファイルが見つかりません。直接設定された環境変数を使用します。");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// # 処理内容
/// 1. 環境設定を取得
/// 2. ログレベルを設定
/// 3. env_loggerを初期化
pub fn initialize_logging_system() {
    // 環境設定を取得
    let env_config = EnvironmentConfig::from_env();

    // ログレベルを設定
    let log_level = match env_config.log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    // env_loggerを初期化（開発環境ではモジュールパスも出力する）
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(env_config.is_development())
        .format_target(false)
        .init();

    log::info!(
        "ログシステムを初期化しました: level={}, environment={}",
        env_config.log_level,
        env_config.environment
    );
}

/// レコードストアAPIの設定を管理する構造体
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// レコードストアのベースURL
    pub base_url: String,
    /// リクエストタイムアウト（秒）
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// リクエストタイムアウトのデフォルト値（秒）
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// 環境変数からレコードストア設定を読み込む
    ///
    /// # 戻り値
    /// レコードストア設定、または設定が不完全な場合はNone
    pub fn from_env() -> Option<Self> {
        log::debug!("StoreConfig::from_env() - 環境変数の読み込みを開始");

        let base_url = match std::env::var("BILL_STORE_BASE_URL") {
            Ok(val) => {
                log::debug!("BILL_STORE_BASE_URL が見つかりました: {val}");
                val
            }
            Err(_) => {
                log::error!("BILL_STORE_BASE_URL が見つかりません");
                return None;
            }
        };

        let timeout_secs = std::env::var("BILL_STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_else(|| {
                log::debug!(
                    "BILL_STORE_TIMEOUT_SECS が設定されていないため、デフォルト値 {} を使用",
                    Self::DEFAULT_TIMEOUT_SECS
                );
                Self::DEFAULT_TIMEOUT_SECS
            });

        log::debug!("StoreConfig::from_env() - 設定の読み込みが完了しました");
        Some(Self {
            base_url,
            timeout_secs,
        })
    }

    /// レコードストア設定が有効かどうかを判定
    pub fn is_valid(&self) -> bool {
        !self.base_url.is_empty() && self.timeout_secs > 0
    }

    /// 設定を検証する
    ///
    /// # 戻り値
    /// 設定が有効な場合はOk(())、無効な場合はErr
    pub fn validate(&self) -> AppResult<()> {
        if !self.is_valid() {
            return Err(AppError::configuration("レコードストア設定が不完全です"));
        }

        // ベースURLがhttp(s)であることをチェック
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| AppError::configuration(format!("ベースURLの形式が不正です: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::configuration(
                "ベースURLはhttpまたはhttps形式である必要があります",
            ));
        }

        Ok(())
    }

    /// デバッグ情報を取得
    ///
    /// # 戻り値
    /// デバッグ情報のマップ
    pub fn get_debug_info(&self) -> std::collections::HashMap<String, String> {
        let mut info = std::collections::HashMap::new();
        info.insert("base_url".to_string(), self.base_url.clone());
        info.insert("timeout_secs".to_string(), self.timeout_secs.to_string());
        info
    }
}

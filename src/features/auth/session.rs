use crate::features::auth::models::{SessionError, SessionUser};
use crate::shared::config::environment::{get_environment, get_session_database_filename};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// ログインユーザーが保存されているキー
pub const USER_KEY: &str = "user";

/// セッションの永続キーバリューストア
///
/// このコアは `get` しか呼ばない。`set` はログイン画面（対象外）が使用する。
pub trait SessionStore: Send + Sync {
    /// キーに対応する値を取得する
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// キーに値を保存する
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
}

/// SQLiteベースのセッションストア
#[derive(Clone)]
pub struct SqliteSessionStore {
    /// データベース接続
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSessionStore {
    /// 指定パスのデータベースを開く（テーブルがなければ作成する）
    ///
    /// # 引数
    /// * `path` - セッションデータベースのファイルパス
    ///
    /// # 戻り値
    /// セッションストア、または失敗時はエラー
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// 環境に応じたデフォルトの場所にデータベースを開く
    ///
    /// # 戻り値
    /// セッションストア、または失敗時はエラー
    pub fn open_default() -> Result<Self, SessionError> {
        let base_dir = dirs::data_local_dir().ok_or_else(|| {
            SessionError::DatabaseError("データディレクトリが取得できません".to_string())
        })?;
        let app_dir = base_dir.join("keihi-seisan");
        std::fs::create_dir_all(&app_dir)
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        let filename = get_session_database_filename(get_environment());
        let path = app_dir.join(filename);
        log::info!("セッションデータベースを開きます: {}", path.display());
        Self::open(path)
    }

    /// インメモリデータベースで開く（テスト用）
    pub fn open_in_memory() -> Result<Self, SessionError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, SessionError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SessionError::DatabaseError(format!("データベースロックエラー: {e}")))?;

        let value = conn
            .query_row(
                "SELECT value FROM session_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SessionError::DatabaseError(format!("データベースロックエラー: {e}")))?;

        conn.execute(
            "INSERT OR REPLACE INTO session_store (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;

        Ok(())
    }
}

/// インメモリのセッションストア（テスト・組み込み用）
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| SessionError::DatabaseError(format!("ロックエラー: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SessionError::DatabaseError(format!("ロックエラー: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// ログイン中ユーザーを取得する
///
/// # 引数
/// * `store` - セッションストア
///
/// # 戻り値
/// ログイン中ユーザー、保存されていない場合や解析できない場合はエラー
pub fn current_user(store: &dyn SessionStore) -> Result<SessionUser, SessionError> {
    let raw = store.get(USER_KEY)?.ok_or(SessionError::NotLoggedIn)?;
    serde_json::from_str(&raw).map_err(|e| SessionError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_store_round_trip() {
        let store = SqliteSessionStore::open_in_memory().unwrap();

        // 保存前はNone
        assert_eq!(store.get(USER_KEY).unwrap(), None);

        // 保存した値がそのまま読み出せることを確認
        store
            .set(USER_KEY, r#"{"type":"Employee","email":"employee@test.tld"}"#)
            .unwrap();
        let value = store.get(USER_KEY).unwrap().unwrap();
        assert!(value.contains("employee@test.tld"));

        // 上書きできることを確認
        store
            .set(USER_KEY, r#"{"type":"Employee","email":"other@test.tld"}"#)
            .unwrap();
        let value = store.get(USER_KEY).unwrap().unwrap();
        assert!(value.contains("other@test.tld"));
    }

    #[test]
    fn test_sqlite_store_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.db");

        {
            let store = SqliteSessionStore::open(&path).unwrap();
            store.set("user", r#"{"type":"Employee","email":"a@b.tld"}"#).unwrap();
        }

        // 開き直しても値が残っていることを確認
        let store = SqliteSessionStore::open(&path).unwrap();
        assert!(store.get("user").unwrap().is_some());
    }

    #[test]
    fn test_current_user() {
        let store = MemorySessionStore::new();
        store
            .set(USER_KEY, r#"{"type":"Employee","email":"employee@test.tld"}"#)
            .unwrap();

        let user = current_user(&store).unwrap();
        assert_eq!(user.user_type, "Employee");
        assert_eq!(user.email, "employee@test.tld");
    }

    #[test]
    fn test_current_user_not_logged_in() {
        let store = MemorySessionStore::new();

        let result = current_user(&store);
        assert!(matches!(result, Err(SessionError::NotLoggedIn)));
    }

    #[test]
    fn test_current_user_malformed_json() {
        let store = MemorySessionStore::new();
        store.set(USER_KEY, "not-json").unwrap();

        let result = current_user(&store);
        assert!(matches!(result, Err(SessionError::Malformed(_))));
    }
}

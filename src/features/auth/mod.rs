// 認証・セッション機能（ログインユーザーの読み取り）

pub mod models;
pub mod session;

pub use models::{SessionError, SessionUser};
pub use session::{current_user, MemorySessionStore, SessionStore, SqliteSessionStore, USER_KEY};

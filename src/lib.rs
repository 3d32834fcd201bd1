//! 経費精算クライアントのコアロジック
//!
//! レコードストアとプレゼンテーション層の間を仲介する2つのコンポーネント
//! を提供します。
//!
//! - [`BillLister`] - 請求書一覧の取得と表示用整形
//! - [`BillSubmitter`] - 領収書アップロードと申請送信
//!
//! 画面描画・ルーティング・認証は対象外で、ナビゲーションとプレビューは
//! コールバックとして、セッションとレコードストアはトレイトとして注入
//! されます。

pub mod features;
pub mod services;
pub mod shared;

pub use features::auth::{
    current_user, MemorySessionStore, SessionStore, SessionUser, SqliteSessionStore,
};
pub use features::bills::{
    BillForm, BillLister, BillRecord, BillStore, BillSubmitter, DisplayBill, FileSelection,
};
pub use services::HttpBillStore;
pub use shared::{
    initialize_logging_system, load_environment_variables, AppError, AppResult, Navigator,
    PreviewHandler, StoreConfig,
};

use crate::shared::errors::AppResult;
use std::sync::Arc;

/// 画面遷移先の識別子（プレゼンテーション層のルーターと共有する固定値）
///
/// このコアは値を検証せず、そのままナビゲーションコールバックへ渡す。
pub const BILLS: &str = "#employee/bills";
pub const NEW_BILL: &str = "#employee/bill/new";

/// 画面遷移コールバック
///
/// ルーター側で失敗する場合がある（存在しない遷移先など）。
/// 失敗はそのまま呼び出し元へ伝播させる。
pub type Navigator = Arc<dyn Fn(&str) -> AppResult<()> + Send + Sync>;

/// 領収書プレビューのフック（プレビューウィジェットは外部コンポーネント）
pub type PreviewHandler = Arc<dyn Fn(&str) + Send + Sync>;

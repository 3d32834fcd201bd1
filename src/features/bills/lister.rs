// 請求書一覧の取得・整形

use crate::features::auth::session::{current_user, SessionStore};
use crate::features::bills::formatting::to_display;
use crate::features::bills::models::DisplayBill;
use crate::features::bills::store::BillStore;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::routes::{self, Navigator, PreviewHandler};
use log::{debug, info};
use std::sync::Arc;

/// 請求書一覧コンポーネント
///
/// セッションの請求書レコードを取得して表示用に整形する。プレビューと
/// 新規作成画面への遷移フックも提供するが、どちらも外部コンポーネントへ
/// 転送するだけでビジネスロジックは持たない。
pub struct BillLister {
    store: Arc<dyn BillStore>,
    session: Arc<dyn SessionStore>,
    navigate: Navigator,
    preview: PreviewHandler,
}

impl BillLister {
    /// 新しいBillListerを作成する
    ///
    /// # 引数
    /// * `store` - レコードストア
    /// * `session` - セッションストア（読み取り専用で使用）
    /// * `navigate` - 画面遷移コールバック
    /// * `preview` - 領収書プレビューのフック
    pub fn new(
        store: Arc<dyn BillStore>,
        session: Arc<dyn SessionStore>,
        navigate: Navigator,
        preview: PreviewHandler,
    ) -> Self {
        Self {
            store,
            session,
            navigate,
            preview,
        }
    }

    /// 請求書一覧を取得して表示用に整形する
    ///
    /// ストアが返した順序をそのまま保持する（並び替えはしない）。日付が
    /// 解析できないレコードは元の値のまま表示用に残す。ストア呼び出し
    /// 自体の失敗はそのまま呼び出し元へ伝播させる。
    ///
    /// # 戻り値
    /// 表示用の請求書リスト、またはストア失敗時はエラー
    pub async fn fetch_and_format(&self) -> AppResult<Vec<DisplayBill>> {
        if let Ok(user) = current_user(self.session.as_ref()) {
            debug!("請求書一覧を取得します: user={}", user.email);
        }

        let records = self.store.list().await?;
        info!("請求書一覧を取得しました: {}件", records.len());

        Ok(records.into_iter().map(to_display).collect())
    }

    /// 領収書プレビューを開く
    ///
    /// 表示中の請求書に添付されたファイルURLをプレビューウィジェットへ
    /// 渡す。ファイルの内容はここでは扱わない。
    ///
    /// # 引数
    /// * `bill` - 表示中の請求書
    pub fn request_preview(&self, bill: &DisplayBill) -> AppResult<()> {
        let file_url = bill
            .file_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::validation("領収書ファイルが添付されていません"))?;

        debug!("領収書プレビューを開きます: {file_url}");
        (self.preview)(file_url);
        Ok(())
    }

    /// 新規申請画面へ遷移する
    pub fn request_create(&self) -> AppResult<()> {
        (self.navigate)(routes::NEW_BILL)
    }
}

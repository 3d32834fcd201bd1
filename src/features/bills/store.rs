// 請求書レコードストアへのアクセス契約

use crate::features::bills::models::BillRecord;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 領収書アップロード（create操作）の入力
#[derive(Debug, Clone)]
pub struct ReceiptUpload {
    /// 申請者のメールアドレス
    pub email: String,
    /// ファイルの単純名（拡張子を含む）
    pub file_name: String,
    /// ファイルの内容
    pub data: Vec<u8>,
}

/// create操作の応答（レコードの骨格が作成され、キーが発行される）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBillResponse {
    /// 保存されたファイルのURL
    pub file_url: String,
    /// 発行されたレコードキー（以後のupdateで使用する）
    pub key: String,
}

/// update操作の入力（申請内容の全フィールド）
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBillRequest {
    /// create時に発行されたレコードキー
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub amount: Option<f64>,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: f64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: String,
}

/// 請求書レコードストアの操作
///
/// HTTP実装は `services::store_client::HttpBillStore`。テストではモックを
/// 注入する。3操作とも失敗する場合があり、失敗はそのまま呼び出し元へ
/// 伝播させる（このコアはリトライしない）。
#[async_trait]
pub trait BillStore: Send + Sync {
    /// セッションの全請求書レコードを取得する
    async fn list(&self) -> AppResult<Vec<BillRecord>>;

    /// 領収書ファイルをアップロードし、レコードの骨格を作成する
    async fn create(&self, upload: ReceiptUpload) -> AppResult<CreateBillResponse>;

    /// 請求書レコードを更新する
    async fn update(&self, request: UpdateBillRequest) -> AppResult<()>;
}

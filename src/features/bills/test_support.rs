// 請求書機能のテスト用モック・フィクスチャ

use crate::features::auth::session::{MemorySessionStore, SessionStore, USER_KEY};
use crate::features::bills::models::BillRecord;
use crate::features::bills::store::{
    BillStore, CreateBillResponse, ReceiptUpload, UpdateBillRequest,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::routes::{Navigator, PreviewHandler};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// テスト用の請求書レコードを1件作成する
pub fn fixture_bill(id: &str, date: &str, status: &str) -> BillRecord {
    BillRecord {
        id: Some(id.to_string()),
        email: Some("employee@test.tld".to_string()),
        bill_type: Some("Hôtel et logement".to_string()),
        name: Some("encore".to_string()),
        date: date.to_string(),
        amount: Some(400.0),
        vat: Some(80.0),
        pct: Some(20.0),
        commentary: Some("séminaire billed".to_string()),
        status: status.to_string(),
        file_url: Some("https://test.storage.tld/receipt.jpg".to_string()),
        file_name: Some("receipt.jpg".to_string()),
    }
}

/// テスト用の請求書一覧（ストアが返す順序のまま使う）
pub fn fixture_bills() -> Vec<BillRecord> {
    vec![
        fixture_bill("47qAXb6fIm2zOKkLzMro", "2004-04-04", "pending"),
        fixture_bill("BeKy5Mo4jkmdfPGYpTxZ", "2001-01-01", "refused"),
        fixture_bill("UIUZtnPQvnbFnB0ozvJh", "2003-03-03", "accepted"),
        fixture_bill("qcCK3SzECmaZAGRrHjaC", "2002-02-02", "refused"),
    ]
}

/// 記録付きのモックレコードストア
///
/// 各操作の呼び出し内容を記録し、設定された応答・失敗を返す。
#[derive(Default)]
pub struct MockBillStore {
    bills: Vec<BillRecord>,
    create_file_url: String,
    create_key: String,
    fail_list: Option<(Option<u16>, String)>,
    fail_create: Option<(Option<u16>, String)>,
    hang_first_create: bool,
    fail_update: Option<(Option<u16>, String)>,
    pub creates: Mutex<Vec<ReceiptUpload>>,
    pub updates: Mutex<Vec<UpdateBillRequest>>,
}

impl MockBillStore {
    pub fn new() -> Self {
        Self {
            create_file_url: "https://test.com".to_string(),
            create_key: "12345".to_string(),
            ..Self::default()
        }
    }

    /// list操作が返すレコードを設定する
    pub fn with_bills(mut self, bills: Vec<BillRecord>) -> Self {
        self.bills = bills;
        self
    }

    /// create操作の応答を設定する
    pub fn with_create_response(mut self, file_url: &str, key: &str) -> Self {
        self.create_file_url = file_url.to_string();
        self.create_key = key.to_string();
        self
    }

    /// list操作を失敗させる
    pub fn failing_list(mut self, status: Option<u16>, message: &str) -> Self {
        self.fail_list = Some((status, message.to_string()));
        self
    }

    /// create操作を失敗させる
    pub fn failing_create(mut self, status: Option<u16>, message: &str) -> Self {
        self.fail_create = Some((status, message.to_string()));
        self
    }

    /// 最初のcreate操作を応答しないままにする（中断の再現用）
    pub fn hang_first_create(mut self) -> Self {
        self.hang_first_create = true;
        self
    }

    /// update操作を失敗させる
    pub fn failing_update(mut self, status: Option<u16>, message: &str) -> Self {
        self.fail_update = Some((status, message.to_string()));
        self
    }

    pub fn create_calls(&self) -> usize {
        self.creates.lock().unwrap().len()
    }

    pub fn update_calls(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl BillStore for MockBillStore {
    async fn list(&self) -> AppResult<Vec<BillRecord>> {
        if let Some((status, message)) = &self.fail_list {
            return Err(AppError::store(*status, message.clone()));
        }
        Ok(self.bills.clone())
    }

    async fn create(&self, upload: ReceiptUpload) -> AppResult<CreateBillResponse> {
        let call_index = {
            let mut creates = self.creates.lock().unwrap();
            creates.push(upload);
            creates.len()
        };
        if self.hang_first_create && call_index == 1 {
            std::future::pending::<()>().await;
        }
        if let Some((status, message)) = &self.fail_create {
            return Err(AppError::store(*status, message.clone()));
        }
        Ok(CreateBillResponse {
            file_url: self.create_file_url.clone(),
            key: self.create_key.clone(),
        })
    }

    async fn update(&self, request: UpdateBillRequest) -> AppResult<()> {
        self.updates.lock().unwrap().push(request);
        if let Some((status, message)) = &self.fail_update {
            return Err(AppError::store(*status, message.clone()));
        }
        Ok(())
    }
}

/// 従業員としてログイン済みのセッションストアを作成する
pub fn logged_in_session() -> Arc<MemorySessionStore> {
    let store = MemorySessionStore::new();
    store
        .set(USER_KEY, r#"{"type":"Employee","email":"employee@test.tld"}"#)
        .unwrap();
    Arc::new(store)
}

/// 遷移先を記録するナビゲーションコールバック
pub fn recording_navigator() -> (Navigator, Arc<Mutex<Vec<String>>>) {
    let visited: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&visited);
    let navigator: Navigator = Arc::new(move |path: &str| {
        log.lock().unwrap().push(path.to_string());
        Ok(())
    });
    (navigator, visited)
}

/// 常に失敗するナビゲーションコールバック（ルーティングエラーの再現）
pub fn failing_navigator(status: u16, message: &str) -> Navigator {
    let message = message.to_string();
    Arc::new(move |_path: &str| Err(AppError::navigation(Some(status), message.clone())))
}

/// プレビューされたURLを記録するフック
pub fn recording_preview() -> (PreviewHandler, Arc<Mutex<Vec<String>>>) {
    let previewed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&previewed);
    let handler: PreviewHandler = Arc::new(move |url: &str| {
        log.lock().unwrap().push(url.to_string());
    });
    (handler, previewed)
}

// レコードストアAPIのHTTPクライアント

use crate::features::bills::models::BillRecord;
use crate::features::bills::store::{
    BillStore, CreateBillResponse, ReceiptUpload, UpdateBillRequest,
};
use crate::shared::config::environment::StoreConfig;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::multipart;
use std::time::Duration;

/// レコードストアのHTTPクライアント
///
/// `BillStore` 契約のHTTP実装。ワイヤ形式はこのクライアントの都合で
/// 決めており、コア側は契約にしか依存しない。
#[derive(Clone)]
pub struct HttpBillStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBillStore {
    /// レコードストアクライアントを初期化する
    ///
    /// # 引数
    /// * `config` - レコードストア設定
    ///
    /// # 戻り値
    /// クライアント、または設定が不正な場合はエラー
    pub fn new(config: StoreConfig) -> AppResult<Self> {
        config.validate().map_err(|e| {
            error!("レコードストア設定の検証に失敗しました: {e}");
            e
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント構築エラー: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!("レコードストアクライアントを初期化しました: base_url={base_url}");

        Ok(Self { client, base_url })
    }

    /// 環境変数の設定からクライアントを初期化する
    pub fn from_env() -> AppResult<Self> {
        let config = StoreConfig::from_env()
            .ok_or_else(|| AppError::configuration("レコードストア設定が見つかりません"))?;
        Self::new(config)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Content-Typeを推定する
    fn get_content_type(file_name: &str) -> &'static str {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => "application/octet-stream",
        }
    }

    /// 2xx以外の応答をストアエラーに変換する
    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown").to_string()
        } else {
            body
        };

        error!("ストアがエラー応答を返しました: status={status}, message={message}");
        Err(AppError::store(Some(status.as_u16()), message))
    }
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn list(&self) -> AppResult<Vec<BillRecord>> {
        let url = self.endpoint("bills");
        debug!("請求書一覧を要求します: GET {url}");

        let response = self.client.get(&url).send().await?;
        let response = Self::check(response).await?;

        let records = response.json::<Vec<BillRecord>>().await?;
        debug!("請求書一覧を受信しました: {}件", records.len());
        Ok(records)
    }

    async fn create(&self, upload: ReceiptUpload) -> AppResult<CreateBillResponse> {
        let url = self.endpoint("bills");
        let content_type = Self::get_content_type(&upload.file_name);
        info!(
            "領収書をアップロードします: POST {url}, file={}, size={} bytes, content_type={content_type}",
            upload.file_name,
            upload.data.len()
        );

        let file_part = multipart::Part::bytes(upload.data)
            .file_name(upload.file_name.clone())
            .mime_str(content_type)?;
        let form = multipart::Form::new()
            .text("email", upload.email)
            .part("file", file_part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check(response).await?;

        let created = response.json::<CreateBillResponse>().await?;
        info!(
            "領収書アップロード完了: key={}, url={}",
            created.key, created.file_url
        );
        Ok(created)
    }

    async fn update(&self, request: UpdateBillRequest) -> AppResult<()> {
        let url = self.endpoint(&format!("bills/{}", request.id));
        info!("請求書を更新します: PATCH {url}");

        let response = self.client.patch(&url).json(&request).send().await?;
        Self::check(response).await?;

        info!("請求書を更新しました: id={}", request.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StoreConfig {
        StoreConfig {
            base_url: "https://store.example.com/api/v1/".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_client_initialization() {
        let store = HttpBillStore::new(test_config()).unwrap();

        // 末尾スラッシュは除去され、エンドポイントは二重スラッシュにならない
        assert_eq!(
            store.endpoint("bills"),
            "https://store.example.com/api/v1/bills"
        );
        assert_eq!(
            store.endpoint("bills/12345"),
            "https://store.example.com/api/v1/bills/12345"
        );
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = StoreConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 5,
        };

        let result = HttpBillStore::new(config);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_content_type_detection() {
        assert_eq!(HttpBillStore::get_content_type("test.png"), "image/png");
        assert_eq!(HttpBillStore::get_content_type("test.jpg"), "image/jpeg");
        assert_eq!(HttpBillStore::get_content_type("test.jpeg"), "image/jpeg");
        assert_eq!(HttpBillStore::get_content_type("TEST.PNG"), "image/png");
        assert_eq!(
            HttpBillStore::get_content_type("test.unknown"),
            "application/octet-stream"
        );
    }
}

// 請求書の作成（領収書アップロード・申請送信）

use crate::features::auth::session::{current_user, SessionStore};
use crate::features::bills::models::{BillForm, FileSelection, UploadedReceipt};
use crate::features::bills::store::{BillStore, ReceiptUpload, UpdateBillRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::routes::{self, Navigator};
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;

/// 受け付けるファイル形式の表示用ラベル（エラーメッセージで使用）
const ACCEPTED_FORMATS: &str = "PNG・JPG・JPEG";

/// 税率が未入力・数値でない場合の既定値（%）
const DEFAULT_PCT: f64 = 20.0;

/// 申請直後のステータス（承認フローの起点）
const INITIAL_STATUS: &str = "pending";

/// アップロードの進行状態
///
/// 3つのメタデータは `Uploaded` でのみ保持されるため、部分的に設定された
/// 状態は構造上存在しない。
enum UploadPhase {
    /// ファイル未選択（初期状態。アップロード拒否後もここへ戻る）
    Empty,
    /// ストアへのアップロード待ち
    Uploading,
    /// アップロード完了（申請送信が可能）
    Uploaded(UploadedReceipt),
}

/// 請求書作成コンポーネント
///
/// 1件の作成中請求書を管理する。領収書ファイルの検証・アップロードと、
/// フォーム送信時の申請組み立て・送信を担当する。同時に扱う申請は
/// 常に1件のみ。
pub struct BillSubmitter {
    store: Arc<dyn BillStore>,
    session: Arc<dyn SessionStore>,
    navigate: Navigator,
    phase: UploadPhase,
}

impl BillSubmitter {
    /// 新しいBillSubmitterを作成する
    ///
    /// # 引数
    /// * `store` - レコードストア
    /// * `session` - セッションストア（申請者メールの読み取りに使用）
    /// * `navigate` - 画面遷移コールバック
    pub fn new(
        store: Arc<dyn BillStore>,
        session: Arc<dyn SessionStore>,
        navigate: Navigator,
    ) -> Self {
        Self {
            store,
            session,
            navigate,
            phase: UploadPhase::Empty,
        }
    }

    /// アップロード済みファイルのURL（未アップロード時はNone）
    pub fn file_url(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Uploaded(receipt) => Some(receipt.file_url.as_str()),
            _ => None,
        }
    }

    /// アップロード済みファイルの単純名（未アップロード時はNone）
    pub fn file_name(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Uploaded(receipt) => Some(receipt.file_name.as_str()),
            _ => None,
        }
    }

    /// create操作が発行したレコードキー（未アップロード時はNone）
    pub fn bill_id(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Uploaded(receipt) => Some(receipt.bill_id.as_str()),
            _ => None,
        }
    }

    /// ファイル選択イベントを処理する
    ///
    /// 拡張子を検証してからストアのcreate操作でアップロードする。拡張子が
    /// 不正な場合はストアを呼ばずに拒否し、診断ログとエラーの両方で報告
    /// する（呼び出し側がどちらに依存していてもよいように）。ストアが
    /// 拒否した場合はアップロード状態を空に戻し、エラーをそのまま返す。
    ///
    /// # 引数
    /// * `file` - 選択されたファイル（名前と内容）
    ///
    /// # 戻り値
    /// 成功時はOk(())。成功後は `file_url`/`file_name`/`bill_id` が
    /// すべて設定される
    pub async fn handle_file_change(&mut self, file: FileSelection) -> AppResult<()> {
        // 拡張子チェックはあらゆるI/Oより先に行う
        if !has_accepted_extension(&file.name) {
            let err = AppError::validation(format!(
                "ファイルは{ACCEPTED_FORMATS}形式である必要があります"
            ));
            error!("領収書ファイルの形式が不正です: name={}", file.name);
            return Err(err);
        }

        // `&mut self` なので進行中の呼び出しと並行することはない。ここで
        // `Uploading` が残っているのは前回の呼び出しが完了前に破棄された
        // 場合だけなので、初期状態へ戻して続行する
        if matches!(self.phase, UploadPhase::Uploading) {
            warn!("中断されたアップロードが残っていたため、状態を初期化します");
            self.phase = UploadPhase::Empty;
        }

        let user = current_user(self.session.as_ref())?;
        let file_name = simple_file_name(&file.name).to_string();

        info!(
            "領収書アップロード開始: file={}, size={} bytes",
            file_name,
            file.data.len()
        );
        self.phase = UploadPhase::Uploading;

        let result = self
            .store
            .create(ReceiptUpload {
                email: user.email,
                file_name: file_name.clone(),
                data: file.data,
            })
            .await;

        match result {
            Ok(response) => {
                info!(
                    "領収書アップロード成功: key={}, url={}",
                    response.key, response.file_url
                );
                self.phase = UploadPhase::Uploaded(UploadedReceipt {
                    bill_id: response.key,
                    file_url: response.file_url,
                    file_name,
                });
                Ok(())
            }
            Err(e) => {
                // ストアの拒否。アップロード状態を空へ戻し、エラーは加工しない
                error!("領収書アップロード失敗: {e}");
                self.phase = UploadPhase::Empty;
                Err(e)
            }
        }
    }

    /// フォーム送信イベントを処理する
    ///
    /// フォーム値とアップロード済み領収書から申請内容を組み立てて、
    /// ストアのupdate操作へ送る（レコードの骨格はアップロード時のcreateで
    /// 作成済みなので常にupdateになる）。成功時は一覧画面へ遷移する。
    /// update・遷移の失敗はどちらもそのまま呼び出し元へ伝播させる。
    /// 送信が失敗してもアップロード済み情報は保持する（ファイル自体は
    /// すでに保存されているため）。
    ///
    /// # 引数
    /// * `form` - フォームの入力値（デフォルト送信は抑止済み）
    pub async fn handle_submit(&mut self, form: BillForm) -> AppResult<()> {
        let receipt = match &self.phase {
            UploadPhase::Uploaded(receipt) => receipt.clone(),
            _ => {
                return Err(AppError::validation(
                    "領収書ファイルがアップロードされていません",
                ))
            }
        };

        let user = current_user(self.session.as_ref())?;

        let request = UpdateBillRequest {
            id: receipt.bill_id.clone(),
            email: user.email,
            bill_type: form.bill_type,
            name: form.name,
            amount: form.amount.trim().parse::<f64>().ok(),
            date: form.date,
            vat: form.vat.trim().parse::<f64>().ok(),
            pct: form.pct.trim().parse::<f64>().unwrap_or(DEFAULT_PCT),
            commentary: form.commentary,
            file_url: receipt.file_url,
            file_name: receipt.file_name,
            status: INITIAL_STATUS.to_string(),
        };

        info!("申請を送信します: id={}", request.id);
        self.store.update(request).await?;

        info!("申請を送信しました。一覧画面へ遷移します");
        (self.navigate)(routes::BILLS)
    }
}

/// 拡張子が受け付け対象かを判定する（大文字小文字を区別しない）
fn has_accepted_extension(file_name: &str) -> bool {
    let extension = Path::new(simple_file_name(file_name))
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension {
        Some(ext) => matches!(ext.as_str(), "png" | "jpg" | "jpeg"),
        None => false,
    }
}

/// パス付きのファイル名から単純名を取り出す
///
/// ブラウザのファイル入力は "C:\fakepath\receipt.png" のような値を渡して
/// くるため、`/` と `\` の両方を区切りとして扱う。
fn simple_file_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
}

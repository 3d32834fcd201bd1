// 請求書機能のデータモデル

use serde::{Deserialize, Serialize};

/// 請求書レコード（レコードストアが保持する正本）
///
/// `date` はISO形式（YYYY-MM-DD）が期待されるが、取り込み不良のデータでは
/// 任意の文字列が入っている場合がある。`status` はストアの固定語彙
/// （pending / accepted / refused）だが、未知の値もそのまま保持する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillRecord {
    /// レコード識別子（初回保存までは存在しない）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 所有者のメールアドレス（セッションユーザー由来）
    pub email: Option<String>,
    /// 経費種別
    #[serde(rename = "type")]
    pub bill_type: Option<String>,
    /// 経費名
    pub name: Option<String>,
    /// 日付
    pub date: String,
    /// 金額
    pub amount: Option<f64>,
    /// 消費税額
    pub vat: Option<f64>,
    /// 税率（%）
    pub pct: Option<f64>,
    /// コメント
    pub commentary: Option<String>,
    /// ステータス
    pub status: String,
    /// 領収書ファイルのURL（アップロード成功後のみ）
    pub file_url: Option<String>,
    /// 領収書ファイル名（アップロード成功後のみ）
    pub file_name: Option<String>,
}

/// 表示用に整形した請求書
///
/// `date` と `status` を表示文字列に書き換えたコピー。一覧取得のたびに
/// 生成される一時データで、永続化されることはない。日付が解析できない
/// 場合は元の文字列のまま残る。
#[derive(Debug, Clone, Serialize)]
pub struct DisplayBill {
    pub id: Option<String>,
    pub email: Option<String>,
    pub bill_type: Option<String>,
    pub name: Option<String>,
    /// 表示用の日付（整形済み、または解析不能だった元の文字列）
    pub date: String,
    pub amount: Option<f64>,
    pub vat: Option<f64>,
    pub pct: Option<f64>,
    pub commentary: Option<String>,
    /// 表示用のステータスラベル
    pub status: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

/// アップロード完了した領収書のメタデータ
///
/// 3フィールドは常に同時に設定される。アップロードが失敗・拒否された
/// 場合、部分的に残ることはない。
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedReceipt {
    /// ストアのcreate操作が発行したレコードキー
    pub bill_id: String,
    /// 保存されたファイルのURL
    pub file_url: String,
    /// 元ファイルの単純名（拡張子を含む）
    pub file_name: String,
}

/// ファイル選択イベントから渡される添付ファイル
#[derive(Debug, Clone)]
pub struct FileSelection {
    /// 選択されたファイル名（ブラウザによってはfakepath付きのパス）
    pub name: String,
    /// ファイルの内容
    pub data: Vec<u8>,
}

/// 申請フォームの入力値
///
/// プレゼンテーション層がsubmitイベントのデフォルト動作を抑止した上で、
/// フィールド値をそのまま渡してくる。数値の変換はこちらで行う。
#[derive(Debug, Clone, Default)]
pub struct BillForm {
    pub bill_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

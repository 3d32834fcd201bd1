// 請求書の表示用整形（日付・ステータス）

use crate::features::bills::models::{BillRecord, DisplayBill};
use chrono::NaiveDate;
use log::warn;

/// 日付を表示用の短い形式に整形する
///
/// # 引数
/// * `raw` - ストア上の日付文字列（YYYY-MM-DD形式が期待される）
///
/// # 戻り値
/// 整形済みの文字列（例: "04年4月4日"）、解析できない場合はNone
pub fn format_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.format("%y年%-m月%-d日").to_string())
}

/// ステータスを表示用ラベルに変換する
///
/// 固定語彙のみを変換し、未知の値はそのまま返す。入力だけで決まる
/// 純粋な変換で、副作用はない。
pub fn format_status(status: &str) -> String {
    match status {
        "pending" => "承認待ち".to_string(),
        "accepted" => "承認済み".to_string(),
        "refused" => "却下".to_string(),
        other => other.to_string(),
    }
}

/// レコードを表示用の請求書に変換する
///
/// 日付が解析できない場合は元の文字列をそのまま残し、ステータスの変換は
/// 通常どおり行う。一覧全体を失敗させることはない。
pub fn to_display(record: BillRecord) -> DisplayBill {
    let date = match format_date(&record.date) {
        Some(formatted) => formatted,
        None => {
            // 取り込み不良のデータ。表示は元の値のまま続行する
            warn!("日付の解析に失敗しました。元の値を表示します: {}", record.date);
            record.date.clone()
        }
    };

    DisplayBill {
        id: record.id,
        email: record.email,
        bill_type: record.bill_type,
        name: record.name,
        date,
        amount: record.amount,
        vat: record.vat,
        pct: record.pct,
        commentary: record.commentary,
        status: format_status(&record.status),
        file_url: record.file_url,
        file_name: record.file_name,
    }
}

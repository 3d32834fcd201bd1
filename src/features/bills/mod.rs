// 請求書機能（一覧整形・領収書アップロード・申請送信）

pub mod formatting;
pub mod lister;
pub mod models;
pub mod store;
pub mod submitter;

#[cfg(test)]
pub(crate) mod test_support;

pub use lister::BillLister;
pub use models::{BillForm, BillRecord, DisplayBill, FileSelection, UploadedReceipt};
pub use store::{BillStore, CreateBillResponse, ReceiptUpload, UpdateBillRequest};
pub use submitter::BillSubmitter;

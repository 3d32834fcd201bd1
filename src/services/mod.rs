// 外部サービスクライアント

pub mod store_client;

pub use store_client::HttpBillStore;

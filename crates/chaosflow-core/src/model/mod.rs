//! モデル定義
//!
//! パース済みの設定を表すデータモデルを定義します。
//! ドキュメントの生の形は `crate::document` にあります。

mod config;
mod journey;
mod probability;
mod service;
mod stage;

// Re-exports
pub use config::*;
pub use journey::*;
pub use probability::*;
pub use service::*;
pub use stage::*;

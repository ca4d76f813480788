//! Chaosflow の設定モデルとローダー
//!
//! サービス・ジャーニー・ステージを記述した設定ドキュメント
//! （JSON / YAML / TOML）を読み込み、型付きの `Config` に変換します。

pub mod document;
pub mod error;
pub mod format;
pub mod loader;
pub mod model;
pub mod parser;

pub use document::{RawConfig, RawJourney, RawService, RawStage};
pub use error::{ConfigError, DecodeError, EncodeError, FormatError, Result};
pub use format::Format;
pub use loader::{create, load};
pub use model::*;
pub use parser::{parse_config, parse_duration};

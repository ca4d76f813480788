//! 設定のルート

use super::{Journey, Service, Stage};

/// パース済みの設定
///
/// 各リストの順序は入力ドキュメントの順序と同じ。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub services: Vec<Service>,
    pub journeys: Vec<Journey>,
    pub stages: Vec<Stage>,
}

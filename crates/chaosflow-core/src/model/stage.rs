//! ステージ定義

use super::probability::Probability;
use std::time::Duration;

/// ステージ定義
///
/// テスト実行の1フェーズ。目標クライアント数と期間、
/// フェーズごとの障害発生確率を持つ。障害の注入自体はまだ行わない。
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub name: String,
    pub clients: u32,
    pub duration: Duration,
    /// ディスク破損の発生確率
    pub disk_corruption: Probability,
    /// ネットワーク障害の発生確率
    pub network_failure: Probability,
    /// 全面停止の発生確率
    pub full_outage: Probability,
}

//! ドキュメントパーサー
//!
//! 生のドキュメント（`RawConfig`）を型付きの `Config` に変換します。
//! 変換は全体が成功するか、最初に失敗したフィールドを報告するかのどちらかで、
//! 途中まで埋まった `Config` を返すことはありません。

mod stage;

pub use stage::{parse_duration, parse_stage};

use crate::document::{RawConfig, RawJourney, RawService};
use crate::error::Result;
use crate::model::{Config, Journey, Service};
use tracing::debug;

impl RawConfig {
    /// 型付きの `Config` に変換
    pub fn parse(&self) -> Result<Config> {
        parse_config(self)
    }
}

/// services → journeys → stages の順に入力順のまま変換
pub fn parse_config(raw: &RawConfig) -> Result<Config> {
    let services = raw.services.iter().map(parse_service).collect::<Vec<_>>();
    let journeys = raw.journeys.iter().map(parse_journey).collect::<Vec<_>>();
    let stages = raw
        .stages
        .iter()
        .map(parse_stage)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        services = services.len(),
        journeys = journeys.len(),
        stages = stages.len(),
        "Parsed configuration document"
    );

    Ok(Config {
        services,
        journeys,
        stages,
    })
}

/// service レコードを変換（失敗しない）
pub fn parse_service(raw: &RawService) -> Service {
    Service {
        name: raw.name.clone(),
        image: raw.image.clone(),
    }
}

/// journey レコードを変換（失敗しない）
pub fn parse_journey(raw: &RawJourney) -> Journey {
    Journey {
        name: raw.name.clone(),
        steps: raw.steps.clone(),
    }
}

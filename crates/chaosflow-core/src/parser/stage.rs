//! ステージレコードのパース

use crate::document::RawStage;
use crate::error::{ConfigError, FormatError, Result};
use crate::model::{Probability, Stage};
use std::time::Duration;

/// `<数値><単位>` 形式の期間をパース（例: "1s", "500ms", "1h 30m"）
pub fn parse_duration(input: &str) -> std::result::Result<Duration, FormatError> {
    humantime::parse_duration(input).map_err(|source| FormatError::InvalidDuration {
        input: input.to_string(),
        source,
    })
}

/// stage レコードをパース
///
/// duration → disk_corruption → network_failure → full_outage の順に変換し、
/// 最初に失敗したフィールドを報告する。
pub fn parse_stage(raw: &RawStage) -> Result<Stage> {
    let field_error = |field: &'static str| {
        move |source: FormatError| ConfigError::Parse {
            name: raw.name.clone(),
            field,
            source,
        }
    };

    let duration = parse_duration(&raw.duration).map_err(field_error("duration"))?;
    let disk_corruption = raw
        .disk_corruption
        .parse::<Probability>()
        .map_err(field_error("disk_corruption"))?;
    let network_failure = raw
        .network_failure
        .parse::<Probability>()
        .map_err(field_error("network_failure"))?;
    let full_outage = raw
        .full_outage
        .parse::<Probability>()
        .map_err(field_error("full_outage"))?;

    Ok(Stage {
        name: raw.name.clone(),
        clients: raw.clients,
        duration,
        disk_corruption,
        network_failure,
        full_outage,
    })
}

//! 設定ドキュメントの生の形
//!
//! JSON / YAML / TOML のどれからでも同じフィールド名でデコードされる。
//! 期間や確率は文字列のまま保持し、`crate::parser` で型付きの
//! `Config` に変換する。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub services: Vec<RawService>,
    #[serde(default)]
    pub journeys: Vec<RawJourney>,
    #[serde(default)]
    pub stages: Vec<RawStage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawService {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJourney {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub clients: u32,
    /// 例: "1s", "500ms"
    #[serde(default)]
    pub duration: String,
    /// 例: "5%"
    #[serde(default)]
    pub disk_corruption: String,
    #[serde(default)]
    pub network_failure: String,
    #[serde(default)]
    pub full_outage: String,
}

impl RawConfig {
    /// `--create` で書き出すサンプル設定
    pub fn example() -> Self {
        Self {
            services: vec![RawService {
                name: "nginx_service".to_string(),
                image: "nginx:latest".to_string(),
            }],
            journeys: vec![
                RawJourney {
                    name: "get index".to_string(),
                    steps: vec!["GET http://nginx_service/ --status 200".to_string()],
                },
                RawJourney {
                    name: "get unknown".to_string(),
                    steps: vec![
                        "http get http://nginx_service/unknown --status 404".to_string(),
                        "http head http://nginx_service/unknown --status 404".to_string(),
                    ],
                },
            ],
            stages: vec![RawStage {
                name: "default".to_string(),
                clients: 1,
                duration: "1s".to_string(),
                disk_corruption: "5%".to_string(),
                network_failure: "23.4%".to_string(),
                full_outage: "2.01%".to_string(),
            }],
        }
    }
}

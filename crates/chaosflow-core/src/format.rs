//! ドキュメント形式の判定とエンコード/デコード

use crate::document::RawConfig;
use crate::error::{ConfigError, DecodeError, EncodeError, Result};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

/// サポートする設定ドキュメントの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// 拡張子から形式を判定
    ///
    /// - `.json` / `.json5` / `.jsonc` → JSON
    /// - `.yaml` / `.yml` → YAML
    /// - `.toml` → TOML
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "json" | "json5" | "jsonc" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn decode<R: Read>(self, mut reader: R) -> std::result::Result<RawConfig, DecodeError> {
        let raw = match self {
            Format::Json => serde_json::from_reader(reader)?,
            Format::Yaml => serde_yaml::from_reader(reader)?,
            Format::Toml => {
                let mut content = String::new();
                reader.read_to_string(&mut content)?;
                toml::from_str(&content)?
            }
        };
        Ok(raw)
    }

    /// JSON と YAML はインデント付きで出力する
    pub fn encode<W: Write>(
        self,
        raw: &RawConfig,
        mut writer: W,
    ) -> std::result::Result<(), EncodeError> {
        match self {
            Format::Json => {
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
                raw.serialize(&mut serializer)?;
                writer.write_all(b"\n")?;
            }
            Format::Yaml => serde_yaml::to_writer(&mut writer, raw)?,
            Format::Toml => {
                let content = toml::to_string(raw)?;
                writer.write_all(content.as_bytes())?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

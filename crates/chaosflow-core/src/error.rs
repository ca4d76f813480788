use std::path::PathBuf;
use thiserror::Error;

/// 値の書式エラー（確率・期間）
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("確率の形式が不正です: {0:?}")]
    InvalidProbability(String),

    #[error("期間の形式が不正です: {input:?}")]
    InvalidDuration {
        input: String,
        #[source]
        source: humantime::DurationError,
    },
}

/// ドキュメントのデコードエラー
///
/// 各フォーマットのパーサーが出す診断メッセージをそのまま表示する。
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// ドキュメントのエンコードエラー
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("書き込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSONエンコードエラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAMLエンコードエラー: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOMLエンコードエラー: {0}")]
    Toml(#[from] toml::ser::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ファイルが見つかりません: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ファイルを開けません: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "サポートされていないファイル形式です: {}\nヒント: .json / .yaml / .yml / .toml を使用してください",
        path.display()
    )]
    UnsupportedFormat { path: PathBuf },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("ステージ '{name}' の {field} をパースできません")]
    Parse {
        name: String,
        field: &'static str,
        #[source]
        source: FormatError,
    },

    #[error("設定ファイルを書き出せません: {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use tracing::debug;

/// カレントディレクトリで探す設定ファイル名（優先順）
pub const CONFIG_FILE_CANDIDATES: [&str; 4] = [
    "chaosflow.yaml",
    "chaosflow.yml",
    "chaosflow.json",
    "chaosflow.toml",
];

/// 設定ファイルを探す
///
/// 以下の優先順位で設定ファイルを決定:
/// 1. 引数で明示されたパス（存在確認はローダーに任せる）
/// 2. 環境変数 CHAOSFLOW_CONFIG_PATH (直接パス指定)
/// 3. カレントディレクトリ: chaosflow.yaml, chaosflow.yml, chaosflow.json, chaosflow.toml
/// 4. ~/.config/chaosflow/chaosflow.yaml (グローバル設定)
pub fn find_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    // 1. 引数で直接指定
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    // 2. 環境変数で直接指定
    if let Ok(config_path) = std::env::var("CHAOSFLOW_CONFIG_PATH") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            debug!(path = %path.display(), "Using CHAOSFLOW_CONFIG_PATH");
            return Ok(path);
        }
    }

    // 3. カレントディレクトリで検索
    let current_dir = std::env::current_dir()?;
    for filename in &CONFIG_FILE_CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 4. グローバル設定ファイル
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("chaosflow").join("chaosflow.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(SettingsError::ConfigFileNotFound)
}

/// コンテナランタイム周りの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// docker CLI の実行ファイル（CHAOSFLOW_DOCKER）
    pub docker_bin: String,
    /// ワークスペースを作成するディレクトリ（CHAOSFLOW_WORKSPACE_ROOT）
    pub workspace_root: PathBuf,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            docker_bin: "docker".to_string(),
            workspace_root: std::env::temp_dir(),
        }
    }
}

impl RuntimeSettings {
    /// 環境変数から設定を読み込む（未設定の項目はデフォルト）
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let docker_bin = std::env::var("CHAOSFLOW_DOCKER")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.docker_bin);
        let workspace_root = std::env::var_os("CHAOSFLOW_WORKSPACE_ROOT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.workspace_root);

        Self {
            docker_bin,
            workspace_root,
        }
    }
}

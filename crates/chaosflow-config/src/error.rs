use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(
        "設定ファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: chaosflow.yaml, chaosflow.yml, chaosflow.json, chaosflow.toml\n\
        - ~/.config/chaosflow/chaosflow.yaml\n\
        または CHAOSFLOW_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ConfigFileNotFound,

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

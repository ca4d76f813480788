use std::path::PathBuf;
use thiserror::Error;

/// 外部コマンド（docker CLI）の実行エラー
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(
        "`{command}` を起動できません\n\nヒント:\n  • docker がインストールされているか確認してください\n  • CHAOSFLOW_DOCKER で実行ファイルを指定できます"
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` が失敗しました（{}）", describe_exit(*code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("終了コード {code}"),
        None => "シグナルで終了".to_string(),
    }
}

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("ディレクトリを作成できません: {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ファイルを書き込めません: {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("テンプレート展開エラー: {0}")]
    Template(String),

    #[error("ジャーニー用ベースイメージのビルドに失敗しました")]
    BaseImageBuild {
        #[source]
        source: RuntimeError,
    },

    #[error("docker compose up に失敗しました")]
    ComposeUp {
        #[source]
        source: RuntimeError,
    },

    #[error("docker compose down に失敗しました")]
    ComposeDown {
        #[source]
        source: RuntimeError,
    },

    #[error("ワークスペースを削除できません: {}", path.display())]
    RemoveWorkspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<tera::Error> for ComposeError {
    fn from(err: tera::Error) -> Self {
        // Tera のエラーは原因がチェーンになっているので全部つなげる
        let mut detail = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        ComposeError::Template(detail)
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;

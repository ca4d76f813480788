//! コンテナランタイムとの境界
//!
//! イメージのビルドと compose の起動・停止は docker CLI に任せる。
//! 標準入出力はそのまま引き継ぐので、ビルドの進捗はリアルタイムに見える。

use crate::error::RuntimeError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// コンテナランタイムのトレイト
#[allow(async_fn_in_trait)]
pub trait ContainerRuntime {
    /// `context` をビルドコンテキストとして `tag` のイメージをビルド
    async fn build_image(&self, tag: &str, context: &Path) -> Result<(), RuntimeError>;
    /// `project_dir` のマニフェストでトポロジーを起動
    async fn compose_up(&self, project_dir: &Path) -> Result<(), RuntimeError>;
    /// `project_dir` のトポロジーを停止し、ボリュームとイメージも削除
    async fn compose_down(&self, project_dir: &Path) -> Result<(), RuntimeError>;
    /// `tag` のイメージを削除（存在しなくても成功）
    async fn remove_image(&self, tag: &str, workdir: &Path) -> Result<(), RuntimeError>;
}

/// docker CLI を使うランタイム
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> Result<(), RuntimeError> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(%command, dir = %dir.display(), "Running container runtime command");

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            // 途中で放棄された（Ctrl-C など）ときに子プロセスを残さない
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| RuntimeError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(RuntimeError::Failed {
                command,
                code: status.code(),
            });
        }
        Ok(())
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl ContainerRuntime for DockerCli {
    async fn build_image(&self, tag: &str, context: &Path) -> Result<(), RuntimeError> {
        self.run(context, &["build", "-t", tag, "."]).await
    }

    async fn compose_up(&self, project_dir: &Path) -> Result<(), RuntimeError> {
        self.run(project_dir, &["compose", "up", "-d", "--build"])
            .await
    }

    async fn compose_down(&self, project_dir: &Path) -> Result<(), RuntimeError> {
        self.run(
            project_dir,
            &["compose", "down", "--volumes", "--rmi", "all"],
        )
        .await
    }

    async fn remove_image(&self, tag: &str, workdir: &Path) -> Result<(), RuntimeError> {
        self.run(workdir, &["image", "rm", "-f", tag]).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_successful_command() {
        let dir = tempdir().unwrap();
        let runtime = DockerCli::new("true");
        runtime.compose_up(dir.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_command_reports_exit_code() {
        let dir = tempdir().unwrap();
        let runtime = DockerCli::new("false");

        match runtime.compose_down(dir.path()).await {
            Err(RuntimeError::Failed { command, code }) => {
                assert_eq!(command, "false compose down --volumes --rmi all");
                assert_eq!(code, Some(1));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remove_image_command() {
        let dir = tempdir().unwrap();
        let runtime = DockerCli::new("false");

        match runtime.remove_image("chaosflow_journey_base_7", dir.path()).await {
            Err(RuntimeError::Failed { command, .. }) => {
                assert_eq!(command, "false image rm -f chaosflow_journey_base_7");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_reports_spawn_error() {
        let dir = tempdir().unwrap();
        let runtime = DockerCli::new("chaosflow-no-such-docker-binary");

        let result = runtime.build_image("tag", dir.path()).await;
        assert!(matches!(result, Err(RuntimeError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_build_runs_inside_context() {
        let dir = tempdir().unwrap();
        // `sh build -t tag .` はカレントディレクトリの build スクリプトを実行する
        std::fs::write(dir.path().join("marker"), "").unwrap();
        std::fs::write(
            dir.path().join("build"),
            "[ \"$1\" = -t ] && [ \"$2\" = tag ] && [ \"$3\" = . ] && test -f marker\n",
        )
        .unwrap();
        let runtime = DockerCli::new("sh");

        runtime.build_image("tag", dir.path()).await.unwrap();

        let elsewhere = tempdir().unwrap();
        std::fs::write(elsewhere.path().join("build"), "test -f marker\n").unwrap();
        let result = runtime.build_image("tag", elsewhere.path()).await;
        assert!(matches!(result, Err(RuntimeError::Failed { .. })));
    }
}

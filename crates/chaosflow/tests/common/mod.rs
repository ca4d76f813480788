use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 一時ディレクトリをカレントにして CLI を実行するためのプロジェクト
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.root.path().join(name), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// グローバル設定や環境変数の影響を受けない chaosflow コマンド
    pub fn command(&self) -> Command {
        Command::from_std(self.std_command())
    }

    /// 実行中にシグナルを送るテスト用（`spawn` できる std のコマンド）
    pub fn std_command(&self) -> std::process::Command {
        let home = self.root.path().join("home");
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("chaosflow"));
        cmd.current_dir(self.root.path())
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env_remove("CHAOSFLOW_CONFIG_PATH")
            .env_remove("CHAOSFLOW_DOCKER")
            .env_remove("CHAOSFLOW_WORKSPACE_ROOT");
        cmd
    }
}

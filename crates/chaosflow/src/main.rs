mod commands;

use clap::Parser;
use std::path::PathBuf;

/// 設定ファイルを省略して --create したときの書き出し先
const DEFAULT_CONFIG_FILE: &str = "chaosflow.yaml";

#[derive(Parser)]
#[command(name = "chaosflow")]
#[command(about = "サービスとジャーニーを docker compose で組み上げるカオステストツール", long_about = None)]
#[command(version)]
struct Cli {
    /// 設定ファイル（.json / .yaml / .toml）。省略時は自動検出
    file: Option<PathBuf>,

    /// サンプル設定ファイルを書き出す（既存のファイルは上書き）
    #[arg(long)]
    create: bool,

    /// トポロジーを起動し、Ctrl-C で停止する
    #[arg(long, conflicts_with = "create")]
    up: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if cli.create {
        let path = cli
            .file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        return commands::create::handle(&path);
    }

    let path = chaosflow_config::find_config_file(cli.file.as_deref())?;

    if cli.up {
        let settings = chaosflow_config::RuntimeSettings::from_env();
        commands::up::handle(&path, &settings).await
    } else {
        commands::show::handle(&path)
    }
}

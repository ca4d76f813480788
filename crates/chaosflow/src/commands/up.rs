use anyhow::Context;
use chaosflow_compose::{Compiler, ContainerRuntime, DockerCli, Lifecycle, Workspace};
use chaosflow_config::RuntimeSettings;
use colored::Colorize;
use std::path::Path;
use tracing::{info, warn};

/// トポロジーを起動し、Ctrl-C を受けたら停止する
///
/// 起動中の Ctrl-C、起動の失敗、Ctrl-C の待ち受け失敗のいずれでも
/// ワークスペースは必ず片付ける。
pub async fn handle(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    let config = chaosflow_core::load(path)
        .with_context(|| format!("設定ファイルを読み込めませんでした: {}", path.display()))?;

    let compiler = Compiler::new(&settings.workspace_root)?;
    let workspace = compiler.compile(&config)?;
    println!(
        "ワークスペース: {}",
        workspace.path().display().to_string().cyan()
    );
    println!("ネットワーク: {}", workspace.network_name().cyan());

    let lifecycle = Lifecycle::new(DockerCli::new(settings.docker_bin.as_str()));

    let outcome = run_until_interrupted(&lifecycle, &workspace).await;

    println!();
    if outcome.is_err() {
        eprintln!("{}", "✗ 起動に失敗しました。後片付けをしています...".red());
    } else {
        println!("{}", "停止中...".yellow());
    }
    let teardown = lifecycle.down(&workspace).await;

    match (outcome, teardown) {
        (Err(e), Err(down_err)) => {
            eprintln!("  {}", down_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), Err(down_err)) => Err(down_err.into()),
        (Ok(()), Ok(())) => {
            println!("{}", "✓ 停止しました".green());
            Ok(())
        }
    }
}

/// 起動してから Ctrl-C を待つ
///
/// Ctrl-C の待ち受けは起動前に始めるので、イメージのビルド中に
/// 押された場合も起動を中断して戻る。
async fn run_until_interrupted<R: ContainerRuntime>(
    lifecycle: &Lifecycle<R>,
    workspace: &Workspace,
) -> anyhow::Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    tokio::select! {
        biased;
        signal = &mut ctrl_c => {
            signal.context("Ctrl-C の待ち受けに失敗しました")?;
            warn!("Interrupted while starting topology");
            return Ok(());
        }
        result = lifecycle.up(workspace) => result?,
    }

    println!();
    println!("{}", "✓ トポロジーが起動しました".green().bold());
    println!("  Ctrl-C で停止します");

    ctrl_c
        .await
        .context("Ctrl-C の待ち受けに失敗しました")?;
    info!("Interrupt received");
    Ok(())
}

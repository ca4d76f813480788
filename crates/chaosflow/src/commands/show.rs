use anyhow::Context;
use colored::Colorize;
use std::path::Path;

/// 設定を読み込んでサマリーを表示
pub fn handle(path: &Path) -> anyhow::Result<()> {
    let config = chaosflow_core::load(path)
        .with_context(|| format!("設定ファイルを読み込めませんでした: {}", path.display()))?;

    println!("設定ファイル: {}", path.display().to_string().cyan());
    println!("{}", "✓ 設定ファイルは正常です！".green().bold());
    println!();
    println!("サマリー:");

    println!("  サービス: {}個", config.services.len());
    for service in &config.services {
        println!("    - {} ({})", service.name.cyan(), service.image);
    }

    println!("  ジャーニー: {}個", config.journeys.len());
    for journey in &config.journeys {
        println!(
            "    - {} ({}ステップ)",
            journey.name.cyan(),
            journey.steps.len()
        );
    }

    println!("  ステージ: {}個", config.stages.len());
    for stage in &config.stages {
        println!(
            "    - {} (クライアント {}、{:?})",
            stage.name.cyan(),
            stage.clients,
            stage.duration
        );
        println!(
            "      ディスク破損 {} / ネットワーク障害 {} / 全停止 {}",
            stage.disk_corruption, stage.network_failure, stage.full_outage
        );
    }

    Ok(())
}

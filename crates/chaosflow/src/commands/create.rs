use anyhow::Context;
use colored::Colorize;
use std::path::Path;

pub fn handle(path: &Path) -> anyhow::Result<()> {
    chaosflow_core::create(path)
        .with_context(|| format!("設定ファイルを作成できませんでした: {}", path.display()))?;

    println!(
        "{} {}",
        "created config file".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

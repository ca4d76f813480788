//! 設定ファイルの読み込みと雛形の書き出し

use crate::document::RawConfig;
use crate::error::{ConfigError, EncodeError, Result};
use crate::format::Format;
use crate::model::Config;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info, instrument};

/// 設定ファイルを読み込んで `Config` を生成
///
/// 以下の処理を実行:
/// 1. ファイルの存在確認
/// 2. ファイルを開く
/// 3. 拡張子からデコーダーを選択
/// 4. 生のドキュメントにデコード
/// 5. 型付きの `Config` にパース
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Config> {
    fs::metadata(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let format = Format::from_path(path)?;
    debug!(?format, "Decoding configuration document");
    let raw = format.decode(BufReader::new(file))?;

    let config = raw.parse()?;
    info!(
        services = config.services.len(),
        journeys = config.journeys.len(),
        stages = config.stages.len(),
        "Configuration loaded"
    );
    Ok(config)
}

/// サンプル設定ファイルを書き出す
///
/// 既存のファイルは確認なしで上書きされる。
#[instrument(skip(path), fields(path = %path.display()))]
pub fn create(path: &Path) -> Result<()> {
    let format = Format::from_path(path)?;

    let encode_error = |source: EncodeError| ConfigError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| encode_error(e.into()))?;
    format
        .encode(&RawConfig::example(), BufWriter::new(file))
        .map_err(encode_error)?;

    info!(?format, "Example configuration written");
    Ok(())
}

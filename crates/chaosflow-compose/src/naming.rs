//! ノード名・ネットワーク名の命名規則

use regex::Regex;
use std::sync::LazyLock;

static INVALID_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]+").expect("sanitize pattern is valid"));


/// ジャーニーのビルドコンテキストを置くディレクトリ
pub const JOURNEYS_DIR: &str = "_journeys";

/// ベースイメージのビルドコンテキスト（`_journeys` 配下）
pub const BASE_CONTEXT_DIR: &str = "_base";

/// 生成する compose マニフェストのファイル名
pub const MANIFEST_FILE: &str = "docker-compose.yml";

/// ユーザー指定の名前をパス要素・ノード名として使える形にする
///
/// `[A-Za-z0-9_]` 以外の文字の連続を `_` 一文字に置き換える。
pub fn sanitize_name(name: &str) -> String {
    INVALID_RUN.replace_all(name, "_").into_owned()
}

/// ジャーニーコンテナのノード名: `journey__{sanitized}`
pub fn journey_node_name(name: &str) -> String {
    format!("journey__{}", sanitize_name(name))
}

/// 実行ごとに分離されたネットワーク名: `chaosflow_{run_id}`
pub fn network_name(run_id: u32) -> String {
    format!("chaosflow_{run_id}")
}

/// 実行ごとのジャーニー用ベースイメージのタグ: `chaosflow_journey_base_{run_id}`
pub fn base_image_tag(run_id: u32) -> String {
    format!("chaosflow_journey_base_{run_id}")
}

/// ワークスペースのディレクトリ名: `chaosflow_compose_{run_id}`
pub fn workspace_dir_name(run_id: u32) -> String {
    format!("chaosflow_compose_{run_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("get index"), "get_index");
        assert_eq!(sanitize_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_name("nginx_service"), "nginx_service");
        assert_eq!(sanitize_name("Web01"), "Web01");
    }

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_name("a  -/ b"), "a_b");
        assert_eq!(sanitize_name("  lead and trail  "), "_lead_and_trail_");
        assert_eq!(sanitize_name("日本語のジャーニー"), "_");
        assert!(!sanitize_name("x :: y :: z").contains("__"));
    }

    #[test]
    fn test_node_and_network_names() {
        assert_eq!(journey_node_name("get index"), "journey__get_index");
        assert_eq!(network_name(42), "chaosflow_42");
        assert_eq!(workspace_dir_name(42), "chaosflow_compose_42");
        assert_eq!(base_image_tag(42), "chaosflow_journey_base_42");
    }
}

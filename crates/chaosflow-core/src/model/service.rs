//! サービス定義

/// サービス定義
///
/// ビルド済みのイメージをそのまま起動するコンテナ。
/// `name` はトポロジー上のノード名にも使われる（サニタイズ後）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub image: String,
}

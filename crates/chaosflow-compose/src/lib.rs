//! Chaosflow の環境コンパイラとコンテナライフサイクル
//!
//! `Config` から docker compose のワークスペースを生成し、
//! docker CLI を通じてトポロジーを起動・停止します。

pub mod compiler;
pub mod error;
pub mod lifecycle;
pub mod naming;
pub mod runtime;
pub mod template;

pub use compiler::{Artifact, Compiler, Workspace, materialize};
pub use error::{ComposeError, Result, RuntimeError};
pub use lifecycle::Lifecycle;
pub use naming::{
    base_image_tag, journey_node_name, network_name, sanitize_name, workspace_dir_name,
};
pub use runtime::{ContainerRuntime, DockerCli};

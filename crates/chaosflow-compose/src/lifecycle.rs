//! トポロジーの起動と停止
//!
//! ワークスペースの削除はここだけが行う。

use crate::compiler::Workspace;
use crate::error::{ComposeError, Result};
use crate::runtime::ContainerRuntime;
use std::io::ErrorKind;
use tracing::{info, instrument, warn};

pub struct Lifecycle<R> {
    runtime: R,
}

impl<R: ContainerRuntime> Lifecycle<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// ベースイメージをビルドしてからトポロジーを起動
    ///
    /// ベースイメージのビルドに失敗した場合は compose up を実行しない。
    /// 失敗してもワークスペースは残るので、呼び出し側で `down` すること。
    #[instrument(skip_all, fields(run_id = workspace.run_id()))]
    pub async fn up(&self, workspace: &Workspace) -> Result<()> {
        info!("Building journey base image");
        self.runtime
            .build_image(&workspace.base_image_tag(), &workspace.base_context())
            .await
            .map_err(|source| ComposeError::BaseImageBuild { source })?;

        info!("Starting topology");
        self.runtime
            .compose_up(workspace.path())
            .await
            .map_err(|source| ComposeError::ComposeUp { source })?;

        info!(network = %workspace.network_name(), "Topology is up");
        Ok(())
    }

    /// トポロジーを停止してワークスペースを削除
    ///
    /// ワークスペースが既に無ければ何もしない。compose down が失敗しても
    /// ベースイメージとワークスペースの削除は試みる。
    #[instrument(skip_all, fields(run_id = workspace.run_id()))]
    pub async fn down(&self, workspace: &Workspace) -> Result<()> {
        let path = workspace.path();
        if matches!(
            tokio::fs::metadata(path).await,
            Err(ref e) if e.kind() == ErrorKind::NotFound
        ) {
            info!("Workspace already removed");
            return Ok(());
        }

        info!("Stopping topology");
        let compose_down = self.runtime.compose_down(path).await;
        self.remove_base_image(workspace).await;

        if let Err(source) = compose_down {
            if let Err(e) = tokio::fs::remove_dir_all(path).await {
                warn!(error = %e, workspace = %path.display(), "Failed to remove workspace");
            }
            return Err(ComposeError::ComposeDown { source });
        }

        tokio::fs::remove_dir_all(path)
            .await
            .map_err(|source| ComposeError::RemoveWorkspace {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Topology is down");
        Ok(())
    }

    async fn remove_base_image(&self, workspace: &Workspace) {
        let tag = workspace.base_image_tag();
        if let Err(e) = self.runtime.remove_image(&tag, workspace.path()).await {
            warn!(error = %e, %tag, "Failed to remove journey base image");
        }
    }
}

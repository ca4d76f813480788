//! 環境コンパイラ
//!
//! `Config` から一時的なワークスペース（ビルドコンテキストと compose
//! マニフェスト）を生成します。生成は2段階に分かれています:
//!
//! 1. `Compiler::plan` — 生成物の内容を文字列として組み立てる（I/O なし）
//! 2. `materialize` — 組み立てた生成物をディスクに書き出す

use crate::error::{ComposeError, Result};
use crate::naming::{
    BASE_CONTEXT_DIR, JOURNEYS_DIR, MANIFEST_FILE, base_image_tag, network_name,
    sanitize_name, workspace_dir_name,
};
use crate::template::{BASE_DOCKERFILE, TemplateSet};
use chaosflow_core::Config;
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// ワークスペースに書き出す1ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// ワークスペースのルートからの相対パス
    pub path: PathBuf,
    pub contents: String,
    /// 実行権限を付けるか（エントリポイント）
    pub executable: bool,
}

impl Artifact {
    fn file(path: PathBuf, contents: impl Into<String>) -> Self {
        Self {
            path,
            contents: contents.into(),
            executable: false,
        }
    }

    fn script(path: PathBuf, contents: impl Into<String>) -> Self {
        Self {
            path,
            contents: contents.into(),
            executable: true,
        }
    }
}

/// コンパイル済みのワークスペース
///
/// 削除は `Lifecycle::down` だけが行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    run_id: u32,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, run_id: u32) -> Self {
        Self {
            root: root.into(),
            run_id,
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    /// この実行専用のネットワーク名
    pub fn network_name(&self) -> String {
        network_name(self.run_id)
    }

    /// この実行専用のジャーニー用ベースイメージ
    pub fn base_image_tag(&self) -> String {
        base_image_tag(self.run_id)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// ベースイメージのビルドコンテキスト
    pub fn base_context(&self) -> PathBuf {
        self.root.join(JOURNEYS_DIR).join(BASE_CONTEXT_DIR)
    }

    /// ジャーニーのビルドコンテキスト
    pub fn journey_context(&self, journey_name: &str) -> PathBuf {
        self.root.join(JOURNEYS_DIR).join(sanitize_name(journey_name))
    }
}

pub struct Compiler {
    workspace_root: PathBuf,
    templates: TemplateSet,
}

impl Compiler {
    /// `workspace_root` の下に実行ごとのワークスペースを作るコンパイラ
    pub fn new(workspace_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            workspace_root: workspace_root.into(),
            templates: TemplateSet::new()?,
        })
    }

    /// スレッドローカルの乱数源で実行IDを決めてコンパイル
    pub fn compile(&self, config: &Config) -> Result<Workspace> {
        self.compile_with_rng(config, &mut rand::thread_rng())
    }

    /// 指定した乱数源で実行IDを決めてコンパイル
    #[instrument(skip_all, fields(workspace_root = %self.workspace_root.display()))]
    pub fn compile_with_rng<R: Rng + ?Sized>(
        &self,
        config: &Config,
        rng: &mut R,
    ) -> Result<Workspace> {
        let run_id: u32 = rng.r#gen();
        let artifacts = self.plan(config, run_id)?;

        let root = self.workspace_root.join(workspace_dir_name(run_id));
        fs::create_dir(&root).map_err(|source| ComposeError::CreateDir {
            path: root.clone(),
            source,
        })?;

        materialize(&root, &artifacts)?;

        info!(
            run_id,
            workspace = %root.display(),
            services = config.services.len(),
            journeys = config.journeys.len(),
            "Workspace compiled"
        );
        Ok(Workspace::new(root, run_id))
    }

    /// ワークスペースの全生成物を組み立てる
    ///
    /// サニタイズ後の名前が重なった場合は後のものが前のものを上書きする
    /// （警告だけ出す）。
    pub fn plan(&self, config: &Config, run_id: u32) -> Result<Vec<Artifact>> {
        warn_on_collisions("service", config.services.iter().map(|s| s.name.as_str()));
        let journey_names = config.journeys.iter().map(|j| j.name.as_str());
        warn_on_collisions(
            "journey",
            std::iter::once(BASE_CONTEXT_DIR).chain(journey_names),
        );

        let journeys_dir = PathBuf::from(JOURNEYS_DIR);
        let mut artifacts = vec![Artifact::file(
            journeys_dir.join(BASE_CONTEXT_DIR).join("Dockerfile"),
            BASE_DOCKERFILE,
        )];

        let journey_dockerfile = self.templates.render_journey_dockerfile(run_id)?;
        for journey in &config.journeys {
            let dir = journeys_dir.join(sanitize_name(&journey.name));
            debug!(
                journey = %journey.name,
                dir = %dir.display(),
                steps = journey.steps.len(),
                "Planning journey build context"
            );

            artifacts.push(Artifact::file(
                dir.join("Dockerfile"),
                journey_dockerfile.clone(),
            ));
            artifacts.push(Artifact::script(
                dir.join("entrypoint.sh"),
                self.templates.render_entrypoint(journey)?,
            ));
        }

        artifacts.push(Artifact::file(
            PathBuf::from(MANIFEST_FILE),
            self.templates.render_manifest(config, run_id)?,
        ));

        Ok(artifacts)
    }
}

fn warn_on_collisions<'a>(kind: &str, names: impl Iterator<Item = &'a str>) {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        let sanitized = sanitize_name(name);
        if let Some(previous) = seen.insert(sanitized.clone(), name) {
            warn!(
                kind,
                first = previous,
                second = name,
                sanitized = %sanitized,
                "Names collide after sanitization; the later one overwrites the earlier"
            );
        }
    }
}

/// 生成物をワークスペースに書き出す
pub fn materialize(root: &Path, artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        let path = root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ComposeError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, &artifact.contents).map_err(|source| ComposeError::WriteFile {
            path: path.clone(),
            source,
        })?;

        if artifact.executable {
            make_executable(&path)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| {
        ComposeError::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    // 実行権限はイメージ内の chmod で付く
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosflow_core::{Journey, Service};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    fn sample_config() -> Config {
        Config {
            services: vec![Service {
                name: "nginx_service".to_string(),
                image: "nginx:latest".to_string(),
            }],
            journeys: vec![Journey {
                name: "get index".to_string(),
                steps: vec!["GET http://nginx_service/ --status 200".to_string()],
            }],
            stages: vec![],
        }
    }

    #[test]
    fn test_compile_single_service_and_journey() {
        let temp_dir = tempdir().unwrap();
        let compiler = Compiler::new(temp_dir.path()).unwrap();

        let workspace = compiler.compile(&sample_config()).unwrap();
        let root = workspace.path();
        assert!(root.starts_with(temp_dir.path()));

        // ベースイメージのビルドコンテキスト
        let base = workspace.base_context();
        assert_eq!(
            fs::read_to_string(base.join("Dockerfile")).unwrap(),
            BASE_DOCKERFILE
        );

        // ジャーニーのビルドコンテキスト
        let journey_dir = root.join("_journeys").join("get_index");
        assert_eq!(workspace.journey_context("get index"), journey_dir);
        let dockerfile = fs::read_to_string(journey_dir.join("Dockerfile")).unwrap();
        assert!(dockerfile.starts_with(&format!("FROM {}\n", workspace.base_image_tag())));

        let script = fs::read_to_string(journey_dir.join("entrypoint.sh")).unwrap();
        assert_eq!(script.matches("# step ").count(), 1);
        assert!(script.contains("# step 1\nGET http://nginx_service/ --status 200\n"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(journey_dir.join("entrypoint.sh"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o111, 0o111);
        }

        // マニフェスト
        let manifest = fs::read_to_string(workspace.manifest_path()).unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&manifest).unwrap();
        let services = doc["services"].as_mapping().unwrap();
        assert_eq!(services.len(), 2);

        let images: Vec<_> = services.values().filter(|s| s.get("image").is_some()).collect();
        let builds: Vec<_> = services.values().filter(|s| s.get("build").is_some()).collect();
        assert_eq!(images.len(), 1);
        assert_eq!(builds.len(), 1);
        assert_eq!(
            doc["services"]["journey__get_index"]["build"].as_str(),
            Some("./_journeys/get_index")
        );

        let networks = doc["networks"].as_mapping().unwrap();
        assert_eq!(networks.len(), 1);
        assert!(networks.contains_key(workspace.network_name().as_str()));
        assert_eq!(
            doc["services"]["nginx_service"]["networks"][0].as_str(),
            Some(workspace.network_name().as_str())
        );
    }

    #[test]
    fn test_compile_with_seeded_rng_is_deterministic() {
        let temp_dir = tempdir().unwrap();
        let compiler = Compiler::new(temp_dir.path()).unwrap();

        let expected_id: u32 = StdRng::seed_from_u64(99).r#gen();
        let workspace = compiler
            .compile_with_rng(&sample_config(), &mut StdRng::seed_from_u64(99))
            .unwrap();

        assert_eq!(workspace.run_id(), expected_id);
        assert_eq!(
            workspace.path(),
            temp_dir.path().join(format!("chaosflow_compose_{expected_id}"))
        );
        assert_eq!(workspace.network_name(), format!("chaosflow_{expected_id}"));
    }

    #[test]
    fn test_compile_refuses_existing_workspace() {
        let temp_dir = tempdir().unwrap();
        let compiler = Compiler::new(temp_dir.path()).unwrap();

        compiler
            .compile_with_rng(&sample_config(), &mut StdRng::seed_from_u64(5))
            .unwrap();
        let second = compiler.compile_with_rng(&sample_config(), &mut StdRng::seed_from_u64(5));
        assert!(matches!(second, Err(ComposeError::CreateDir { .. })));
    }

    #[test]
    fn test_repeated_compiles_are_isolated() {
        let temp_dir = tempdir().unwrap();
        let compiler = Compiler::new(temp_dir.path()).unwrap();

        let first = compiler.compile(&sample_config()).unwrap();
        let second = compiler.compile(&sample_config()).unwrap();
        assert_ne!(first.path(), second.path());
        assert_ne!(first.network_name(), second.network_name());
    }

    #[test]
    fn test_compile_empty_config() {
        let temp_dir = tempdir().unwrap();
        let compiler = Compiler::new(temp_dir.path()).unwrap();

        let workspace = compiler.compile(&Config::default()).unwrap();
        assert!(workspace.base_context().join("Dockerfile").is_file());

        let manifest = fs::read_to_string(workspace.manifest_path()).unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&manifest).unwrap();
        assert!(doc["services"].as_mapping().unwrap().is_empty());
        assert_eq!(doc["networks"].as_mapping().unwrap().len(), 1);
    }

    #[test]
    fn test_plan_is_pure() {
        let temp_dir = tempdir().unwrap();
        let compiler = Compiler::new(temp_dir.path()).unwrap();

        let artifacts = compiler.plan(&sample_config(), 11).unwrap();
        let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("_journeys/_base/Dockerfile"),
                PathBuf::from("_journeys/get_index/Dockerfile"),
                PathBuf::from("_journeys/get_index/entrypoint.sh"),
                PathBuf::from("docker-compose.yml"),
            ]
        );
        assert!(artifacts[2].executable);
        assert!(!artifacts[1].executable);

        // plan はディスクに何も書かない
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_sanitized_collision_overwrites_earlier_journey() {
        let temp_dir = tempdir().unwrap();
        let compiler = Compiler::new(temp_dir.path()).unwrap();
        let config = Config {
            journeys: vec![
                Journey {
                    name: "a b".to_string(),
                    steps: vec!["echo first".to_string()],
                },
                Journey {
                    name: "a/b".to_string(),
                    steps: vec!["echo second".to_string()],
                },
            ],
            ..Default::default()
        };

        let workspace = compiler.compile(&config).unwrap();
        let script =
            fs::read_to_string(workspace.journey_context("a_b").join("entrypoint.sh")).unwrap();
        assert!(script.contains("echo second"));
        assert!(!script.contains("echo first"));
    }

    #[test]
    fn test_materialize_reports_write_failure() {
        let temp_dir = tempdir().unwrap();
        let blocker = temp_dir.path().join("_journeys");
        fs::write(&blocker, "not a directory").unwrap();

        let artifacts = vec![Artifact::file(
            PathBuf::from("_journeys/_base/Dockerfile"),
            BASE_DOCKERFILE,
        )];
        let result = materialize(temp_dir.path(), &artifacts);
        assert!(matches!(result, Err(ComposeError::CreateDir { .. })));
    }
}

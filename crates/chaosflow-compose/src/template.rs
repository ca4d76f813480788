//! 生成物のテンプレート
//!
//! Teraを使用して Dockerfile・エントリポイント・compose マニフェストを
//! 文字列として生成します。ファイルへの書き出しは `compiler` が行います。

use crate::error::Result;
use crate::naming::{
    JOURNEYS_DIR, base_image_tag, journey_node_name, network_name, sanitize_name,
};
use chaosflow_core::{Config, Journey};
use serde::Serialize;
use tera::{Context, Tera};

/// ジャーニー共通のベースイメージ
pub const BASE_DOCKERFILE: &str = include_str!("../assets/journey-base.Dockerfile");

pub const JOURNEY_DOCKERFILE: &str = "journey.Dockerfile";
pub const ENTRYPOINT: &str = "entrypoint.sh";
pub const MANIFEST: &str = "docker-compose.yml";

const JOURNEY_DOCKERFILE_TEMPLATE: &str = r#"FROM {{ base_image }}
RUN mkdir -p /journey
WORKDIR /journey
COPY . /journey
RUN chmod +x /journey/entrypoint.sh
ENTRYPOINT ["/journey/entrypoint.sh"]
"#;

// 最初に失敗したステップで止める
const ENTRYPOINT_TEMPLATE: &str = "#!/bin/sh\nset -e\n\
{% for step in steps %}# step {{ loop.index }}\n{{ step }}\n{% endfor %}";

// image はユーザー入力なので JSON 文字列として出力（YAML としても有効）
const MANIFEST_TEMPLATE: &str = "\
{% if services or journeys %}services:\n\
{% for service in services %}  {{ service.node }}:\n\
\x20   image: {{ service.image | json_encode() }}\n\
\x20   networks:\n\
\x20     - {{ network }}\n\
{% endfor %}\
{% for journey in journeys %}  {{ journey.node }}:\n\
\x20   build: {{ journey.context }}\n\
\x20   networks:\n\
\x20     - {{ network }}\n\
{% endfor %}\
{% else %}services: {}\n{% endif %}\
networks:\n\
\x20 {{ network }}:\n";

#[derive(Serialize)]
struct ServiceNode<'a> {
    node: String,
    image: &'a str,
}

#[derive(Serialize)]
struct JourneyNode {
    node: String,
    context: String,
}

/// 名前付きテンプレートの集合
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (JOURNEY_DOCKERFILE, JOURNEY_DOCKERFILE_TEMPLATE),
            (ENTRYPOINT, ENTRYPOINT_TEMPLATE),
            (MANIFEST, MANIFEST_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    fn render(&self, name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(name, context)?)
    }

    /// ベースイメージの上にジャーニーのスクリプトを載せる Dockerfile
    pub fn render_journey_dockerfile(&self, run_id: u32) -> Result<String> {
        let mut context = Context::new();
        context.insert("base_image", &base_image_tag(run_id));
        self.render(JOURNEY_DOCKERFILE, &context)
    }

    /// ステップを順に実行するシェルスクリプト
    pub fn render_entrypoint(&self, journey: &Journey) -> Result<String> {
        let mut context = Context::new();
        context.insert("steps", &journey.steps);
        self.render(ENTRYPOINT, &context)
    }

    /// 全サービスと全ジャーニーを1つのネットワークにつなぐ compose マニフェスト
    pub fn render_manifest(&self, config: &Config, run_id: u32) -> Result<String> {
        let services: Vec<_> = config
            .services
            .iter()
            .map(|s| ServiceNode {
                node: sanitize_name(&s.name),
                image: &s.image,
            })
            .collect();
        let journeys: Vec<_> = config
            .journeys
            .iter()
            .map(|j| JourneyNode {
                node: journey_node_name(&j.name),
                context: format!("./{}/{}", JOURNEYS_DIR, sanitize_name(&j.name)),
            })
            .collect();

        let mut context = Context::new();
        context.insert("services", &services);
        context.insert("journeys", &journeys);
        context.insert("network", &network_name(run_id));
        self.render(MANIFEST, &context)
    }
}

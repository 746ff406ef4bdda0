use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named layout forest and the rule that assigns roots to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForestSpec {
    pub name: String,
    pub x: f32,
    /// Substrings matched against the root identifier.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Group names matched exactly against the root's group.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl ForestSpec {
    pub fn new(name: &str, x: f32, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            x,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            groups: Vec::new(),
        }
    }
}

/// What to do with a root that no forest claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum UnclassifiedPolicy {
    Reject,
    Fallback { forest: String },
}

/// Horizontal placement of forest roots. Defaults to `Centered`; `Anchored`
/// reproduces the classic drawings, where a root box never moves off its
/// forest's x even when its subtree is wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootPlacement {
    /// Roots are centred over their children like any other node; the
    /// subtree's left edge sits at the forest offset.
    Centered,
    /// Root boxes stay at the forest offset regardless of subtree width.
    Anchored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForestOffsets {
    /// Each forest starts at its configured x. A wide forest can overlap the
    /// next one.
    Fixed,
    /// A forest starts no earlier than the previous forest's right edge plus
    /// `forest_gap`.
    Packed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectorConfig {
    pub arrow_length: f32,
    pub arrow_angle_deg: f32,
    pub stroke_width: f32,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            arrow_length: 10.0,
            arrow_angle_deg: 30.0,
            stroke_width: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupLabelConfig {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub text_offset_x: f32,
    pub text_offset_y: f32,
}

impl Default for GroupLabelConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 30.0,
            corner_radius: 7.5,
            text_offset_x: 10.0,
            text_offset_y: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub box_width: f32,
    pub box_height: f32,
    pub level_spacing: f32,
    pub sibling_spacing: f32,
    pub forest_gap: f32,
    pub origin_y: f32,
    pub margin: f32,
    pub forests: Vec<ForestSpec>,
    pub unclassified: UnclassifiedPolicy,
    pub root_placement: RootPlacement,
    pub forest_offsets: ForestOffsets,
    pub connector: ConnectorConfig,
    pub group_label: GroupLabelConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let collection_x = 50.0;
        let forest_spacing = 400.0;
        Self {
            box_width: 180.0,
            box_height: 60.0,
            level_spacing: 120.0,
            sibling_spacing: 60.0,
            forest_gap: 60.0,
            origin_y: 50.0,
            margin: 50.0,
            forests: vec![
                ForestSpec::new("collections", collection_x, &["Collection", "Iterable"]),
                ForestSpec::new("maps", collection_x + forest_spacing, &["Map"]),
            ],
            unclassified: UnclassifiedPolicy::Reject,
            root_placement: RootPlacement::Centered,
            forest_offsets: ForestOffsets::Fixed,
            connector: ConnectorConfig::default(),
            group_label: GroupLabelConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn forest(&self, name: &str) -> Option<&ForestSpec> {
        self.forests.iter().find(|forest| forest.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            background: "#F0F0F0".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    node_font_size: Option<f32>,
    group_font_size: Option<f32>,
    primary_color: Option<String>,
    primary_text_color: Option<String>,
    node_border_color: Option<String>,
    node_border_width: Option<f32>,
    line_color: Option<String>,
    group_text_color: Option<String>,
    background: Option<String>,
    interface_lighten: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => {
                config.render.background = theme.background.clone();
                config.theme = theme;
            }
            None => log::warn!(theme = theme_name; "Unknown theme, keeping the default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.node_font_size {
            config.theme.node_font_size = v;
        }
        if let Some(v) = vars.group_font_size {
            config.theme.group_font_size = v;
        }
        if let Some(v) = vars.primary_color {
            config.theme.primary_color = v;
        }
        if let Some(v) = vars.primary_text_color {
            config.theme.primary_text_color = v;
        }
        if let Some(v) = vars.node_border_color {
            config.theme.node_border_color = v;
        }
        if let Some(v) = vars.node_border_width {
            config.theme.node_border_width = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.group_text_color {
            config.theme.group_text_color = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
        if let Some(v) = vars.interface_lighten {
            config.theme.interface_lighten = v;
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}

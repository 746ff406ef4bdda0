#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod docs;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

pub use config::{load_config, Config, LayoutConfig};
pub use docs::{ClassDoc, DocumentationProvider};
pub use ir::{load_description, parse_description, HierarchyDescription};
pub use layout::{compute_layout, compute_layout_with, Layout, LayoutError};
pub use render::render_svg;
pub use theme::Theme;

/// Parses a description and renders it to SVG with `config`.
pub fn render_description(input: &str, config: &Config) -> anyhow::Result<String> {
    let desc = parse_description(input)?;
    let layout = compute_layout(&desc, &config.layout)?;
    Ok(render_svg(&layout, &config.theme, &config.layout, None))
}

use crate::config::{LayoutConfig, RenderConfig};
use crate::docs::DocumentationProvider;
use crate::ir::NodeKind;
use crate::layout::{EdgeLayout, GroupLayout, Layout, NodeLayout};
use crate::theme::{lighten, Theme};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

pub fn render_svg(
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    docs: Option<&dyn DocumentationProvider>,
) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    let colors: HashMap<&str, &str> = layout
        .groups
        .iter()
        .map(|group| (group.name.as_str(), group.color.as_str()))
        .collect();

    for group in &layout.groups {
        svg.push_str(&group_label_svg(group, theme, config));
    }

    for edge in &layout.edges {
        svg.push_str(&edge_svg(edge, theme, config));
    }

    for node in layout.nodes.values() {
        let fill = node_fill(node, &colors, theme);
        let tooltip = docs
            .and_then(|provider| provider.lookup(&node.id))
            .and_then(|doc| doc.description);
        svg.push_str(&node_svg(node, &fill, tooltip.as_deref(), theme));
    }

    svg.push_str("</svg>");
    svg
}

fn group_label_svg(group: &GroupLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let label = &config.group_label;
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r:.2}\" ry=\"{r:.2}\" fill=\"{}\"/><text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        group.x,
        group.y,
        group.width,
        group.height,
        group.color,
        group.x + label.text_offset_x,
        group.y + label.text_offset_y,
        theme.font_family,
        theme.group_font_size,
        theme.group_text_color,
        escape_xml(&group.name),
        r = label.corner_radius,
    )
}

fn edge_svg(edge: &EdgeLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let [tip, left, right] = edge.arrow_head;
    format!(
        "<path d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{}\"/><polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{color}\"/>",
        points_to_path(&edge.points),
        config.connector.stroke_width,
        tip.0,
        tip.1,
        left.0,
        left.1,
        right.0,
        right.1,
        color = theme.line_color,
    )
}

fn node_fill(node: &NodeLayout, colors: &HashMap<&str, &str>, theme: &Theme) -> String {
    let Some(base) = colors.get(node.group.as_str()) else {
        log::warn!(node = node.id.as_str(), group = node.group.as_str(); "Unknown group, using the theme colour");
        return theme.primary_color.clone();
    };
    match node.kind {
        NodeKind::Interface => lighten(base, theme.interface_lighten),
        NodeKind::Implementation => base.to_string(),
    }
}

fn node_svg(node: &NodeLayout, fill: &str, tooltip: Option<&str>, theme: &Theme) -> String {
    let mut out = String::from("<g>");
    if let Some(text) = tooltip {
        out.push_str(&format!("<title>{}</title>", escape_xml(text)));
    }
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        node.x,
        node.y,
        node.width,
        node.height,
        fill,
        theme.node_border_color,
        theme.node_border_width
    ));
    let center_x = node.x + node.width / 2.0;
    let center_y = node.y + node.height / 2.0;
    out.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{center_y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.node_font_size,
        theme.primary_text_color,
        escape_xml(&node.id)
    ));
    out.push_str("</g>");
    out
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Arial".to_string();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size {}x{}", render_cfg.width, render_cfg.height))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some((r, g, b)) = crate::theme::parse_hex_color(&render_cfg.background) {
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, 255));
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    anyhow::bail!("PNG output requires the `png` feature")
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

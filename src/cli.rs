use crate::config::{load_config, Config, ForestOffsets, UnclassifiedPolicy};
use crate::docs::{describe, load_docs};
use crate::ir::{load_description, parse_description, HierarchyDescription};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "hierdraw", version, about = "Draws interface/implementation hierarchies as forests of boxes")]
pub struct Args {
    /// Hierarchy description (.json or .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. SVG and JSON go to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Class documentation: a directory of <Class>.json files or one JSON map
    #[arg(long = "docs")]
    pub docs: Option<PathBuf>,

    /// Print the documentation report for one class and exit
    #[arg(long = "describe", requires = "docs")]
    pub describe: Option<String>,

    /// Put roots no forest claims into this forest instead of failing
    #[arg(long = "fallback-forest")]
    pub fallback_forest: Option<String>,

    /// Shift forests right so they never overlap
    #[arg(long = "packed")]
    pub packed: bool,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);

    let docs = args.docs.as_deref().map(load_docs).transpose()?;

    if let Some(class) = args.describe.as_deref() {
        let provider = docs
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--describe requires --docs"))?;
        let doc = provider
            .lookup(class)
            .ok_or_else(|| anyhow::anyhow!("No documentation found for {class}"))?;
        print!("{}", describe(class, &doc));
        return Ok(());
    }

    let desc = read_input(args.input.as_deref())?;
    debug!(nodes = desc.node_count(), groups = desc.groups.len(); "Parsed hierarchy description");

    let layout = compute_layout(&desc, &config.layout)?;
    info!(nodes = layout.nodes.len(), edges = layout.edges.len(); "Computed layout");

    match args.output_format {
        OutputFormat::Json => write_layout_dump(args.output.as_deref(), &layout)?,
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout, docs.as_deref());
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&layout, &config.theme, &config.layout, docs.as_deref());
            write_output_png(&svg, &output, &config.render)?;
        }
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(forest) = &args.fallback_forest {
        config.layout.unclassified = UnclassifiedPolicy::Fallback {
            forest: forest.clone(),
        };
    }
    if args.packed {
        config.layout.forest_offsets = ForestOffsets::Packed;
    }
}

fn read_input(path: Option<&Path>) -> Result<HierarchyDescription> {
    match path {
        Some(path) if path != Path::new("-") => load_description(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(parse_description(&buf).context("Failed to parse hierarchy description")?)
        }
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hierdraw-{}-{name}", std::process::id()))
    }

    const INPUT: &str = r##"{
        "groups": [{"name": "Lists", "x": 600, "y": 10, "color": "#F0E0C8"}],
        "interfaces": [
            {"name": "Collection", "group": "Lists"},
            {"name": "List", "group": "Lists", "parents": ["Collection"]},
            {"name": "RandomAccess", "group": "Lists"}
        ],
        "implementations": [{"name": "ArrayList", "group": "Lists", "parent": "List"}]
    }"##;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "hierdraw",
            "-i",
            "in.json",
            "-e",
            "json",
            "--fallback-forest",
            "collections",
            "--packed",
            "-w",
            "640",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.packed);
        assert_eq!(args.width, Some(640.0));
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn describe_requires_docs() {
        assert!(Args::try_parse_from(["hierdraw", "--describe", "List"]).is_err());
    }

    #[test]
    fn overrides_switch_policies() {
        let args = Args::try_parse_from([
            "hierdraw",
            "--fallback-forest",
            "maps",
            "--packed",
            "-H",
            "480",
        ])
        .unwrap();
        let mut config = Config::default();
        apply_overrides(&mut config, &args);
        assert_eq!(
            config.layout.unclassified,
            UnclassifiedPolicy::Fallback {
                forest: "maps".to_string()
            }
        );
        assert_eq!(config.layout.forest_offsets, ForestOffsets::Packed);
        assert_eq!(config.render.height, 480.0);
        assert_eq!(config.render.width, 1000.0);
    }

    #[test]
    fn run_writes_svg_with_fallback_forest() {
        let input = temp_path("input.json");
        let output = temp_path("output.svg");
        std::fs::write(&input, INPUT).unwrap();
        let args = Args::try_parse_from([
            "hierdraw",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--fallback-forest",
            "collections",
        ])
        .unwrap();
        run(&args).unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("RandomAccess"));
        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn run_rejects_unclassified_root_by_default() {
        let input = temp_path("reject.json");
        std::fs::write(&input, INPUT).unwrap();
        let args = Args::try_parse_from(["hierdraw", "-i", input.to_str().unwrap(), "-e", "json"])
            .unwrap();
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("RandomAccess"), "{err}");
        std::fs::remove_file(&input).unwrap();
    }
}

use crate::ir::NodeKind;
use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub forests: Vec<ForestDump>,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub groups: Vec<GroupDump>,
}

#[derive(Debug, Serialize)]
pub struct ForestDump {
    pub name: String,
    pub x: f32,
    pub width: f32,
    pub roots: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: NodeKind,
    pub group: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub points: Vec<[f32; 2]>,
    pub arrow_head: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct GroupDump {
    pub name: String,
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let forests = layout
            .forests
            .iter()
            .map(|forest| ForestDump {
                name: forest.name.clone(),
                x: forest.x,
                width: forest.width,
                roots: forest.roots.clone(),
            })
            .collect();

        let nodes = layout
            .nodes
            .values()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: node.kind,
                group: node.group.clone(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                points: edge.points.iter().map(|(x, y)| [*x, *y]).collect(),
                arrow_head: edge.arrow_head.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        let groups = layout
            .groups
            .iter()
            .map(|group| GroupDump {
                name: group.name.clone(),
                color: group.color.clone(),
                x: group.x,
                y: group.y,
                width: group.width,
                height: group.height,
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            forests,
            nodes,
            edges,
            groups,
        }
    }
}

/// Writes the dump as pretty JSON to `path`, or to stdout when `None`.
pub fn write_layout_dump(path: Option<&Path>, layout: &Layout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &dump)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

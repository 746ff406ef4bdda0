use std::collections::BTreeMap;

use serde::Serialize;

use crate::ir::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Bounding size reported by a subtree pass. The height is one level
/// increment, not the cumulative depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const ZERO: Extent = Extent {
        width: 0.0,
        height: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub kind: NodeKind,
    pub group: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeLayout {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub points: Vec<(f32, f32)>,
    pub arrow_head: [(f32, f32); 3],
}

#[derive(Debug, Clone)]
pub struct GroupLayout {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForestLayout {
    pub name: String,
    pub x: f32,
    pub width: f32,
    pub roots: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: BTreeMap<String, NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub groups: Vec<GroupLayout>,
    pub forests: Vec<ForestLayout>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn positions(&self) -> BTreeMap<String, Rect> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.rect()))
            .collect()
    }

    pub fn connections(&self) -> Vec<Connection> {
        self.edges
            .iter()
            .map(|edge| Connection {
                from: edge.from.clone(),
                to: edge.to.clone(),
            })
            .collect()
    }
}

mod connections;
mod error;
mod hierarchy;
mod roots;
mod routing;
mod subtree;
pub(crate) mod types;
pub use connections::*;
pub use error::*;
pub use hierarchy::*;
pub use roots::*;
pub use routing::*;
pub use subtree::*;
pub use types::*;

use crate::config::{
    ConnectorConfig, ForestOffsets, ForestSpec, LayoutConfig, RootPlacement, UnclassifiedPolicy,
};
use crate::ir::{HierarchyDescription, Node};
use indexmap::IndexMap;
use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Lays out `desc` with the forests configured in `config`.
pub fn compute_layout(
    desc: &HierarchyDescription,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let classifier = PatternClassifier::new(&config.forests);
    compute_layout_with(desc, config, &classifier)
}

/// Lays out `desc`, assigning roots to forests with `classifier`.
///
/// The pass is a pure function of its inputs: node table, parent checks,
/// hierarchy, roots, forests, subtree placement, then connections and
/// their routes.
pub fn compute_layout_with(
    desc: &HierarchyDescription,
    config: &LayoutConfig,
    classifier: &dyn ForestClassifier,
) -> Result<Layout, LayoutError> {
    let nodes = NodeTable::from_description(desc)?;
    check_parent_refs(desc, &nodes)?;
    let hierarchy = Hierarchy::build(desc);
    let roots = find_roots(&hierarchy, &nodes);
    let forests = partition_roots(&roots, &nodes, classifier, config)?;

    let mut engine = SubtreeLayout::new(&hierarchy, &nodes, config);
    let mut forest_layouts = Vec::with_capacity(forests.len());
    let mut previous_right: Option<f32> = None;
    for forest in &forests {
        let x = match (config.forest_offsets, previous_right) {
            (ForestOffsets::Packed, Some(right)) => forest.x.max(right + config.forest_gap),
            _ => forest.x,
        };
        debug!(forest = forest.name.as_str(), x = x, roots = forest.roots.len(); "Laying out forest");
        let right = engine.layout_forest(forest, x)?;
        previous_right = Some(previous_right.map_or(right, |prev| prev.max(right)));
        forest_layouts.push(ForestLayout {
            name: forest.name.clone(),
            x,
            width: right - x,
            roots: forest.roots.clone(),
        });
    }
    let positions = engine.finish();

    if let Some(node) = nodes.iter().find(|node| !positions.contains_key(&node.id)) {
        return Err(LayoutError::Unreachable {
            id: node.id.clone(),
        });
    }

    let connections = resolve_connections(desc, &positions)?;
    let edges = connections
        .into_iter()
        .map(|connection| {
            let route = route_connection(
                &positions[&connection.from],
                &positions[&connection.to],
                &config.connector,
            );
            EdgeLayout {
                from: connection.from,
                to: connection.to,
                points: route.points,
                arrow_head: route.arrow_head,
            }
        })
        .collect::<Vec<_>>();

    let node_layouts: BTreeMap<String, NodeLayout> = nodes
        .iter()
        .map(|node| {
            let rect = positions[&node.id];
            (
                node.id.clone(),
                NodeLayout {
                    id: node.id.clone(),
                    kind: node.kind,
                    group: node.group.clone(),
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                },
            )
        })
        .collect();

    let groups: Vec<GroupLayout> = desc
        .groups
        .iter()
        .map(|group| GroupLayout {
            name: group.name.clone(),
            x: group.x,
            y: group.y,
            width: config.group_label.width,
            height: config.group_label.height,
            color: group.color.clone(),
        })
        .collect();

    let (width, height) = layout_bounds(&node_layouts, &groups, config.margin);
    debug!(nodes = node_layouts.len(), edges = edges.len(), forests = forest_layouts.len(); "Hierarchy layout complete");

    Ok(Layout {
        nodes: node_layouts,
        edges,
        groups,
        forests: forest_layouts,
        width,
        height,
    })
}

fn layout_bounds(
    nodes: &BTreeMap<String, NodeLayout>,
    groups: &[GroupLayout],
    margin: f32,
) -> (f32, f32) {
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for node in nodes.values() {
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    for group in groups {
        max_x = max_x.max(group.x + group.width);
        max_y = max_y.max(group.y + group.height);
    }
    (max_x + margin, max_y + margin)
}

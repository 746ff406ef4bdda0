use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Interface,
    Implementation,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface => f.write_str("interface"),
            Self::Implementation => f.write_str("implementation"),
        }
    }
}

/// Points at the input record an identifier was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordRef {
    pub kind: NodeKind,
    pub index: usize,
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Interface => write!(f, "interfaces[{}]", self.index),
            NodeKind::Implementation => write!(f, "implementations[{}]", self.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationRecord {
    pub name: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub group: String,
    pub parent: String,
}

/// Declarative input: groups plus the interface and implementation records.
///
/// The `x`/`y` fields of the records are hand-placed coordinates from older
/// descriptions; layout ignores them and computes its own placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyDescription {
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceRecord>,
    #[serde(default)]
    pub implementations: Vec<ImplementationRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub group: String,
    pub record: RecordRef,
}

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("failed to read description: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid JSON5 description: {0}")]
    Json5(#[from] json5::Error),
}

/// Parses a description from JSON, falling back to JSON5 for relaxed input
/// (comments, trailing commas, unquoted keys).
pub fn parse_description(input: &str) -> Result<HierarchyDescription, DescriptionError> {
    match serde_json::from_str(input) {
        Ok(desc) => Ok(desc),
        Err(json_err) => match json5::from_str(input) {
            Ok(desc) => Ok(desc),
            Err(_) => Err(DescriptionError::Json(json_err)),
        },
    }
}

pub fn load_description(path: &Path) -> Result<HierarchyDescription, DescriptionError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    if is_json5 {
        return Ok(json5::from_str(&contents)?);
    }
    parse_description(&contents)
}

impl HierarchyDescription {
    /// Declared nodes in encounter order, interfaces first.
    ///
    /// Fails on the second record that reuses an identifier.
    pub fn nodes(&self) -> Result<Vec<Node>, crate::layout::LayoutError> {
        let mut seen: HashMap<&str, RecordRef> = HashMap::new();
        let mut nodes = Vec::with_capacity(self.node_count());
        let records = self
            .interfaces
            .iter()
            .enumerate()
            .map(|(index, iface)| {
                (
                    iface.name.as_str(),
                    iface.group.as_str(),
                    RecordRef {
                        kind: NodeKind::Interface,
                        index,
                    },
                )
            })
            .chain(self.implementations.iter().enumerate().map(|(index, imp)| {
                (
                    imp.name.as_str(),
                    imp.group.as_str(),
                    RecordRef {
                        kind: NodeKind::Implementation,
                        index,
                    },
                )
            }));
        for (name, group, record) in records {
            if let Some(first) = seen.get(name) {
                return Err(crate::layout::LayoutError::DuplicateNodeId {
                    id: name.to_string(),
                    first: *first,
                    second: record,
                });
            }
            seen.insert(name, record);
            nodes.push(Node {
                id: name.to_string(),
                kind: record.kind,
                group: group.to_string(),
                record,
            });
        }
        Ok(nodes)
    }

    pub fn node_count(&self) -> usize {
        self.interfaces.len() + self.implementations.len()
    }

    /// Every (parent, child, record) reference, interfaces first, in input order.
    pub fn parent_refs(&self) -> impl Iterator<Item = (&str, &str, RecordRef)> {
        let iface_refs = self
            .interfaces
            .iter()
            .enumerate()
            .flat_map(|(index, iface)| {
                iface.parents.iter().map(move |parent| {
                    (
                        parent.as_str(),
                        iface.name.as_str(),
                        RecordRef {
                            kind: NodeKind::Interface,
                            index,
                        },
                    )
                })
            });
        let impl_refs = self
            .implementations
            .iter()
            .enumerate()
            .map(|(index, imp)| {
                (
                    imp.parent.as_str(),
                    imp.name.as_str(),
                    RecordRef {
                        kind: NodeKind::Implementation,
                        index,
                    },
                )
            });
        iface_refs.chain(impl_refs)
    }

    pub fn group(&self, name: &str) -> Option<&GroupRecord> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn add_interface(&mut self, name: &str, group: &str, parents: &[&str]) {
        self.interfaces.push(InterfaceRecord {
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            group: group.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
        });
    }

    pub fn add_implementation(&mut self, name: &str, group: &str, parent: &str) {
        self.implementations.push(ImplementationRecord {
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            group: group.to_string(),
            parent: parent.to_string(),
        });
    }
}

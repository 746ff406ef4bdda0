use super::*;

/// Parent id to ordered child ids, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    children: IndexMap<String, Vec<String>>,
    child_ids: HashSet<String>,
    edge_count: usize,
}

impl Hierarchy {
    /// Interfaces' parents come first, then implementations' parent, both
    /// in input order. Dangling references are kept as-is.
    pub fn build(desc: &HierarchyDescription) -> Self {
        Self::from_edges(desc.parent_refs().map(|(parent, child, _)| (parent, child)))
    }

    pub fn from_edges<'a>(edges: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut hierarchy = Hierarchy::default();
        for (parent, child) in edges {
            hierarchy
                .children
                .entry(parent.to_string())
                .or_default()
                .push(child.to_string());
            hierarchy.child_ids.insert(child.to_string());
            hierarchy.edge_count += 1;
        }
        hierarchy
    }

    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn is_child(&self, id: &str) -> bool {
        self.child_ids.contains(id)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// Declared nodes with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl NodeTable {
    pub fn from_description(desc: &HierarchyDescription) -> Result<Self, LayoutError> {
        let nodes = desc.nodes()?;
        let index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), idx))
            .collect();
        Ok(Self { nodes, index })
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|idx| &self.nodes[*idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Every parent reference must name a declared node.
pub fn check_parent_refs(desc: &HierarchyDescription, nodes: &NodeTable) -> Result<(), LayoutError> {
    for (parent, child, record) in desc.parent_refs() {
        if !nodes.contains(parent) {
            return Err(LayoutError::DanglingReference {
                id: parent.to_string(),
                referrer: child.to_string(),
                record: Some(record),
            });
        }
    }
    Ok(())
}

use super::*;

/// Assigns a root to a named forest, or `None` when no forest claims it.
pub trait ForestClassifier {
    fn classify(&self, root: &Node) -> Option<String>;
}

impl<F> ForestClassifier for F
where
    F: Fn(&Node) -> Option<String>,
{
    fn classify(&self, root: &Node) -> Option<String> {
        self(root)
    }
}

/// Matches roots against the configured forests; the first forest with a
/// matching id substring or group name wins.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    forests: Vec<ForestSpec>,
}

impl PatternClassifier {
    pub fn new(forests: &[ForestSpec]) -> Self {
        Self {
            forests: forests.to_vec(),
        }
    }
}

impl ForestClassifier for PatternClassifier {
    fn classify(&self, root: &Node) -> Option<String> {
        self.forests
            .iter()
            .find(|forest| {
                forest
                    .patterns
                    .iter()
                    .any(|pattern| root.id.contains(pattern.as_str()))
                    || forest.groups.iter().any(|group| *group == root.group)
            })
            .map(|forest| forest.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    pub name: String,
    pub x: f32,
    pub roots: Vec<String>,
}

/// Declared nodes that never appear as a child, in declaration order.
pub fn find_roots(hierarchy: &Hierarchy, nodes: &NodeTable) -> Vec<String> {
    nodes
        .iter()
        .filter(|node| !hierarchy.is_child(&node.id))
        .map(|node| node.id.clone())
        .collect()
}

/// Splits roots into the configured forests. Forests keep their configured
/// order; forests without roots are dropped.
pub fn partition_roots(
    roots: &[String],
    nodes: &NodeTable,
    classifier: &dyn ForestClassifier,
    config: &LayoutConfig,
) -> Result<Vec<Forest>, LayoutError> {
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); config.forests.len()];
    let forest_index = |name: &str| {
        config
            .forests
            .iter()
            .position(|forest| forest.name == name)
            .ok_or_else(|| LayoutError::UnknownForest {
                forest: name.to_string(),
            })
    };

    for root in roots {
        let node = nodes.get(root).ok_or_else(|| LayoutError::DanglingReference {
            id: root.clone(),
            referrer: "root set".to_string(),
            record: None,
        })?;
        let idx = match classifier.classify(node) {
            Some(name) => forest_index(&name)?,
            None => match &config.unclassified {
                UnclassifiedPolicy::Reject => {
                    return Err(LayoutError::UnclassifiedRoot { id: root.clone() });
                }
                UnclassifiedPolicy::Fallback { forest } => {
                    debug!(root = root.as_str(), forest = forest.as_str(); "Root sent to fallback forest");
                    forest_index(forest)?
                }
            },
        };
        buckets[idx].push(root.clone());
    }

    Ok(config
        .forests
        .iter()
        .zip(buckets)
        .filter(|(_, roots)| !roots.is_empty())
        .map(|(spec, roots)| Forest {
            name: spec.name.clone(),
            x: spec.x,
            roots,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(desc: &HierarchyDescription) -> NodeTable {
        NodeTable::from_description(desc).unwrap()
    }

    fn collections_and_maps() -> HierarchyDescription {
        let mut desc = HierarchyDescription::default();
        desc.add_interface("Iterable", "Core", &[]);
        desc.add_interface("Collection", "Core", &["Iterable"]);
        desc.add_interface("Map", "Maps", &[]);
        desc.add_implementation("HashMap", "Maps", "Map");
        desc.add_interface("RandomAccess", "Markers", &[]);
        desc
    }

    #[test]
    fn roots_never_appear_as_children() {
        let desc = collections_and_maps();
        let hierarchy = Hierarchy::build(&desc);
        let roots = find_roots(&hierarchy, &table(&desc));
        assert_eq!(roots, vec!["Iterable", "Map", "RandomAccess"]);
    }

    #[test]
    fn reject_policy_reports_unclassified_root() {
        let desc = collections_and_maps();
        let nodes = table(&desc);
        let roots = find_roots(&Hierarchy::build(&desc), &nodes);
        let config = LayoutConfig::default();
        let classifier = PatternClassifier::new(&config.forests);
        let err = partition_roots(&roots, &nodes, &classifier, &config).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnclassifiedRoot {
                id: "RandomAccess".to_string()
            }
        );
    }

    #[test]
    fn fallback_policy_buckets_unclassified_root() {
        let desc = collections_and_maps();
        let nodes = table(&desc);
        let roots = find_roots(&Hierarchy::build(&desc), &nodes);
        let mut config = LayoutConfig::default();
        config.unclassified = UnclassifiedPolicy::Fallback {
            forest: "collections".to_string(),
        };
        let classifier = PatternClassifier::new(&config.forests);
        let forests = partition_roots(&roots, &nodes, &classifier, &config).unwrap();
        assert_eq!(forests.len(), 2);
        assert_eq!(forests[0].name, "collections");
        assert_eq!(forests[0].roots, vec!["Iterable", "RandomAccess"]);
        assert_eq!(forests[1].roots, vec!["Map"]);
        assert_eq!(forests[1].x, 450.0);
    }

    #[test]
    fn fallback_to_missing_forest_fails() {
        let desc = collections_and_maps();
        let nodes = table(&desc);
        let roots = find_roots(&Hierarchy::build(&desc), &nodes);
        let mut config = LayoutConfig::default();
        config.unclassified = UnclassifiedPolicy::Fallback {
            forest: "misc".to_string(),
        };
        let classifier = PatternClassifier::new(&config.forests);
        assert_eq!(
            partition_roots(&roots, &nodes, &classifier, &config).unwrap_err(),
            LayoutError::UnknownForest {
                forest: "misc".to_string()
            }
        );
    }

    #[test]
    fn closure_classifier_and_group_patterns() {
        let desc = collections_and_maps();
        let nodes = table(&desc);
        let roots = find_roots(&Hierarchy::build(&desc), &nodes);
        let mut config = LayoutConfig::default();
        config.forests.push(ForestSpec {
            name: "markers".to_string(),
            x: 900.0,
            patterns: Vec::new(),
            groups: vec!["Markers".to_string()],
        });

        let by_group = PatternClassifier::new(&config.forests);
        let forests = partition_roots(&roots, &nodes, &by_group, &config).unwrap();
        assert_eq!(forests.last().unwrap().roots, vec!["RandomAccess"]);

        let everything_maps = |_: &Node| Some("maps".to_string());
        let forests = partition_roots(&roots, &nodes, &everything_maps, &config).unwrap();
        assert_eq!(forests.len(), 1);
        assert_eq!(forests[0].roots.len(), 3);
    }

    #[test]
    fn classifier_naming_missing_forest_fails() {
        let desc = collections_and_maps();
        let nodes = table(&desc);
        let roots = find_roots(&Hierarchy::build(&desc), &nodes);
        let config = LayoutConfig::default();
        let to_sets = |_: &Node| Some("sets".to_string());
        assert_eq!(
            partition_roots(&roots, &nodes, &to_sets, &config).unwrap_err(),
            LayoutError::UnknownForest {
                forest: "sets".to_string()
            }
        );
    }
}

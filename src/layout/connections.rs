use super::*;

/// Re-enumerates every parent reference, independent of which parent fixed
/// the child's position. The result has one entry per reference.
pub fn resolve_connections(
    desc: &HierarchyDescription,
    positions: &BTreeMap<String, Rect>,
) -> Result<Vec<Connection>, LayoutError> {
    desc.parent_refs()
        .map(|(parent, child, record)| {
            if !positions.contains_key(parent) {
                return Err(LayoutError::DanglingReference {
                    id: parent.to_string(),
                    referrer: child.to_string(),
                    record: Some(record),
                });
            }
            if !positions.contains_key(child) {
                return Err(LayoutError::DanglingReference {
                    id: child.to_string(),
                    referrer: parent.to_string(),
                    record: Some(record),
                });
            }
            Ok(Connection {
                from: parent.to_string(),
                to: child.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(ids: &[&str]) -> BTreeMap<String, Rect> {
        ids.iter()
            .enumerate()
            .map(|(idx, id)| (id.to_string(), Rect::new(idx as f32 * 240.0, 0.0, 180.0, 60.0)))
            .collect()
    }

    #[test]
    fn multi_parent_edges_are_all_kept() {
        let mut desc = HierarchyDescription::default();
        desc.add_interface("A", "g", &[]);
        desc.add_interface("B", "g", &[]);
        desc.add_interface("C", "g", &["A", "B"]);
        desc.add_implementation("D", "g", "C");
        let connections = resolve_connections(&desc, &positions(&["A", "B", "C", "D"])).unwrap();
        let pairs: Vec<(&str, &str)> = connections
            .iter()
            .map(|c| (c.from.as_str(), c.to.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "C"), ("B", "C"), ("C", "D")]);
    }

    #[test]
    fn unplaced_endpoint_is_dangling() {
        let mut desc = HierarchyDescription::default();
        desc.add_interface("A", "g", &[]);
        desc.add_implementation("D", "g", "A");
        let err = resolve_connections(&desc, &positions(&["A"])).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::DanglingReference { ref id, ref referrer, .. } if id == "D" && referrer == "A"
        ));
    }
}

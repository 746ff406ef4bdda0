use super::*;

/// Recursive top-down placement of one or more forests.
///
/// A node is positioned by whichever traversal reaches it first. Later
/// parents see it as already visited, get a zero extent back and never move
/// it. The descent runs on an explicit frame stack, so hierarchy depth is
/// bounded by memory rather than the call stack.
pub struct SubtreeLayout<'a> {
    hierarchy: &'a Hierarchy,
    nodes: &'a NodeTable,
    config: &'a LayoutConfig,
    visited: HashSet<String>,
    positions: BTreeMap<String, Rect>,
}

/// A node whose children are being placed left to right.
struct Frame<'a> {
    id: String,
    x: f32,
    y: f32,
    is_root: bool,
    children: &'a [String],
    next: usize,
    cursor: f32,
}

impl<'a> SubtreeLayout<'a> {
    pub fn new(hierarchy: &'a Hierarchy, nodes: &'a NodeTable, config: &'a LayoutConfig) -> Self {
        Self {
            hierarchy,
            nodes,
            config,
            visited: HashSet::new(),
            positions: BTreeMap::new(),
        }
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    pub fn position(&self, id: &str) -> Option<&Rect> {
        self.positions.get(id)
    }

    /// Places `node` and its unvisited descendants with the subtree's left
    /// edge at `x`, returning the horizontal span they occupy.
    pub fn layout_subtree(
        &mut self,
        node: &str,
        x: f32,
        y: f32,
        is_root: bool,
    ) -> Result<Extent, LayoutError> {
        if !self.visited.insert(node.to_string()) {
            return Ok(Extent::ZERO);
        }

        let hierarchy = self.hierarchy;
        let mut stack = vec![Frame {
            id: node.to_string(),
            x,
            y,
            is_root,
            children: hierarchy.children(node),
            next: 0,
            cursor: x,
        }];

        loop {
            let Some(top) = stack.last_mut() else {
                return Ok(Extent::ZERO);
            };

            // Each child owns the slot to the right of its predecessors, so a
            // child's descendants stay under it.
            let children = top.children;
            if let Some(child) = children.get(top.next) {
                if !self.nodes.contains(child) {
                    return Err(LayoutError::DanglingReference {
                        id: child.clone(),
                        referrer: top.id.clone(),
                        record: None,
                    });
                }
                if top.next > 0 {
                    top.cursor += self.config.sibling_spacing;
                }
                top.next += 1;
                if self.visited.insert(child.clone()) {
                    let frame = Frame {
                        id: child.clone(),
                        x: top.cursor,
                        y: top.y + self.config.level_spacing,
                        is_root: false,
                        children: hierarchy.children(child),
                        next: 0,
                        cursor: top.cursor,
                    };
                    stack.push(frame);
                }
                continue;
            }

            let Some(frame) = stack.pop() else {
                return Ok(Extent::ZERO);
            };
            let extent = self.finish_frame(&frame);
            match stack.last_mut() {
                Some(parent) => parent.cursor += extent.width,
                None => return Ok(extent),
            }
        }
    }

    /// Places a node once all of its children have been laid out.
    fn finish_frame(&mut self, frame: &Frame<'_>) -> Extent {
        let box_width = self.config.box_width;
        if frame.children.is_empty() {
            self.place(&frame.id, frame.x, frame.y);
            return Extent {
                width: box_width,
                height: self.config.box_height,
            };
        }

        let total_width = frame.cursor - frame.x;
        let centered = !frame.is_root || self.config.root_placement == RootPlacement::Centered;
        let node_x = if centered && total_width > box_width {
            frame.x + (total_width - box_width) / 2.0
        } else {
            frame.x
        };
        self.place(&frame.id, node_x, frame.y);

        Extent {
            width: total_width.max(box_width),
            height: self.config.level_spacing + self.config.box_height,
        }
    }

    /// Lays out every root of `forest` side by side starting at `x` and
    /// returns the right edge of the last subtree.
    pub fn layout_forest(&mut self, forest: &Forest, x: f32) -> Result<f32, LayoutError> {
        let mut cursor = x;
        let mut right = x;
        for root in &forest.roots {
            let extent = self.layout_subtree(root, cursor, self.config.origin_y, true)?;
            if extent.width > 0.0 {
                right = cursor + extent.width;
                cursor = right + self.config.sibling_spacing;
            }
        }
        Ok(right)
    }

    pub fn finish(self) -> BTreeMap<String, Rect> {
        self.positions
    }

    fn place(&mut self, node: &str, x: f32, y: f32) {
        let rect = Rect::new(x, y, self.config.box_width, self.config.box_height);
        self.positions.insert(node.to_string(), rect);
    }
}

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRoute {
    pub points: Vec<(f32, f32)>,
    pub arrow_head: [(f32, f32); 3],
}

/// Orthogonal elbow from the parent's bottom centre to the child's top
/// centre, turning at the vertical midpoint between the two boxes.
pub fn route_connection(parent: &Rect, child: &Rect, connector: &ConnectorConfig) -> EdgeRoute {
    let from_x = parent.center_x();
    let from_y = parent.bottom();
    let to_x = child.center_x();
    let to_y = child.y;
    let mid_y = from_y + (to_y - from_y) / 2.0;

    let points = vec![(from_x, from_y), (from_x, mid_y), (to_x, mid_y), (to_x, to_y)];
    let arrow_head = arrow_head(
        &points,
        connector.arrow_length,
        connector.arrow_angle_deg.to_radians(),
    );
    EdgeRoute { points, arrow_head }
}

/// Triangle with its apex on the last point, opening back along the
/// direction of the final non-degenerate segment. Falls back to pointing
/// down when every segment has zero length.
pub fn arrow_head(points: &[(f32, f32)], length: f32, half_angle: f32) -> [(f32, f32); 3] {
    let Some(&tip) = points.last() else {
        return [(0.0, 0.0); 3];
    };
    let direction = points
        .iter()
        .rev()
        .skip(1)
        .map(|p| (tip.0 - p.0, tip.1 - p.1))
        .find(|(dx, dy)| dx.abs() > f32::EPSILON || dy.abs() > f32::EPSILON)
        .unwrap_or((0.0, 1.0));
    let angle = direction.1.atan2(direction.0);
    let left = (
        tip.0 - length * (angle - half_angle).cos(),
        tip.1 - length * (angle - half_angle).sin(),
    );
    let right = (
        tip.0 - length * (angle + half_angle).cos(),
        tip.1 - length * (angle + half_angle).sin(),
    );
    [tip, left, right]
}

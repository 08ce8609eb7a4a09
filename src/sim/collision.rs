//! Collision detection between rotated rectangles
//!
//! Separating axis test specialised to two convex quadrilaterals. Each
//! rectangle is rotated about its own centre; the edge normals of both
//! rectangles are tried as candidate separating axes.

use glam::Vec2;

use super::layout::Rect;

/// Corners of a rectangle rotated about its centre, in winding order
pub fn rotated_corners(rect: &Rect, degrees: f32) -> [Vec2; 4] {
    let center = rect.center();
    let half = Vec2::new(rect.width / 2.0, rect.height / 2.0);
    let rotation = Vec2::from_angle(degrees.to_radians());

    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| center + rotation.rotate(corner))
}

/// Edge normals of a quadrilateral (not normalised; projection only compares)
fn edge_normals(corners: &[Vec2; 4]) -> [Vec2; 4] {
    std::array::from_fn(|i| {
        let edge = corners[(i + 1) % 4] - corners[i];
        Vec2::new(-edge.y, edge.x)
    })
}

/// Min/max of the corners projected onto an axis
fn project(corners: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    corners
        .iter()
        .map(|c| c.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p), hi.max(p))
        })
}

/// Check whether two rectangles, each rotated about its own centre, overlap
///
/// Touching edges count as overlap.
pub fn overlaps(a: &Rect, b: &Rect, rotation_a_deg: f32, rotation_b_deg: f32) -> bool {
    let corners_a = rotated_corners(a, rotation_a_deg);
    let corners_b = rotated_corners(b, rotation_b_deg);

    edge_normals(&corners_a)
        .into_iter()
        .chain(edge_normals(&corners_b))
        .all(|axis| {
            let (min_a, max_a) = project(&corners_a, axis);
            let (min_b, max_b) = project(&corners_b, axis);
            !(max_a < min_b || max_b < min_a)
        })
}

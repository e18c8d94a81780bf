//! Perspective projection of oriented 3D boxes

use nalgebra::{Rotation3, Vector3};

use crate::camera::{CameraIntrinsics, DEPTH_EPSILON};
use crate::detection::{Box3D, Orientation};
use crate::error::ProjectionError;

/// Cube edge topology over the fixed corner ordering.
///
/// Corners are the sign combinations of (±dx/2, ±dy/2, ±dz/2) with x varying
/// slowest: 0:(+,+,+) 1:(+,+,-) 2:(+,-,+) 3:(+,-,-) 4:(-,+,+) 5:(-,+,-)
/// 6:(-,-,+) 7:(-,-,-). The first four edges run along z, the next four
/// along y, the last four along x.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// A 3D box projected onto the image plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedBox {
    /// Pixel coordinates of the 8 corners, in the fixed corner ordering.
    pub corners: [(f64, f64); 8],
    /// Camera-space depth of each corner, same ordering.
    pub depths: [f64; 8],
}

impl ProjectedBox {
    pub fn edges(&self) -> &'static [(usize, usize); 12] {
        &BOX_EDGES
    }

    /// Corner indices sorted nearest-first by camera-space depth.
    /// Ties break on corner index, so the permutation is deterministic.
    pub fn depth_order(&self) -> [usize; 8] {
        let mut order = [0usize, 1, 2, 3, 4, 5, 6, 7];
        order.sort_by(|&a, &b| {
            self.depths[a]
                .partial_cmp(&self.depths[b])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        order
    }

    /// Depth estimate for an edge: mean of its two corner depths.
    /// Best-effort input for hidden-line treatment, not exact occlusion.
    pub fn edge_depth(&self, edge: (usize, usize)) -> f64 {
        (self.depths[edge.0] + self.depths[edge.1]) / 2.0
    }

    /// Index of the corner farthest from the camera. In general position
    /// this corner and its three incident edges are occluded by the box.
    pub fn deepest_corner(&self) -> usize {
        self.depth_order()[7]
    }
}

/// Build the rotation matrix for a box orientation.
///
/// Applied to column vectors: yaw about +Y first, then pitch about +X,
/// then roll about +Z.
pub fn rotation_matrix(rotation: &Orientation) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.roll)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.pitch)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.yaw)
}

fn corner_offsets(size: &Vector3<f64>) -> [Vector3<f64>; 8] {
    let (hx, hy, hz) = (size.x / 2.0, size.y / 2.0, size.z / 2.0);
    [
        Vector3::new(hx, hy, hz),
        Vector3::new(hx, hy, -hz),
        Vector3::new(hx, -hy, hz),
        Vector3::new(hx, -hy, -hz),
        Vector3::new(-hx, hy, hz),
        Vector3::new(-hx, hy, -hz),
        Vector3::new(-hx, -hy, hz),
        Vector3::new(-hx, -hy, -hz),
    ]
}

/// Project the 8 corners of an oriented box through the pinhole model.
///
/// Policy: if any corner lies behind (or on) the camera plane, the whole box
/// is skipped with `ProjectionError::BehindCamera` rather than drawn as a
/// partial wireframe. Out-of-canvas pixel coordinates are returned as-is;
/// clamping is the renderer's responsibility.
pub fn project_box(
    bbox: &Box3D,
    cam: &CameraIntrinsics,
) -> Result<ProjectedBox, ProjectionError> {
    let rotation = rotation_matrix(&bbox.rotation);

    let mut corners = [(0.0, 0.0); 8];
    let mut depths = [0.0; 8];

    for (i, offset) in corner_offsets(&bbox.size).iter().enumerate() {
        let point_camera = bbox.center + rotation * offset;

        if point_camera.z <= DEPTH_EPSILON {
            return Err(ProjectionError::BehindCamera);
        }

        depths[i] = point_camera.z;
        corners[i] = (
            cam.fx * point_camera.x / point_camera.z + cam.cx,
            cam.fy * point_camera.y / point_camera.z + cam.cy,
        );
    }

    Ok(ProjectedBox { corners, depths })
}

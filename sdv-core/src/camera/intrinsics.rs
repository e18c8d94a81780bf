use nalgebra::Vector3;

/// Points closer than this to the camera plane are not projectable.
pub(crate) const DEPTH_EPSILON: f64 = 1e-6;

/// Ideal pinhole camera intrinsics
#[derive(Debug, Clone, PartialEq)]
pub struct CameraIntrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    pub width: u32,
    pub height: u32,
}

impl CameraIntrinsics {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64, width: u32, height: u32) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            width,
            height,
        }
    }

    /// Get focal lengths
    pub fn focal_length(&self) -> (f64, f64) {
        (self.fx, self.fy)
    }

    /// Get principal point
    pub fn principal_point(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    /// Get image dimensions these intrinsics are calibrated for
    pub fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Project a 3D point in camera frame to pixel coordinates.
    /// Returns None if the point is behind or on the camera plane.
    pub fn project_point(&self, point_camera: &Vector3<f64>) -> Option<(f64, f64)> {
        if point_camera.z <= DEPTH_EPSILON {
            return None;
        }

        let u = self.fx * point_camera.x / point_camera.z + self.cx;
        let v = self.fy * point_camera.y / point_camera.z + self.cy;

        Some((u, v))
    }

    /// Rescale intrinsics calibrated at their reference dimensions to a
    /// different image size. Focal lengths and principal point scale
    /// linearly with the respective dimension ratio.
    pub fn scaled_to(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let sx = width as f64 / self.width as f64;
        let sy = height as f64 / self.height as f64;
        Self {
            fx: self.fx * sx,
            fy: self.fy * sy,
            cx: self.cx * sx,
            cy: self.cy * sy,
            width,
            height,
        }
    }
}

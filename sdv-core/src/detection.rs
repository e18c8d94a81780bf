use nalgebra::Vector3;

/// Detection mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Detect2d,
    Detect3d,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Detect2d => "2d",
            Mode::Detect3d => "3d",
        }
    }
}

/// Box orientation as Euler angles, in radians.
///
/// The rotation is applied to column vectors as yaw about +Y first, then
/// pitch about +X, then roll about +Z, i.e. `R = Rz(roll) * Rx(pitch) * Ry(yaw)`.
/// The same convention is used wherever a rotation matrix is built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Orientation {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Construct from wire-format angles, which are degrees by contract.
    pub fn from_degrees(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            roll: roll.to_radians(),
            pitch: pitch.to_radians(),
            yaw: yaw.to_radians(),
        }
    }
}

/// Oriented 3D bounding box in the camera frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Box3D {
    pub center: Vector3<f64>,
    pub size: Vector3<f64>,
    pub rotation: Orientation,
    pub label: String,
}

impl Box3D {
    pub fn new(
        center: Vector3<f64>,
        size: Vector3<f64>,
        rotation: Orientation,
        label: impl Into<String>,
    ) -> Self {
        Self {
            center,
            size,
            rotation,
            label: label.into(),
        }
    }
}

/// Axis-aligned 2D bounding box in pixel coordinates, with x1 <= x2 and
/// y1 <= y2 guaranteed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Box2D {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub label: String,
}

impl Box2D {
    /// Construct a 2D box, swapping coordinates into canonical order
    /// when they arrive flipped.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, label: impl Into<String>) -> Self {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self {
            x1,
            y1,
            x2,
            y2,
            label: label.into(),
        }
    }

    /// True when the box has no area and thus nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }
}

/// Canonical record every parsed detection result is normalized to.
/// Downstream code matches on the variant, never on the raw representation.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionRecord {
    Rect(Box2D),
    Cuboid(Box3D),
}

impl DetectionRecord {
    pub fn label(&self) -> &str {
        match self {
            DetectionRecord::Rect(b) => &b.label,
            DetectionRecord::Cuboid(b) => &b.label,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            DetectionRecord::Rect(_) => Mode::Detect2d,
            DetectionRecord::Cuboid(_) => Mode::Detect3d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box2d_normalizes_flipped_coordinates() {
        let b = Box2D::new(50.0, 60.0, 10.0, 20.0, "cat");
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (10.0, 20.0, 50.0, 60.0));
    }

    #[test]
    fn test_box2d_zero_area_detection() {
        assert!(Box2D::new(10.0, 10.0, 10.0, 50.0, "cat").is_empty());
        assert!(Box2D::new(10.0, 20.0, 50.0, 20.0, "cat").is_empty());
        assert!(!Box2D::new(10.0, 10.0, 50.0, 50.0, "cat").is_empty());
    }

    #[test]
    fn test_orientation_from_degrees() {
        let o = Orientation::from_degrees(0.0, 0.0, 90.0);
        assert!((o.yaw - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(o.roll, 0.0);
        assert_eq!(o.pitch, 0.0);
    }

    #[test]
    fn test_record_label_and_mode() {
        let rect = DetectionRecord::Rect(Box2D::new(0.0, 0.0, 1.0, 1.0, "cat"));
        assert_eq!(rect.label(), "cat");
        assert_eq!(rect.mode(), Mode::Detect2d);

        let cuboid = DetectionRecord::Cuboid(Box3D::new(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(1.0, 1.0, 1.0),
            Orientation::default(),
            "chair",
        ));
        assert_eq!(cuboid.label(), "chair");
        assert_eq!(cuboid.mode(), Mode::Detect3d);
    }
}

pub mod camera;
pub mod detection;
pub mod error;
pub mod projection;

pub use camera::{CameraIntrinsics, ResolvedIntrinsics, resolve_intrinsics};
pub use detection::{Box2D, Box3D, DetectionRecord, Mode, Orientation};
pub use error::{ConfigError, ProjectionError, Result, SdvError};
pub use projection::{BOX_EDGES, ProjectedBox, project_box};

//! Pinhole camera intrinsics and their resolution

mod intrinsics;
mod resolve;

pub use intrinsics::CameraIntrinsics;
pub(crate) use intrinsics::DEPTH_EPSILON;
pub use resolve::{ResolvedIntrinsics, resolve_intrinsics};

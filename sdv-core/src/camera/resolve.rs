use super::CameraIntrinsics;
use crate::error::ConfigError;

/// Intrinsics together with their provenance.
///
/// Callers that care whether real calibration data was available (e.g. to
/// warn the user that box geometry is approximate) check `used_fallback()`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedIntrinsics {
    /// Taken from a calibration record, rescaled if needed.
    Loaded(CameraIntrinsics),
    /// Synthesized from image dimensions and a field-of-view angle.
    Synthesized(CameraIntrinsics),
}

impl ResolvedIntrinsics {
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        match self {
            ResolvedIntrinsics::Loaded(cam) => cam,
            ResolvedIntrinsics::Synthesized(cam) => cam,
        }
    }

    /// True when no calibration record was available and the FOV
    /// synthesis fallback was used.
    pub fn used_fallback(&self) -> bool {
        matches!(self, ResolvedIntrinsics::Synthesized(_))
    }
}

/// Resolve camera intrinsics for an image.
///
/// When a usable calibration record is supplied it wins, rescaled linearly
/// if its reference dimensions differ from the requested ones. A record with
/// non-positive focal lengths or zero reference dimensions is treated the
/// same as a missing one. Otherwise intrinsics
/// are synthesized from the horizontal field of view assuming square pixels:
/// `fx = fy = (max(w, h) / 2) / tan(fov / 2)`, principal point at the image
/// center.
pub fn resolve_intrinsics(
    width: u32,
    height: u32,
    fov_degrees: f64,
    calibration: Option<CameraIntrinsics>,
) -> Result<ResolvedIntrinsics, ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidDimensions(width, height));
    }

    if let Some(cam) = calibration {
        // An unusable record (non-positive focals, zero reference
        // dimensions) degrades to synthesis like a missing one.
        if cam.fx > 0.0 && cam.fy > 0.0 && cam.width > 0 && cam.height > 0 {
            return Ok(ResolvedIntrinsics::Loaded(cam.scaled_to(width, height)));
        }
    }

    if fov_degrees <= 0.0 || fov_degrees >= 180.0 {
        return Err(ConfigError::InvalidFov(fov_degrees));
    }

    let half_extent = width.max(height) as f64 / 2.0;
    let focal = half_extent / (fov_degrees.to_radians() / 2.0).tan();

    Ok(ResolvedIntrinsics::Synthesized(CameraIntrinsics::new(
        focal,
        focal,
        width as f64 / 2.0,
        height as f64 / 2.0,
        width,
        height,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_vga_60_degrees() {
        let resolved = resolve_intrinsics(640, 480, 60.0, None).unwrap();
        assert!(resolved.used_fallback());

        let cam = resolved.intrinsics();
        // 320 / tan(30 deg)
        assert!((cam.fx - 554.2562584220407).abs() < 1e-9);
        assert_eq!(cam.fx, cam.fy);
        assert_eq!(cam.principal_point(), (320.0, 240.0));
    }

    #[test]
    fn test_synthesis_positive_focal_across_fov_range() {
        for fov in [1.0, 30.0, 60.0, 90.0, 120.0, 179.0] {
            let resolved = resolve_intrinsics(800, 600, fov, None).unwrap();
            let cam = resolved.intrinsics();
            assert!(cam.fx > 0.0, "fov {fov} produced non-positive focal");
            assert_eq!(cam.principal_point(), (400.0, 300.0));
        }
    }

    #[test]
    fn test_synthesis_uses_larger_dimension() {
        let landscape = resolve_intrinsics(640, 480, 60.0, None).unwrap();
        let portrait = resolve_intrinsics(480, 640, 60.0, None).unwrap();
        assert_eq!(landscape.intrinsics().fx, portrait.intrinsics().fx);
    }

    #[test]
    fn test_invalid_fov_rejected() {
        for fov in [0.0, -5.0, 180.0, 200.0] {
            let err = resolve_intrinsics(640, 480, fov, None).unwrap_err();
            assert_eq!(err, ConfigError::InvalidFov(fov));
        }
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let err = resolve_intrinsics(0, 480, 60.0, None).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDimensions(0, 480));
    }

    #[test]
    fn test_calibration_wins_over_fov() {
        let record = CameraIntrinsics::new(1000.0, 1000.0, 960.0, 540.0, 1920, 1080);
        let resolved = resolve_intrinsics(1920, 1080, 60.0, Some(record.clone())).unwrap();

        assert!(!resolved.used_fallback());
        assert_eq!(resolved.intrinsics(), &record);
    }

    #[test]
    fn test_calibration_rescaled_to_requested_dimensions() {
        let record = CameraIntrinsics::new(1000.0, 1000.0, 960.0, 540.0, 1920, 1080);
        let resolved = resolve_intrinsics(960, 540, 60.0, Some(record)).unwrap();

        let cam = resolved.intrinsics();
        assert!((cam.fx - 500.0).abs() < 1e-9);
        assert!((cam.cx - 480.0).abs() < 1e-9);
        assert_eq!(cam.image_size(), (960, 540));
    }

    #[test]
    fn test_unusable_calibration_falls_back_to_synthesis() {
        let zero_focal = CameraIntrinsics::new(0.0, 1000.0, 960.0, 540.0, 1920, 1080);
        let resolved = resolve_intrinsics(1920, 1080, 60.0, Some(zero_focal)).unwrap();
        assert!(resolved.used_fallback());

        let zero_reference = CameraIntrinsics::new(1000.0, 1000.0, 960.0, 540.0, 0, 1080);
        let resolved = resolve_intrinsics(1920, 1080, 60.0, Some(zero_reference)).unwrap();
        assert!(resolved.used_fallback());
        // No division by the zero reference width happened
        assert!(resolved.intrinsics().fx.is_finite());

        let negative_focal = CameraIntrinsics::new(-500.0, 500.0, 960.0, 540.0, 1920, 1080);
        let resolved = resolve_intrinsics(1920, 1080, 60.0, Some(negative_focal)).unwrap();
        assert!(resolved.used_fallback());
    }

    #[test]
    fn test_calibration_ignores_bad_fov() {
        // FOV only matters on the synthesis path.
        let record = CameraIntrinsics::new(1000.0, 1000.0, 960.0, 540.0, 1920, 1080);
        let resolved = resolve_intrinsics(1920, 1080, -1.0, Some(record));
        assert!(resolved.is_ok());
    }
}

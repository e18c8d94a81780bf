use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use sdv_core::{Mode, resolve_intrinsics};
use sdv_io::{InvocationSummary, RawDetections, append_history, lookup_calibration, normalize};
use sdv_render::annotate;

/// Overlay 2D or 3D detection boxes on an image.
#[derive(Parser)]
#[command(name = "sdv", version, about)]
struct Args {
    /// Input image
    #[arg(short, long)]
    image: PathBuf,

    /// Detection payload file (JSON from the model)
    #[arg(long, conflicts_with = "detections_json")]
    detections: Option<PathBuf>,

    /// Inline detection payload (JSON text)
    #[arg(long)]
    detections_json: Option<String>,

    /// Detection mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::TwoD)]
    mode: ModeArg,

    /// Horizontal field of view in degrees, used when no calibration applies
    #[arg(long, default_value_t = 60.0)]
    fov: f64,

    /// Calibration file (JSON object keyed by image file name)
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Calibration lookup key; defaults to the image file name
    #[arg(long)]
    calibration_key: Option<String>,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,

    /// History log; one JSON line appended per invocation
    #[arg(long)]
    history: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    #[value(name = "2d")]
    TwoD,
    #[value(name = "3d")]
    ThreeD,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TwoD => Mode::Detect2d,
            ModeArg::ThreeD => Mode::Detect3d,
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e:?}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let image = image::open(&args.image)
        .with_context(|| format!("reading image {}", args.image.display()))?
        .to_rgb8();
    let (width, height) = image.dimensions();

    let mode = Mode::from(args.mode);

    let key = args.calibration_key.clone().unwrap_or_else(|| {
        args.image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let calibration = args
        .calibration
        .as_ref()
        .and_then(|path| lookup_calibration(path, &key, width, height));

    let resolved = resolve_intrinsics(width, height, args.fov, calibration)?;
    if resolved.used_fallback() {
        warn!(
            fov = args.fov,
            "no calibration for this image, box geometry is approximate"
        );
    }

    let raw = match (&args.detections, &args.detections_json) {
        (Some(path), _) => RawDetections::Json(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading detections {}", path.display()))?,
        ),
        (None, Some(text)) => RawDetections::Json(text.clone()),
        (None, None) => bail!("one of --detections or --detections-json is required"),
    };

    let parsed = normalize(&raw, mode)?;
    if parsed.skipped > 0 {
        warn!(skipped = parsed.skipped, "dropped malformed detection records");
    }

    let (annotated, report) = annotate(&image, &parsed.records, resolved.intrinsics());
    info!(
        drawn = report.drawn,
        behind_camera = report.behind_camera,
        skipped_empty = report.skipped_empty,
        "annotated image"
    );

    annotated
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    if let Some(history) = &args.history {
        let summary = InvocationSummary::new(
            key,
            mode,
            args.fov,
            resolved.used_fallback(),
            parsed.skipped,
            &parsed.records,
        );
        append_history(history, &summary)?;
    }

    Ok(())
}

use std::path::PathBuf;
use std::process;

use clap::Parser;

use passfoto_core::pipeline::enhance_capture_use_case::EnhanceCaptureUseCase;
use passfoto_core::pipeline::verify_frame_use_case::VerifyFrameUseCase;
use passfoto_core::shared::config::AnalyzerConfig;
use passfoto_core::shared::face_observation::FaceObservation;
use passfoto_core::shared::rect::Rect;

/// Passport photo conformance checks and enhancement.
#[derive(Parser)]
#[command(name = "passfoto")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Where to write the final passport photo (omit to only verify).
    output: Option<PathBuf>,

    /// Detected face bounding box as left,top,right,bottom pixels.
    /// Without it the frame is judged as having no face.
    #[arg(long, value_delimiter = ',', num_args = 4)]
    face_box: Option<Vec<i32>>,

    /// Head yaw of the detected face, degrees.
    #[arg(long, default_value = "0.0")]
    yaw: f64,

    /// Head pitch, degrees.
    #[arg(long, default_value = "0.0")]
    pitch: f64,

    /// Head roll, degrees.
    #[arg(long, default_value = "0.0")]
    roll: f64,

    /// Left-eye-open probability from the face detector (0.0-1.0).
    #[arg(long, default_value = "1.0")]
    left_eye_open: f64,

    /// Right-eye-open probability from the face detector (0.0-1.0).
    #[arg(long, default_value = "1.0")]
    right_eye_open: f64,

    /// Smiling probability from the face detector (0.0-1.0).
    #[arg(long, default_value = "0.0")]
    smiling: f64,

    /// Directory with bundled ONNX models (checked before downloading).
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Run pix2pix shadow removal on the output photo.
    #[arg(long)]
    remove_shadow: bool,

    /// Rebuild the output background from a blurred, brightened copy.
    #[arg(long)]
    enhance_background: bool,

    /// Background luma below this fraction is reported TOO_DARK.
    #[arg(long, default_value = "0.5")]
    brightness_cutoff: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = AnalyzerConfig {
        brightness_cutoff: cli.brightness_cutoff,
        ..AnalyzerConfig::default()
    };
    let faces = build_faces(&cli)?;
    let frame = passfoto_core::imaging::io::load_frame(&cli.input)?;

    let mut verifier = VerifyFrameUseCase::with_default_models(config, cli.models_dir.as_deref());
    let verdict = verifier.verify(&frame, &faces)?;
    verifier.close();

    if verdict.defects().is_empty() {
        println!("verdict: VALID");
    } else {
        println!("verdict: {:?}", verdict.severity());
        for defect in verdict.defects() {
            println!("  {defect:?}");
        }
    }

    if let Some(output) = cli.output {
        if !verdict.is_valid() {
            log::warn!("photo has defects; writing output anyway");
        }
        let [face] = faces.as_slice() else {
            return Err("an output photo needs exactly one --face-box".into());
        };
        let mut enhancer = EnhanceCaptureUseCase::with_default_models(
            config,
            cli.models_dir.as_deref(),
            cli.remove_shadow,
            cli.enhance_background,
        );
        let photo = enhancer
            .produce(&frame, face)?
            .ok_or("passport crop does not fit inside the input image")?;
        enhancer.close();
        passfoto_core::imaging::io::save_frame(&output, &photo)?;
        log::info!("Output written to {}", output.display());
    }

    Ok(())
}

fn build_faces(cli: &Cli) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>> {
    let Some(coords) = cli.face_box.as_ref() else {
        return Ok(Vec::new());
    };
    let [left, top, right, bottom] = coords.as_slice() else {
        return Err("--face-box needs exactly four values: left,top,right,bottom".into());
    };
    if right <= left || bottom <= top {
        return Err("--face-box is empty or inverted".into());
    }
    let mut face = FaceObservation::frontal(Rect::new(*left, *top, *right, *bottom));
    face.yaw = cli.yaw;
    face.pitch = cli.pitch;
    face.roll = cli.roll;
    face.left_eye_open_probability = cli.left_eye_open;
    face.right_eye_open_probability = cli.right_eye_open;
    face.smiling_probability = cli.smiling;
    Ok(vec![face])
}

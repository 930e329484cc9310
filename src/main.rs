//! Replay a scripted detection session through the occlusion overlay.

use anyhow::{Context, Result};
use clap::Parser;
use face_occlusion_overlay::{
    config::{Config, EXAMPLE_CONFIG},
    detection::{DetectionOutcome, DetectionSlot, DetectorKind},
    orchestrator::{FrameInput, FrameOrchestrator},
    scenario::Scenario,
    snapshot::CaptureOutcome,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file to replay (YAML format)
    #[arg(short, long, required_unless_present = "print_config")]
    scenario: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Directory to write captured face snapshots to as PNG
    #[arg(long)]
    dump_snapshots: Option<PathBuf>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Run one synchronous provider round trip through its slot
///
/// `Pending` leaves the request in flight, so the next completed outcome
/// answers it.
fn drive_provider<Resp>(
    slot: &mut DetectionSlot<u64, Resp>,
    frame: u64,
    outcome: DetectionOutcome<Resp>,
) -> DetectionOutcome<Resp> {
    slot.submit(frame);
    slot.start();
    if !matches!(outcome, DetectionOutcome::Pending) {
        slot.complete(outcome);
    }
    slot.poll()
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let scenario_path = args.scenario.context("--scenario is required")?;
    let scenario = Scenario::from_file(&scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?;
    info!(
        "Replaying {} frames from {}",
        scenario.frame_count(),
        scenario_path.display()
    );

    if let Some(dir) = &args.dump_snapshots {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut orchestrator = FrameOrchestrator::new(&config)?;
    let mut face_slot = DetectionSlot::new(DetectorKind::Face, config.detection.backpressure);
    let mut pose_slot = DetectionSlot::new(DetectorKind::Pose, config.detection.backpressure);
    let surface = scenario.synthetic_surface();

    for (index, frame) in (0u64..).zip(scenario.frames()) {
        if frame.switch_camera {
            orchestrator.switch_camera();
        }

        let input = FrameInput {
            source_size: scenario.source.pair(),
            display_size: scenario.display.pair(),
            timestamp_ms: scenario.timestamp_ms(index),
            face: drive_provider(&mut face_slot, index, frame.face_outcome()),
            pose: drive_provider(&mut pose_slot, index, frame.pose_outcome()),
        };
        let output = orchestrator.process_frame(input, &surface);

        let view = output.saved_face.map_or_else(
            || "-".to_string(),
            |p| format!("{}x{}@{},{}", p.width, p.height, p.left, p.top),
        );
        println!(
            "{index:>4} occluded={:<5} capture={:<9} view={:<20} {}",
            output.occluded,
            output.capture.map_or_else(|| "-".to_string(), |c| format!("{c:?}")),
            view,
            output.status.replace('\n', " | "),
        );

        let captured = output.capture == Some(CaptureOutcome::Captured);
        if let Some(dir) = args.dump_snapshots.as_ref().filter(|_| captured) {
            if let Some(snapshot) = orchestrator.cache().snapshot() {
                let path = dir.join(format!("snapshot_{index:04}.png"));
                snapshot
                    .save(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

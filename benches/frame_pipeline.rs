//! Benchmarks for the per-frame pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use face_occlusion_overlay::{
    config::Config,
    coordinate_mapping::CoordinateMapper,
    detection::{BodyLandmark, BodyLandmarkKind, BodyPose, DetectionOutcome, FaceObservation},
    geometry::{DisplayPoint, EulerAngles, FaceBox, FrameGeometry, Landmark2D, SourceRect},
    occlusion::{HandPoint, OcclusionTracker},
    orchestrator::{FrameInput, FrameOrchestrator},
    snapshot::FaceSnapshotCache,
};
use image::RgbaImage;

fn jittered_face(t: f32) -> FaceObservation {
    let dx = 20.0 * t.sin() + rand::random::<f32>();
    FaceObservation {
        bounding_box: SourceRect::new(150.0 + dx, 200.0, 330.0 + dx, 420.0),
        angles: EulerAngles::new(5.0 * t.cos(), 15.0 * t.sin(), rand::random::<f32>()),
        nose_base: Some(Landmark2D::new(240.0 + dx, 320.0)),
    }
}

fn hand_sweep(t: f32) -> BodyPose {
    BodyPose {
        landmarks: vec![BodyLandmark {
            kind: BodyLandmarkKind::RightIndex,
            position: Landmark2D::new(240.0 + 300.0 * t.sin(), 320.0),
        }],
    }
}

fn benchmark_mapping(c: &mut Criterion) {
    let mapper = CoordinateMapper::new(FrameGeometry::new(480, 640, 1080, 1920, true)).unwrap();
    let rect = SourceRect::new(150.0, 200.0, 330.0, 420.0);

    c.bench_function("map_rect", |b| b.iter(|| black_box(mapper.map_rect(black_box(&rect)))));
}

fn benchmark_occlusion(c: &mut Criterion) {
    let face = FaceBox::new(300.0, 400.0, 700.0, 900.0);
    let hands: Vec<HandPoint> = (0..100)
        .map(|i| {
            let t = i as f32 * 0.1;
            HandPoint::with_default_radius(DisplayPoint::new(500.0 + 600.0 * t.sin(), 650.0))
        })
        .collect();

    c.bench_function("occlusion_tracker_100_frames", |b| {
        b.iter(|| {
            let mut tracker = OcclusionTracker::default();
            for hand in &hands {
                black_box(tracker.observe(Some(&face), std::slice::from_ref(hand)));
            }
        });
    });
}

fn benchmark_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");

    for side in [256u32, 512, 1024] {
        let surface = RgbaImage::new(side, side);
        let face = FaceBox::new(0.0, 0.0, side as f32 / 2.0, side as f32 / 2.0);
        group.bench_with_input(BenchmarkId::from_parameter(side), &surface, |b, surface| {
            let mut cache = FaceSnapshotCache::new();
            b.iter(|| black_box(cache.capture(surface, Some(&face))));
        });
    }

    group.finish();
}

fn benchmark_process_frame(c: &mut Criterion) {
    let surface = RgbaImage::new(1080, 1920);
    let inputs: Vec<FrameInput> = (0..100u64)
        .map(|i| {
            let t = i as f32 * 0.1;
            FrameInput {
                source_size: (480, 640),
                display_size: (1080, 1920),
                timestamp_ms: i * 33,
                face: DetectionOutcome::Detected(jittered_face(t)),
                pose: DetectionOutcome::Detected(hand_sweep(t)),
            }
        })
        .collect();

    c.bench_function("process_frame_sequence_100", |b| {
        b.iter(|| {
            let mut orchestrator = FrameOrchestrator::new(&Config::default()).unwrap();
            for input in &inputs {
                black_box(orchestrator.process_frame(input.clone(), &surface));
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_mapping,
    benchmark_occlusion,
    benchmark_capture,
    benchmark_process_frame
);
criterion_main!(benches);

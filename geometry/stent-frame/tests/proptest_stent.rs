//! Property-based tests for the stent frame pipeline.
//!
//! These tests use proptest to generate random centerlines and verify
//! invariants of fitting, framing and sweeping.
//!
//! Run with: cargo test -p stent-frame -- proptest

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use proptest::prelude::*;
use stent_frame::{
    BezierFitter, Point3, StentError, StentFrameGenerator, StentParams, Vector3,
    transport_frames, transport_rotation,
};

// =============================================================================
// Strategies for generating random centerlines
// =============================================================================

/// A random step in a bounded direction cone, so consecutive points are
/// well spaced and the path never folds straight back on itself.
fn arb_step() -> impl Strategy<Value = [f64; 3]> {
    (0.2..1.5f64, -0.8..0.8f64, -0.8..0.8f64)
        .prop_map(|(forward, side, up)| [forward, side, up])
}

/// A random walk of `min..=max` points with forward-biased steps.
fn arb_centerline(min: usize, max: usize) -> impl Strategy<Value = Vec<Point3<f64>>> {
    (
        prop::array::uniform3(-10.0..10.0f64),
        prop::collection::vec(arb_step(), (min - 1)..max),
    )
        .prop_map(|(start, steps)| {
            let mut p = Point3::new(start[0], start[1], start[2]);
            let mut points = vec![p];
            for [dx, dy, dz] in steps {
                p += Vector3::new(dx, dy, dz);
                points.push(p);
            }
            points
        })
}

fn arb_params() -> impl Strategy<Value = StentParams> {
    (1..24usize, 1..8usize, 0.01..2.0f64, 0.0..0.5f64, any::<bool>(), 1..16usize).prop_map(
        |(samples, periods, xz, y, spline_fit, parts)| {
            StentParams::new()
                .with_sample_count(samples)
                .with_period_count(periods)
                .with_xz_scale(xz)
                .with_y_scale(y)
                .with_spline_fit(spline_fit)
                .with_part_count(parts)
        },
    )
}

// =============================================================================
// Curve fitting
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_resample_length_and_end(
        anchors in arb_centerline(3, 12),
        step in 0.01..0.99f64,
    ) {
        let fitter = BezierFitter::new(step).unwrap();
        let curve = fitter.resample(&anchors);

        let per_segment = fitter.samples_per_segment();
        prop_assert_eq!(per_segment, (1.0 / step).ceil() as usize);

        prop_assert_eq!(curve.len(), (anchors.len() - 1) * per_segment + 1);
        prop_assert_eq!(curve.last(), anchors.last());
        prop_assert_eq!(curve.first(), anchors.first());
    }
}

// =============================================================================
// Framing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn proptest_frames_orthonormal(points in arb_centerline(2, 40)) {
        let frames = transport_frames(&points).unwrap();
        prop_assert_eq!(frames.len(), points.len() - 1);

        for (frame, point) in frames.iter().zip(&points) {
            prop_assert!(frame.is_orthonormal(1e-4), "frame {:?}", frame);
            prop_assert_eq!(frame.origin, *point);
        }
    }

    #[test]
    fn proptest_frame_continuity(points in arb_centerline(3, 40)) {
        let frames = transport_frames(&points).unwrap();

        for pair in frames.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let rotation = transport_rotation(&prev.tangent, &next.tangent).unwrap();

            let (tangent, normal) = match rotation {
                Some(r) => (r * prev.tangent, r * prev.normal),
                None => (prev.tangent, prev.normal),
            };
            prop_assert!((tangent - next.tangent).norm() < 1e-4);
            prop_assert!((normal - next.normal).norm() < 1e-4);
        }
    }

    #[test]
    fn proptest_duplicate_point_is_reported(
        points in arb_centerline(2, 20),
        pick in any::<prop::sample::Index>(),
    ) {
        let i = pick.index(points.len());
        let mut points = points;
        points.insert(i, points[i]);

        prop_assert_eq!(
            transport_frames(&points),
            Err(StentError::DegenerateSegment { index: i })
        );
    }
}

// =============================================================================
// Full pipeline
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_rings_sized_and_closed(
        params in arb_params(),
        points in arb_centerline(3, 15),
    ) {
        let generator = StentFrameGenerator::new(params.clone()).unwrap();
        let stent = generator.generate(&points).unwrap();

        if params.spline_fit {
            prop_assert!(stent.ring_count() <= params.part_count);
            prop_assert!(stent.ring_count() >= 1);
        } else {
            prop_assert_eq!(stent.ring_count(), points.len() - 1);
        }

        for ring in &stent {
            prop_assert_eq!(ring.len(), params.points_per_ring());
            prop_assert!(ring.is_closed());
            prop_assert!(ring.is_finite());
        }
    }
}

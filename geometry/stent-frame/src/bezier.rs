//! Bezier smoothing of the centerline.
//!
//! The fitter places one cubic Bezier segment between every pair of
//! consecutive anchors. Handles come from a Catmull-Rom style estimate
//! built from the midpoints of the neighbouring chords, clamped at the two
//! ends so the first and last segments leave their anchors with zero
//! curvature. The spline is then flattened into a dense polyline.

use crate::error::{StentError, StentResult};
use nalgebra::{Point3, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cubic Bezier curve defined by 4 control points.
///
/// # Equation
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
///
/// # Example
///
/// ```
/// use stent_frame::CubicBezier;
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(3.0, 2.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
/// );
///
/// let end = curve.point_at(1.0);
/// assert!((end.x - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// First control point (affects start tangent).
    pub p1: Point3<f64>,
    /// Second control point (affects end tangent).
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Create a new cubic Bezier curve.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Get the control points as an array.
    #[must_use]
    pub fn control_points(&self) -> [Point3<f64>; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Evaluate the Bernstein blend at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        let s2 = s * s;
        let t2 = t * t;

        Point3::from(
            self.p0.coords * (s2 * s)
                + self.p1.coords * (3.0 * s2 * t)
                + self.p2.coords * (3.0 * s * t2)
                + self.p3.coords * (t2 * t),
        )
    }

    /// Sample the curve at `count` evenly spaced parameters covering `[0, 1)`.
    ///
    /// The end point `p3` is never included; it is the start of the next
    /// segment in a spline.
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<Point3<f64>> {
        (0..count)
            .map(|k| self.point_at(k as f64 / count as f64))
            .collect()
    }
}

/// Compute the incoming and outgoing Bezier handles for each anchor.
///
/// For anchor `i` the offset is half the vector between the midpoints of
/// its previous and next chords. Missing neighbours at the ends are clamped
/// to the anchor itself. The handles are `anchor - offset` and
/// `anchor + offset`.
///
/// # Example
///
/// ```
/// use stent_frame::tangent_handles;
/// use nalgebra::Point3;
///
/// let anchors = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
/// ];
/// let handles = tangent_handles(&anchors);
///
/// // Interior anchor on a straight line: handles sit one unit either side.
/// assert!((handles[1].0.x - 1.0).abs() < 1e-12);
/// assert!((handles[1].1.x - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn tangent_handles(anchors: &[Point3<f64>]) -> Vec<(Point3<f64>, Point3<f64>)> {
    let n = anchors.len();

    (0..n)
        .map(|i| {
            let p = anchors[i];
            let prev = if i == 0 { p } else { anchors[i - 1] };
            let next = if i + 1 == n { p } else { anchors[i + 1] };

            let mid_prev = (prev.coords + p.coords) * 0.5;
            let mid_next = (p.coords + next.coords) * 0.5;
            let offset: Vector3<f64> = (mid_next - mid_prev) * 0.5;

            (p - offset, p + offset)
        })
        .collect()
}

/// Fits and flattens a piecewise cubic Bezier through a centerline.
///
/// The fitter only stores the flattening step. All intermediate buffers
/// live inside each call, so one fitter can be shared between threads.
///
/// # Example
///
/// ```
/// use stent_frame::BezierFitter;
/// use nalgebra::Point3;
///
/// let fitter = BezierFitter::new(0.1).unwrap();
/// let anchors = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ];
///
/// let curve = fitter.resample(&anchors);
/// assert_eq!(curve.len(), 2 * 10 + 1);
/// assert_eq!(curve.last(), anchors.last());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierFitter {
    step: f64,
}

impl BezierFitter {
    /// Create a fitter with the given parametric step.
    ///
    /// # Errors
    ///
    /// Returns [`StentError::InvalidParams`] if `step` is not in `(0, 1)`.
    pub fn new(step: f64) -> StentResult<Self> {
        if !(step > 0.0 && step < 1.0) {
            return Err(StentError::invalid_param(
                "spline_step",
                format!("must be in (0, 1), got {step}"),
            ));
        }
        Ok(Self { step })
    }

    /// The parametric step.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples emitted per segment: `ceil(1 / step)`.
    #[must_use]
    pub fn samples_per_segment(&self) -> usize {
        ((1.0 / self.step).ceil() as usize).max(1)
    }

    /// Build the Bezier segments joining consecutive anchors.
    ///
    /// Returns an empty list for two or fewer anchors.
    #[must_use]
    pub fn fit_segments(&self, anchors: &[Point3<f64>]) -> Vec<CubicBezier> {
        if anchors.len() <= 2 {
            return Vec::new();
        }

        let handles = tangent_handles(anchors);

        anchors
            .windows(2)
            .zip(handles.windows(2))
            .map(|(pts, hs)| CubicBezier::new(pts[0], hs[0].1, hs[1].0, pts[1]))
            .collect()
    }

    /// Flatten the fitted spline into a dense polyline.
    ///
    /// Every segment contributes [`Self::samples_per_segment`] points over
    /// `[0, 1)`, and exactly one copy of the last anchor closes the curve.
    /// Two or fewer anchors give an empty result.
    #[must_use]
    pub fn resample(&self, anchors: &[Point3<f64>]) -> Vec<Point3<f64>> {
        let segments = self.fit_segments(anchors);
        let Some(&last) = anchors.last() else {
            return Vec::new();
        };
        if segments.is_empty() {
            return Vec::new();
        }

        let per_segment = self.samples_per_segment();
        let mut points = Vec::with_capacity(segments.len() * per_segment + 1);
        for segment in &segments {
            points.extend(segment.sample(per_segment));
        }
        points.push(last);

        debug!(
            anchors = anchors.len(),
            per_segment,
            resampled = points.len(),
            "Flattened Bezier centerline"
        );

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_cubic_endpoints() {
        let curve = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        );

        assert_relative_eq!(curve.point_at(0.0), curve.p0, epsilon = 1e-12);
        assert_relative_eq!(curve.point_at(1.0), curve.p3, epsilon = 1e-12);
        // Out-of-range parameters clamp.
        assert_relative_eq!(curve.point_at(-1.0), curve.p0, epsilon = 1e-12);
        assert_relative_eq!(curve.point_at(2.0), curve.p3, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_midpoint() {
        let curve = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        );

        // B(0.5) = (P0 + 3P1 + 3P2 + P3) / 8
        let mid = curve.point_at(0.5);
        assert_relative_eq!(mid.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_sample_excludes_end() {
        let curve = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        );

        let samples = curve.sample(4);
        assert_eq!(samples.len(), 4);
        assert_relative_eq!(samples[0], curve.p0, epsilon = 1e-12);
        assert_relative_eq!(samples[2].x, 1.5, epsilon = 1e-12);
        assert!(samples.iter().all(|p| p.x < 3.0));
    }

    #[test]
    fn test_handles_clamped_at_ends() {
        let anchors = l_shape();
        let handles = tangent_handles(&anchors);
        assert_eq!(handles.len(), anchors.len());

        // First anchor: prev clamped to itself, offset = (mid_next - p0) / 2.
        let (incoming, outgoing) = handles[0];
        assert_relative_eq!(outgoing, Point3::new(0.25, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(incoming, Point3::new(-0.25, 0.0, 0.0), epsilon = 1e-12);

        // Last anchor: next clamped to itself.
        let (incoming, outgoing) = handles[3];
        assert_relative_eq!(incoming, Point3::new(1.0, 1.0, 0.75), epsilon = 1e-12);
        assert_relative_eq!(outgoing, Point3::new(1.0, 1.0, 1.25), epsilon = 1e-12);
    }

    #[test]
    fn test_handles_symmetric_about_anchor() {
        let anchors = l_shape();
        for (anchor, (incoming, outgoing)) in anchors.iter().zip(tangent_handles(&anchors)) {
            let mid = Point3::from((incoming.coords + outgoing.coords) * 0.5);
            assert_relative_eq!(mid, *anchor, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fitter_rejects_bad_step() {
        assert!(BezierFitter::new(0.0).is_err());
        assert!(BezierFitter::new(1.0).is_err());
        assert!(BezierFitter::new(-0.1).is_err());
        assert!(BezierFitter::new(f64::NAN).is_err());
        assert!(BezierFitter::new(0.5).is_ok());
    }

    #[test]
    fn test_samples_per_segment() {
        let count = |step| BezierFitter::new(step).map(|f| f.samples_per_segment());
        assert_eq!(count(0.1), Ok(10));
        assert_eq!(count(0.25), Ok(4));
        assert_eq!(count(0.3), Ok(4));
        assert_eq!(count(0.5), Ok(2));
        assert_eq!(count(0.7), Ok(2));
        assert_eq!(count(0.01), Ok(100));
    }

    #[test]
    fn test_samples_per_segment_is_plain_ceil() {
        // 1 / step lands a hair above 10.
        let step = 1.0 / (10.0 + 5e-10);
        let fitter = BezierFitter::new(step).expect("valid step");
        assert!(1.0 / step > 10.0);
        assert_eq!(fitter.samples_per_segment(), 11);

        let curve = fitter.resample(&l_shape());
        assert_eq!(curve.len(), 3 * 11 + 1);
    }

    #[test]
    fn test_segments_join_anchors() {
        let anchors = l_shape();
        let fitter = BezierFitter::new(0.1).expect("valid step");
        let segments = fitter.fit_segments(&anchors);

        assert_eq!(segments.len(), 3);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.p0, anchors[i]);
            assert_eq!(seg.p3, anchors[i + 1]);
        }
        // C1 at the joints: handles on each side are mirrored.
        for pair in segments.windows(2) {
            let into = pair[0].p3 - pair[0].p2;
            let out = pair[1].p1 - pair[1].p0;
            assert_relative_eq!(into, out, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_resample_length_and_end() {
        let anchors = l_shape();
        let fitter = BezierFitter::new(0.1).expect("valid step");
        let curve = fitter.resample(&anchors);

        assert_eq!(curve.len(), 3 * 10 + 1);
        assert_eq!(curve.first(), anchors.first());
        assert_eq!(curve.last(), anchors.last());
        assert_eq!(curve.iter().filter(|p| **p == anchors[3]).count(), 1);
    }

    #[test]
    fn test_resample_passes_through_anchors() {
        let anchors = l_shape();
        let fitter = BezierFitter::new(0.25).expect("valid step");
        let curve = fitter.resample(&anchors);

        for (i, anchor) in anchors.iter().enumerate() {
            assert_eq!(curve[i * 4], *anchor);
        }
    }

    #[test]
    fn test_resample_short_input_is_empty() {
        let fitter = BezierFitter::new(0.1).expect("valid step");
        assert!(fitter.resample(&[]).is_empty());
        assert!(fitter.resample(&[Point3::origin()]).is_empty());
        assert!(
            fitter
                .resample(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)])
                .is_empty()
        );
    }
}

//! Stent frame generation.
//!
//! Ties the pipeline together: optional Bezier smoothing and subsampling of
//! the centerline, rotation-minimizing framing, then one ring per frame.

use nalgebra::Point3;
use tracing::{debug, info, warn};

use crate::bezier::BezierFitter;
use crate::error::{StentError, StentResult};
use crate::frame::{Frame, segment_tangent, transport_frames};
use crate::params::StentParams;
use crate::ring::RingSweeper;
use crate::types::StentFrame;

/// Generates stent frames from centerlines.
///
/// Construction validates the parameters and precomputes the ring tables.
/// Generation only borrows the generator, so one instance can serve many
/// threads.
///
/// # Examples
///
/// ```
/// use stent_frame::{StentFrameGenerator, StentParams};
/// use nalgebra::Point3;
///
/// let generator = StentFrameGenerator::new(StentParams::default()).unwrap();
/// let centerline = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(1.0, 1.0, 1.0),
/// ];
///
/// let stent = generator.generate(&centerline).unwrap();
/// assert_eq!(stent.ring_count(), 10);
/// assert!(stent.iter().all(|ring| ring.len() == 385));
/// ```
#[derive(Debug, Clone)]
pub struct StentFrameGenerator {
    params: StentParams,
    fitter: BezierFitter,
    sweeper: RingSweeper,
}

impl StentFrameGenerator {
    /// Create a generator, building its lookup tables once.
    ///
    /// # Errors
    ///
    /// Returns [`StentError::InvalidParams`] if the parameters are invalid.
    pub fn new(params: StentParams) -> StentResult<Self> {
        params.validate()?;

        let fitter = BezierFitter::new(params.spline_step)?;
        let sweeper = RingSweeper::new(&params);

        debug!(
            sample_count = params.sample_count,
            period_count = params.period_count,
            points_per_ring = sweeper.points_per_ring(),
            "Built ring tables"
        );

        Ok(Self {
            params,
            fitter,
            sweeper,
        })
    }

    /// The parameters this generator was built with.
    #[must_use]
    pub fn params(&self) -> &StentParams {
        &self.params
    }

    /// The ring sweeper holding the precomputed tables.
    #[must_use]
    pub fn sweeper(&self) -> &RingSweeper {
        &self.sweeper
    }

    /// Compute the anchor points that frames are built on.
    ///
    /// With spline fitting the centerline is flattened into a Bezier
    /// polyline and subsampled with [`subsample_anchors`]; otherwise the
    /// centerline is used as is. An empty centerline gives no anchors.
    ///
    /// # Errors
    ///
    /// - [`StentError::InsufficientPoints`] if spline fitting is enabled and
    ///   fewer than 3 points are given
    /// - [`StentError::DegenerateSegment`] if two consecutive centerline
    ///   points coincide
    pub fn anchors(&self, centerline: &[Point3<f64>]) -> StentResult<Vec<Point3<f64>>> {
        if centerline.is_empty() {
            return Ok(Vec::new());
        }

        check_segments(centerline)?;

        if !self.params.spline_fit {
            return Ok(centerline.to_vec());
        }

        if centerline.len() < 3 {
            return Err(StentError::insufficient_points(3, centerline.len()));
        }

        let resampled = self.fitter.resample(centerline);
        let anchors = subsample_anchors(&resampled, self.params.part_count);

        debug!(
            resampled = resampled.len(),
            anchors = anchors.len(),
            part_count = self.params.part_count,
            "Subsampled Bezier centerline"
        );
        if anchors.len() < self.params.part_count + 1 {
            warn!(
                "Resampled centerline has {} points; producing {} rings instead of {}",
                resampled.len(),
                anchors.len().saturating_sub(1),
                self.params.part_count
            );
        }

        Ok(anchors)
    }

    /// Compute the rotation-minimizing frames for a centerline.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    pub fn frames(&self, centerline: &[Point3<f64>]) -> StentResult<Vec<Frame>> {
        if centerline.is_empty() {
            return Ok(Vec::new());
        }

        let anchors = self.anchors(centerline)?;
        let frames = transport_frames(&anchors)?;
        debug!(frames = frames.len(), "Transported frames");

        Ok(frames)
    }

    /// Generate the stent frame for a centerline.
    ///
    /// An empty centerline gives an empty stent frame. Any error aborts the
    /// whole generation; no partial ring set is returned.
    ///
    /// # Errors
    ///
    /// - [`StentError::InsufficientPoints`] for a single point, or fewer than
    ///   3 points with spline fitting enabled
    /// - [`StentError::DegenerateSegment`] if two consecutive points coincide
    /// - [`StentError::DegenerateGeometry`] if the centerline doubles back on
    ///   itself so a frame cannot be transported
    pub fn generate(&self, centerline: &[Point3<f64>]) -> StentResult<StentFrame> {
        let frames = self.frames(centerline)?;
        let rings = frames.iter().map(|frame| self.sweeper.sweep(frame)).collect();
        let stent = StentFrame::new(rings);

        info!(
            rings = stent.ring_count(),
            points_per_ring = self.sweeper.points_per_ring(),
            "Generated stent frame"
        );

        Ok(stent)
    }
}

/// Generate a stent frame with a one-off generator.
///
/// # Errors
///
/// Returns [`StentError::InvalidParams`] for invalid parameters, otherwise
/// the errors of [`StentFrameGenerator::generate`].
///
/// # Examples
///
/// ```
/// use stent_frame::{create_stent_frame, StentParams};
/// use nalgebra::Point3;
///
/// let params = StentParams::default().with_spline_fit(false);
/// let centerline = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ];
///
/// let stent = create_stent_frame(&params, &centerline).unwrap();
/// assert_eq!(stent.ring_count(), 2);
/// ```
pub fn create_stent_frame(
    params: &StentParams,
    centerline: &[Point3<f64>],
) -> StentResult<StentFrame> {
    StentFrameGenerator::new(params.clone())?.generate(centerline)
}

/// Reduce a dense polyline to at most `part_count + 1` anchors.
///
/// With `L` points and `L > part_count`, the stride is
/// `floor(L / part_count)` and the anchors are the points at
/// `0, stride, .., (part_count - 1) * stride` followed by the last point,
/// giving exactly `part_count + 1` distinct anchors. With `L <= part_count`
/// every point is kept. A `part_count` of zero keeps every point.
///
/// # Example
///
/// ```
/// use stent_frame::subsample_anchors;
/// use nalgebra::Point3;
///
/// let points: Vec<_> = (0..31).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
/// let anchors = subsample_anchors(&points, 10);
///
/// assert_eq!(anchors.len(), 11);
/// assert_eq!(anchors[1].x, 3.0);
/// assert_eq!(anchors[10].x, 30.0);
/// ```
#[must_use]
pub fn subsample_anchors(points: &[Point3<f64>], part_count: usize) -> Vec<Point3<f64>> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };
    if part_count == 0 || points.len() <= part_count {
        return points.to_vec();
    }

    let stride = points.len() / part_count;
    let mut anchors: Vec<_> = points
        .iter()
        .step_by(stride)
        .take(part_count)
        .copied()
        .collect();
    anchors.push(last);
    anchors
}

/// Reject centerlines with coincident consecutive points.
fn check_segments(points: &[Point3<f64>]) -> StentResult<()> {
    (0..points.len().saturating_sub(1)).try_for_each(|i| segment_tangent(points, i).map(|_| ()))
}

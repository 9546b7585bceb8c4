//! Rotation-minimizing frames along the centerline.
//!
//! Each frame is carried to the next segment by exactly the rotation that
//! maps the previous tangent onto the new one. Unlike a Frenet frame this
//! stays defined on straight runs and does not flip at inflection points.

use crate::error::{StentError, StentResult};
use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angle (radians) below which consecutive tangents count as parallel.
pub const PARALLEL_ANGLE_EPSILON: f64 = 1e-5;

/// Segment length, relative to the coordinate magnitude of its endpoints,
/// at or below which the endpoints count as coincident.
const SEGMENT_RELATIVE_EPSILON: f64 = 1e-12;

/// Norm below which a vector cannot be normalized.
const NORMALIZE_EPSILON: f64 = 1e-12;

/// A coordinate frame anchored at a centerline point.
///
/// The three axes are mutually orthonormal:
/// - `tangent`: along the segment leaving `origin`
/// - `normal`: perpendicular to the tangent
/// - `binormal`: perpendicular to both
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Anchor point of the frame.
    pub origin: Point3<f64>,
    /// Unit tangent (forward direction).
    pub tangent: Vector3<f64>,
    /// Unit normal.
    pub normal: Vector3<f64>,
    /// Unit binormal.
    pub binormal: Vector3<f64>,
}

impl Frame {
    /// Create a new frame with the given components.
    ///
    /// The vectors are assumed to be orthonormal.
    #[must_use]
    pub const fn new(
        origin: Point3<f64>,
        tangent: Vector3<f64>,
        normal: Vector3<f64>,
        binormal: Vector3<f64>,
    ) -> Self {
        Self {
            origin,
            tangent,
            normal,
            binormal,
        }
    }

    /// Create the first frame of a sequence from its tangent.
    ///
    /// The reference direction is the world axis most perpendicular to the
    /// tangent, so the construction is well defined for every direction.
    /// `normal = reference × tangent` and `binormal = normal × tangent`.
    ///
    /// # Errors
    ///
    /// Returns [`StentError::DegenerateGeometry`] if the tangent has zero
    /// length or the normal cannot be normalized.
    ///
    /// # Example
    ///
    /// ```
    /// use stent_frame::Frame;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let frame = Frame::bootstrap(Point3::origin(), Vector3::x()).unwrap();
    /// assert!(frame.is_orthonormal(1e-12));
    /// ```
    pub fn bootstrap(origin: Point3<f64>, tangent: Vector3<f64>) -> StentResult<Self> {
        let tangent = normalize(tangent, "initial tangent")?;
        let reference = most_orthogonal_axis(&tangent);

        let normal = normalize(reference.cross(&tangent), "initial normal")?;
        let binormal = normalize(normal.cross(&tangent), "initial binormal")?;

        Ok(Self {
            origin,
            tangent,
            normal,
            binormal,
        })
    }

    /// Carry this frame to a new origin and tangent.
    ///
    /// The normal and binormal are rotated by the rotation that maps the
    /// current tangent onto `tangent`. When the two tangents are parallel
    /// within [`PARALLEL_ANGLE_EPSILON`] they are kept unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StentError::DegenerateGeometry`] if `tangent` has zero
    /// length or points back along the current tangent (no unique axis).
    pub fn transport(&self, origin: Point3<f64>, tangent: Vector3<f64>) -> StentResult<Self> {
        let tangent = normalize(tangent, "transported tangent")?;

        let (normal, binormal) = match transport_rotation(&self.tangent, &tangent)? {
            Some(rotation) => (rotation * self.normal, rotation * self.binormal),
            None => (self.normal, self.binormal),
        };

        Ok(Self {
            origin,
            tangent,
            normal,
            binormal,
        })
    }

    /// Transform a local point to world coordinates.
    ///
    /// The local coordinate system has:
    /// - X axis along the normal
    /// - Y axis along the tangent
    /// - Z axis along the binormal
    #[must_use]
    pub fn local_to_world(&self, local: Point3<f64>) -> Point3<f64> {
        self.origin + self.normal * local.x + self.tangent * local.y + self.binormal * local.z
    }

    /// Transform a world point to local coordinates.
    #[must_use]
    pub fn world_to_local(&self, world: Point3<f64>) -> Point3<f64> {
        let v = world - self.origin;
        Point3::new(
            v.dot(&self.normal),
            v.dot(&self.tangent),
            v.dot(&self.binormal),
        )
    }

    /// Local axes as matrix columns `(normal, tangent, binormal)`.
    #[must_use]
    pub fn axes(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.normal, self.tangent, self.binormal])
    }

    /// Check if the frame is orthonormal within tolerance.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let t_len = (self.tangent.norm() - 1.0).abs();
        let n_len = (self.normal.norm() - 1.0).abs();
        let b_len = (self.binormal.norm() - 1.0).abs();
        let tn_dot = self.tangent.dot(&self.normal).abs();
        let tb_dot = self.tangent.dot(&self.binormal).abs();
        let nb_dot = self.normal.dot(&self.binormal).abs();

        t_len < tolerance
            && n_len < tolerance
            && b_len < tolerance
            && tn_dot < tolerance
            && tb_dot < tolerance
            && nb_dot < tolerance
    }
}

/// The world axis with the smallest absolute dot product against `v`.
///
/// Ties resolve in X, Y, Z order.
fn most_orthogonal_axis(v: &Vector3<f64>) -> Vector3<f64> {
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    if abs_x <= abs_y && abs_x <= abs_z {
        Vector3::x()
    } else if abs_y <= abs_z {
        Vector3::y()
    } else {
        Vector3::z()
    }
}

fn normalize(v: Vector3<f64>, what: &str) -> StentResult<Vector3<f64>> {
    v.try_normalize(NORMALIZE_EPSILON)
        .ok_or_else(|| StentError::degenerate(format!("{what} has near-zero length")))
}

/// Rotation carrying tangent `from` onto tangent `to`.
///
/// The angle is `acos` of the normalized dot product, clamped to
/// `[-1, 1]`. Returns `Ok(None)` when the angle is below
/// [`PARALLEL_ANGLE_EPSILON`].
///
/// # Errors
///
/// Returns [`StentError::DegenerateGeometry`] if either vector has zero
/// length, or if the tangents are anti-parallel so the rotation axis is
/// undefined.
///
/// # Example
///
/// ```
/// use stent_frame::transport_rotation;
/// use nalgebra::Vector3;
///
/// let rotation = transport_rotation(&Vector3::x(), &Vector3::y()).unwrap().unwrap();
/// let mapped = rotation * Vector3::x();
/// assert!((mapped - Vector3::y()).norm() < 1e-12);
/// ```
pub fn transport_rotation(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
) -> StentResult<Option<Rotation3<f64>>> {
    let denom = from.norm() * to.norm();
    if denom < NORMALIZE_EPSILON {
        return Err(StentError::degenerate("tangent has near-zero length"));
    }

    let angle = (from.dot(to) / denom).clamp(-1.0, 1.0).acos();
    if angle < PARALLEL_ANGLE_EPSILON {
        return Ok(None);
    }

    let axis = Unit::try_new(from.cross(to), NORMALIZE_EPSILON).ok_or_else(|| {
        StentError::degenerate(format!(
            "rotation axis undefined for tangents {angle:.6} rad apart"
        ))
    })?;

    Ok(Some(Rotation3::from_axis_angle(&axis, angle)))
}

/// Unit tangent of the segment `points[index] -> points[index + 1]`.
///
/// The coincidence test is relative: the segment is rejected when its
/// length is at most `1e-12` times the largest absolute coordinate of its
/// two endpoints. Centerlines at any scale are accepted, while two
/// distinct points that differ only in rounding noise are not.
///
/// # Errors
///
/// Returns [`StentError::DegenerateSegment`] if the two points coincide, and
/// [`StentError::InsufficientPoints`] if `index + 1` is out of range.
pub fn segment_tangent(points: &[Point3<f64>], index: usize) -> StentResult<Vector3<f64>> {
    let (Some(a), Some(b)) = (points.get(index), points.get(index + 1)) else {
        return Err(StentError::insufficient_points(index + 2, points.len()));
    };

    let delta = b - a;
    let scale = a.coords.amax().max(b.coords.amax());
    if delta.norm() <= SEGMENT_RELATIVE_EPSILON * scale {
        return Err(StentError::DegenerateSegment { index });
    }

    Ok(delta.normalize())
}

/// Compute rotation-minimizing frames along a point sequence.
///
/// Frame `i` sits at `points[i]` with its tangent along the segment to
/// `points[i + 1]`, so `n` points give `n - 1` frames. Each frame is derived
/// from the previous one.
///
/// # Errors
///
/// - [`StentError::InsufficientPoints`] for fewer than 2 points
/// - [`StentError::DegenerateSegment`] if two consecutive points coincide
/// - [`StentError::DegenerateGeometry`] if the centerline doubles back on
///   itself
///
/// # Example
///
/// ```
/// use stent_frame::transport_frames;
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ];
///
/// let frames = transport_frames(&points).unwrap();
/// assert_eq!(frames.len(), 2);
/// assert!(frames.iter().all(|f| f.is_orthonormal(1e-10)));
/// ```
pub fn transport_frames(points: &[Point3<f64>]) -> StentResult<Vec<Frame>> {
    if points.len() < 2 {
        return Err(StentError::insufficient_points(2, points.len()));
    }

    let first = Frame::bootstrap(points[0], segment_tangent(points, 0)?)?;
    let mut frames = Vec::with_capacity(points.len() - 1);
    frames.push(first);

    (1..points.len() - 1).try_fold(first, |prev, i| {
        let frame = prev.transport(points[i], segment_tangent(points, i)?)?;
        frames.push(frame);
        Ok::<_, StentError>(frame)
    })?;

    Ok(frames)
}

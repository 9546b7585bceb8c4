//! Cross-section ring sweeping.
//!
//! A ring is a closed wave wrapped around the tube. Its circumferential
//! position comes from a fine table spanning one full turn, while the axial
//! displacement along the tangent repeats a coarse sine table once per
//! period.

use std::f64::consts::TAU;

use nalgebra::Point3;

use crate::frame::Frame;
use crate::params::StentParams;
use crate::types::Ring;

/// Sine and cosine sampled uniformly over one 2π turn.
///
/// # Example
///
/// ```
/// use stent_frame::SineTable;
///
/// let table = SineTable::uniform(4);
/// assert_eq!(table.len(), 4);
/// assert!((table.sin(1) - 1.0).abs() < 1e-12);
/// assert!((table.cos(2) + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SineTable {
    sin: Vec<f64>,
    cos: Vec<f64>,
}

impl SineTable {
    /// Sample `count` angles `i * 2π / count` for `i` in `0..count`.
    #[must_use]
    pub fn uniform(count: usize) -> Self {
        let step = if count == 0 { 0.0 } else { TAU / count as f64 };
        let (sin, cos) = (0..count).map(|i| (i as f64 * step).sin_cos()).unzip();
        Self { sin, cos }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sin.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sin.is_empty()
    }

    /// Sine of sample `i`, wrapping around the turn.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty.
    #[must_use]
    pub fn sin(&self, i: usize) -> f64 {
        self.sin[i % self.sin.len()]
    }

    /// Cosine of sample `i`, wrapping around the turn.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty.
    #[must_use]
    pub fn cos(&self, i: usize) -> f64 {
        self.cos[i % self.cos.len()]
    }
}

/// Emits one closed ring per frame from precomputed tables.
///
/// The tables are built once in [`RingSweeper::new`] and only read
/// afterwards, so a sweeper can be shared across threads.
#[derive(Debug, Clone)]
pub struct RingSweeper {
    /// One wave period along the tangent, `sample_count` entries.
    wave: SineTable,
    /// Placement around the tube, `sample_count * period_count` entries.
    around: SineTable,
    xz_scale: f64,
    y_scale: f64,
}

impl RingSweeper {
    /// Build the lookup tables for the given parameters.
    ///
    /// The parameters are expected to be validated; zero counts produce a
    /// sweeper whose rings are empty.
    #[must_use]
    pub fn new(params: &StentParams) -> Self {
        Self {
            wave: SineTable::uniform(params.sample_count),
            around: SineTable::uniform(params.sample_count * params.period_count),
            xz_scale: params.xz_scale,
            y_scale: params.y_scale,
        }
    }

    /// Number of points in every emitted ring, closing point included.
    #[must_use]
    pub fn points_per_ring(&self) -> usize {
        if self.around.is_empty() {
            0
        } else {
            self.around.len() + 1
        }
    }

    /// The ring pattern in frame-local coordinates, without the closing
    /// point.
    ///
    /// `x = xz_scale·cos(φₖ)`, `y = y_scale·sin(θₖ mod sample_count)`,
    /// `z = xz_scale·sin(φₖ)`.
    #[must_use]
    pub fn local_profile(&self) -> Vec<Point3<f64>> {
        if self.wave.is_empty() {
            return Vec::new();
        }

        (0..self.around.len())
            .map(|k| {
                Point3::new(
                    self.xz_scale * self.around.cos(k),
                    self.y_scale * self.wave.sin(k),
                    self.xz_scale * self.around.sin(k),
                )
            })
            .collect()
    }

    /// Place the ring pattern in world space at `frame` and close it.
    ///
    /// # Example
    ///
    /// ```
    /// use stent_frame::{Frame, RingSweeper, StentParams};
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let params = StentParams::new().with_sample_count(8).with_period_count(2);
    /// let sweeper = RingSweeper::new(&params);
    /// let frame = Frame::bootstrap(Point3::origin(), Vector3::z()).unwrap();
    ///
    /// let ring = sweeper.sweep(&frame);
    /// assert_eq!(ring.len(), 17);
    /// assert!(ring.is_closed());
    /// ```
    #[must_use]
    pub fn sweep(&self, frame: &Frame) -> Ring {
        let mut points: Vec<Point3<f64>> = self
            .local_profile()
            .into_iter()
            .map(|local| frame.local_to_world(local))
            .collect();

        if let Some(&first) = points.first() {
            points.push(first);
        }

        Ring::new(points)
    }
}

//! Stent frame generation parameters.

use crate::error::{StentError, StentResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for stent frame generation.
///
/// Use the builder methods to configure the generator. The defaults
/// describe a fine wire stent: 32 samples per turn, 12 wave periods per
/// ring, a 0.1 tube radius and a 0.02 axial wave amplitude, with Bezier
/// smoothing down to 10 rings.
///
/// # Examples
///
/// ```
/// use stent_frame::StentParams;
///
/// let params = StentParams::new()
///     .with_sample_count(16)
///     .with_xz_scale(0.5)
///     .with_spline_fit(false);
///
/// assert_eq!(params.points_per_ring(), 16 * 12 + 1);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StentParams {
    /// Cross-section samples per full 2π turn of the axial wave.
    pub sample_count: usize,

    /// Number of wave periods repeated around one ring.
    pub period_count: usize,

    /// Tube radius (scale of the cross-section plane).
    pub xz_scale: f64,

    /// Amplitude of the wave along the tangent.
    pub y_scale: f64,

    /// Whether the centerline is smoothed with a Bezier spline first.
    pub spline_fit: bool,

    /// Number of rings produced when `spline_fit` is enabled.
    pub part_count: usize,

    /// Parametric step used to flatten each Bezier segment.
    ///
    /// Each segment contributes `ceil(1 / spline_step)` samples.
    pub spline_step: f64,
}

impl Default for StentParams {
    fn default() -> Self {
        Self {
            sample_count: 32,
            period_count: 12,
            xz_scale: 0.1,
            y_scale: 0.02,
            spline_fit: true,
            part_count: 10,
            spline_step: 0.1,
        }
    }
}

impl StentParams {
    /// Creates a new `StentParams` with default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use stent_frame::StentParams;
    ///
    /// let params = StentParams::new();
    /// assert_eq!(params.part_count, 10);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of samples per turn.
    #[must_use]
    pub const fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the number of wave periods per ring.
    #[must_use]
    pub const fn with_period_count(mut self, period_count: usize) -> Self {
        self.period_count = period_count;
        self
    }

    /// Sets the tube radius.
    #[must_use]
    pub const fn with_xz_scale(mut self, xz_scale: f64) -> Self {
        self.xz_scale = xz_scale;
        self
    }

    /// Sets the axial wave amplitude.
    #[must_use]
    pub const fn with_y_scale(mut self, y_scale: f64) -> Self {
        self.y_scale = y_scale;
        self
    }

    /// Enables or disables Bezier smoothing of the centerline.
    ///
    /// # Examples
    ///
    /// ```
    /// use stent_frame::StentParams;
    ///
    /// let params = StentParams::new().with_spline_fit(false);
    /// assert!(!params.spline_fit);
    /// ```
    #[must_use]
    pub const fn with_spline_fit(mut self, spline_fit: bool) -> Self {
        self.spline_fit = spline_fit;
        self
    }

    /// Sets the number of rings produced in spline-fit mode.
    #[must_use]
    pub const fn with_part_count(mut self, part_count: usize) -> Self {
        self.part_count = part_count;
        self
    }

    /// Sets the Bezier flattening step.
    #[must_use]
    pub const fn with_spline_step(mut self, spline_step: f64) -> Self {
        self.spline_step = spline_step;
        self
    }

    /// Number of distinct points placed around one ring.
    #[must_use]
    pub const fn samples_per_ring(&self) -> usize {
        self.sample_count * self.period_count
    }

    /// Number of points in one emitted ring, including the closing point.
    #[must_use]
    pub const fn points_per_ring(&self) -> usize {
        self.samples_per_ring() + 1
    }

    /// Validates the parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or an error describing
    /// the first invalid parameter found.
    ///
    /// # Errors
    ///
    /// Returns [`StentError::InvalidParams`] if any parameter is invalid.
    pub fn validate(&self) -> StentResult<()> {
        if self.sample_count == 0 {
            return Err(StentError::invalid_param(
                "sample_count",
                "must be positive",
            ));
        }

        if self.period_count == 0 {
            return Err(StentError::invalid_param(
                "period_count",
                "must be positive",
            ));
        }

        if self.sample_count.checked_mul(self.period_count).is_none() {
            return Err(StentError::invalid_param(
                "period_count",
                format!(
                    "{} samples x {} periods overflows",
                    self.sample_count, self.period_count
                ),
            ));
        }

        if !self.xz_scale.is_finite() {
            return Err(StentError::invalid_param(
                "xz_scale",
                format!("must be finite, got {}", self.xz_scale),
            ));
        }

        if !self.y_scale.is_finite() {
            return Err(StentError::invalid_param(
                "y_scale",
                format!("must be finite, got {}", self.y_scale),
            ));
        }

        if self.part_count == 0 {
            return Err(StentError::invalid_param("part_count", "must be positive"));
        }

        if !(self.spline_step > 0.0 && self.spline_step < 1.0) {
            return Err(StentError::invalid_param(
                "spline_step",
                format!("must be in (0, 1), got {}", self.spline_step),
            ));
        }

        Ok(())
    }
}

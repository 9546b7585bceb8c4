//! Output types: rings and the assembled stent frame.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One closed cross-section polyline.
///
/// The last point repeats the first.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ring {
    points: Vec<Point3<f64>>,
}

impl Ring {
    /// Wrap an already closed point sequence.
    #[must_use]
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// The ring points, closing point included.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of points, closing point included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the ring has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the last point equals the first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Whether every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.coords.iter().all(|c| c.is_finite()))
    }

    /// Mean of the distinct points, skipping the closing duplicate.
    #[must_use]
    pub fn centroid(&self) -> Option<Point3<f64>> {
        let distinct = if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points[..]
        };
        if distinct.is_empty() {
            return None;
        }

        let sum = distinct
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
        Some(Point3::from(sum / distinct.len() as f64))
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// Take ownership of the points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for Ring {
    type Item = Point3<f64>;
    type IntoIter = std::vec::IntoIter<Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// Rings swept along a centerline, in centerline order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StentFrame {
    rings: Vec<Ring>,
}

impl StentFrame {
    /// Assemble a stent frame from its rings.
    #[must_use]
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// The rings in centerline order.
    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Number of rings.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Total number of points over all rings.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }

    /// Whether there are no rings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Whether every ring has only finite coordinates.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rings.iter().all(Ring::is_finite)
    }

    /// Axis-aligned bounds `(min, max)` over all ring points.
    ///
    /// Returns `None` when there are no points.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut points = self.rings.iter().flat_map(Ring::iter);
        let first = *points.next()?;

        Some(points.fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }

    /// Iterate over the rings.
    pub fn iter(&self) -> std::slice::Iter<'_, Ring> {
        self.rings.iter()
    }

    /// Take ownership of the rings.
    #[must_use]
    pub fn into_rings(self) -> Vec<Ring> {
        self.rings
    }
}

impl<'a> IntoIterator for &'a StentFrame {
    type Item = &'a Ring;
    type IntoIter = std::slice::Iter<'a, Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.iter()
    }
}

impl IntoIterator for StentFrame {
    type Item = Ring;
    type IntoIter = std::vec::IntoIter<Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.into_iter()
    }
}

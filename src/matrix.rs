//! 2D affine matrices.
//!
//! [`AffineMatrix`] is the building block of the value/pixel pipeline. It is a
//! small `Copy` value: preparing a transform builds a new matrix instead of
//! mutating one in place, and composition returns a fresh matrix.
//!
//! A matrix maps a point as
//!
//! ```text
//! | scale_x  skew_x   translate_x |   | x |
//! | skew_y   scale_y  translate_y | * | y |
//!                                     | 1 |
//! ```
//!
//! # Composition Order
//!
//! [`AffineMatrix::then`] applies `self` first and `other` second, so chains
//! read left to right in the order the steps happen:
//!
//! ```
//! use tablechart::{AffineMatrix, Point};
//!
//! // Move the data minimum to the origin, then scale by 2.
//! let m = AffineMatrix::translate(-10.0, -20.0).then_scale(2.0, 2.0);
//! assert_eq!(m.map_point(Point::new(10.0, 20.0)), Point::new(0.0, 0.0));
//! assert_eq!(m.map_point(Point::new(11.0, 21.0)), Point::new(2.0, 2.0));
//! ```

use num_traits::Float;
use tracing::debug;

use crate::error::{MatrixStage, Result, TransformError};
use crate::geom::{Path, Point, Rect};

/// A 2D affine transform with six degrees of freedom.
///
/// # Examples
///
/// ```
/// use tablechart::{AffineMatrix, Point};
///
/// let m = AffineMatrix::translate(100.0, 50.0).then_scale(2.0, -1.0);
/// let inverse = m.inverse().unwrap();
///
/// let p: Point<f64> = Point::new(25.0, 30.0);
/// let back = inverse.map_point(m.map_point(p));
/// assert!((back.x - p.x).abs() < 1e-9);
/// assert!((back.y - p.y).abs() < 1e-9);
///
/// // A collapsed axis cannot be inverted.
/// assert!(AffineMatrix::scale(0.0, 1.0).inverse().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineMatrix<S = f32> {
    pub scale_x: S,
    pub skew_x: S,
    pub translate_x: S,
    pub skew_y: S,
    pub scale_y: S,
    pub translate_y: S,
}

impl<S: Float> Default for AffineMatrix<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S: Float> AffineMatrix<S> {
    /// Creates a matrix from its components in row order.
    pub fn from_values(
        scale_x: S,
        skew_x: S,
        translate_x: S,
        skew_y: S,
        scale_y: S,
        translate_y: S,
    ) -> Self {
        Self {
            scale_x,
            skew_x,
            translate_x,
            skew_y,
            scale_y,
            translate_y,
        }
    }

    pub fn identity() -> Self {
        Self::scale(S::one(), S::one())
    }

    pub fn translate(tx: S, ty: S) -> Self {
        Self {
            translate_x: tx,
            translate_y: ty,
            ..Self::identity()
        }
    }

    /// Creates a scaling transform around the origin.
    pub fn scale(sx: S, sy: S) -> Self {
        Self {
            scale_x: sx,
            skew_x: S::zero(),
            translate_x: S::zero(),
            skew_y: S::zero(),
            scale_y: sy,
            translate_y: S::zero(),
        }
    }

    /// Creates a scaling transform that keeps `(px, py)` fixed.
    pub fn scale_about(sx: S, sy: S, px: S, py: S) -> Self {
        Self::translate(-px, -py)
            .then_scale(sx, sy)
            .then_translate(px, py)
    }

    /// Returns the matrix that applies `self` and then `other`.
    pub fn then(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Self {
            scale_x: b.scale_x * a.scale_x + b.skew_x * a.skew_y,
            skew_x: b.scale_x * a.skew_x + b.skew_x * a.scale_y,
            translate_x: b.scale_x * a.translate_x + b.skew_x * a.translate_y + b.translate_x,
            skew_y: b.skew_y * a.scale_x + b.scale_y * a.skew_y,
            scale_y: b.skew_y * a.skew_x + b.scale_y * a.scale_y,
            translate_y: b.skew_y * a.translate_x + b.scale_y * a.translate_y + b.translate_y,
        }
    }

    /// Appends a translation.
    pub fn then_translate(&self, tx: S, ty: S) -> Self {
        self.then(&Self::translate(tx, ty))
    }

    /// Appends a scale around the origin.
    pub fn then_scale(&self, sx: S, sy: S) -> Self {
        self.then(&Self::scale(sx, sy))
    }

    pub fn determinant(&self) -> S {
        self.scale_x * self.scale_y - self.skew_x * self.skew_y
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Returns true if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Components in row order, matching [`AffineMatrix::from_values`].
    pub fn to_array(&self) -> [S; 6] {
        [
            self.scale_x,
            self.skew_x,
            self.translate_x,
            self.skew_y,
            self.scale_y,
            self.translate_y,
        ]
    }

    /// Returns the inverse, or `None` when the determinant is zero or the
    /// result would not be finite.
    ///
    /// Scale/translate matrices are inverted one axis at a time, so very large
    /// or very small scales stay invertible even when their product would
    /// overflow or underflow.
    pub fn inverse(&self) -> Option<Self> {
        if self.skew_x == S::zero() && self.skew_y == S::zero() {
            return self.inverse_axis_aligned();
        }

        let det = self.determinant();
        if det == S::zero() || !det.is_finite() {
            return None;
        }

        let inv_det = S::one() / det;
        let scale_x = self.scale_y * inv_det;
        let skew_x = -self.skew_x * inv_det;
        let skew_y = -self.skew_y * inv_det;
        let scale_y = self.scale_x * inv_det;

        let inverse = Self {
            scale_x,
            skew_x,
            translate_x: -(scale_x * self.translate_x + skew_x * self.translate_y),
            skew_y,
            scale_y,
            translate_y: -(skew_y * self.translate_x + scale_y * self.translate_y),
        };

        inverse.is_finite().then_some(inverse)
    }

    fn inverse_axis_aligned(&self) -> Option<Self> {
        let invertible = |s: S| s != S::zero() && s.is_finite();
        if !invertible(self.scale_x) || !invertible(self.scale_y) {
            return None;
        }

        let scale_x = S::one() / self.scale_x;
        let scale_y = S::one() / self.scale_y;
        let inverse = Self {
            translate_x: -self.translate_x * scale_x,
            translate_y: -self.translate_y * scale_y,
            ..Self::scale(scale_x, scale_y)
        };

        inverse.is_finite().then_some(inverse)
    }

    /// Like [`AffineMatrix::inverse`], reporting failure as an error tagged
    /// with `stage`.
    pub fn try_invert(&self, stage: MatrixStage) -> Result<Self> {
        self.inverse().ok_or_else(|| {
            let determinant = self.determinant().to_f64().unwrap_or(f64::NAN);
            debug!(%stage, determinant, "matrix is not invertible");
            TransformError::NonInvertible { stage, determinant }
        })
    }

    #[inline]
    pub fn map_xy(&self, x: S, y: S) -> (S, S) {
        (
            self.scale_x * x + self.skew_x * y + self.translate_x,
            self.skew_y * x + self.scale_y * y + self.translate_y,
        )
    }

    #[inline]
    pub fn map_point(&self, p: Point<S>) -> Point<S> {
        let (x, y) = self.map_xy(p.x, p.y);
        Point::new(x, y)
    }

    /// Maps a flat `[x0, y0, x1, y1, ...]` buffer in place.
    ///
    /// A trailing odd element is left untouched.
    pub fn map_points(&self, pts: &mut [S]) {
        for pair in pts.chunks_exact_mut(2) {
            let (x, y) = self.map_xy(pair[0], pair[1]);
            pair[0] = x;
            pair[1] = y;
        }
    }

    /// Maps typed points in place.
    pub fn map_point_slice(&self, points: &mut [Point<S>]) {
        for p in points {
            *p = self.map_point(*p);
        }
    }

    /// Maps the four corners of `rect` and returns their sorted bounding box.
    ///
    /// For scale/translate matrices this is the mapped rect itself; a flipped
    /// axis swaps the edges back into order.
    pub fn map_rect(&self, rect: &Rect<S>) -> Rect<S> {
        let corners = [
            self.map_xy(rect.left, rect.top),
            self.map_xy(rect.right, rect.top),
            self.map_xy(rect.right, rect.bottom),
            self.map_xy(rect.left, rect.bottom),
        ];

        let (x0, y0) = corners[0];
        let mut out = Rect::new(x0, y0, x0, y0);
        for &(x, y) in &corners[1..] {
            out.left = out.left.min(x);
            out.right = out.right.max(x);
            out.top = out.top.min(y);
            out.bottom = out.bottom.max(y);
        }
        out
    }

    /// Maps every control and end point of `path` in place.
    pub fn map_path(&self, path: &mut Path<S>) {
        for p in path.points_mut() {
            *p = self.map_point(*p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identity_is_default() {
        let m = AffineMatrix::<f32>::default();
        assert!(m.is_identity());
        assert_eq!(m.map_xy(3.0, -4.0), (3.0, -4.0));
    }

    #[test]
    fn then_applies_left_to_right() {
        let translate_then_scale = AffineMatrix::translate(10.0f64, 0.0).then_scale(2.0, 2.0);
        let scale_then_translate = AffineMatrix::scale(2.0f64, 2.0).then_translate(10.0, 0.0);

        assert_eq!(translate_then_scale.map_xy(5.0, 0.0), (30.0, 0.0));
        assert_eq!(scale_then_translate.map_xy(5.0, 0.0), (20.0, 0.0));
    }

    #[test]
    fn then_matches_sequential_mapping_with_skew() {
        let a = AffineMatrix::from_values(1.5f64, 0.25, 3.0, -0.5, 2.0, -7.0);
        let b = AffineMatrix::from_values(0.75f64, -1.0, 2.0, 0.3, 1.25, 4.0);

        let (x1, y1) = a.map_xy(2.0, -3.0);
        let (x2, y2) = b.map_xy(x1, y1);
        let (cx, cy) = a.then(&b).map_xy(2.0, -3.0);

        assert!(approx_eq(x2, cx));
        assert!(approx_eq(y2, cy));
    }

    #[test]
    fn inverse_round_trips_general_matrix() {
        let m = AffineMatrix::from_values(1.5f64, 0.25, 3.0, -0.5, 2.0, -7.0);
        let inv = m.inverse().unwrap();

        let product = m.then(&inv).to_array();
        let identity = AffineMatrix::<f64>::identity().to_array();
        for (a, b) in product.iter().zip(identity.iter()) {
            assert!(approx_eq(*a, *b), "{product:?} is not identity");
        }
    }

    #[test]
    fn zero_scale_is_not_invertible() {
        let m = AffineMatrix::scale(0.0f32, 2.0);
        assert!(m.inverse().is_none());

        let err = m.try_invert(MatrixStage::PanZoom).unwrap_err();
        assert_eq!(
            err,
            TransformError::NonInvertible {
                stage: MatrixStage::PanZoom,
                determinant: 0.0,
            }
        );
    }

    #[test]
    fn extreme_axis_scales_stay_invertible() {
        // Determinants of 1e40 and 1e-40 are out of f32 range.
        for scale in [1e20f32, 1e-20] {
            let m = AffineMatrix::translate(-3.0f32, 7.0).then_scale(scale, -scale);
            let inv = m.inverse().unwrap();

            assert_eq!(inv.scale_x, 1.0 / scale);
            assert_eq!(inv.scale_y, -1.0 / scale);
            let (x, y) = inv.map_xy(m.translate_x, m.translate_y);
            assert!(x.abs() < 1e-3 && y.abs() < 1e-3, "({x}, {y})");
        }
    }

    #[test]
    fn non_finite_matrix_is_not_invertible() {
        let m = AffineMatrix::scale(f64::INFINITY, 1.0);
        assert!(!m.is_finite());
        assert!(m.inverse().is_none());
    }

    #[test]
    fn map_points_skips_trailing_element() {
        let m = AffineMatrix::translate(1.0f32, 2.0);
        let mut pts = [0.0, 0.0, 10.0, 10.0, 99.0];
        m.map_points(&mut pts);
        assert_eq!(pts, [1.0, 2.0, 11.0, 12.0, 99.0]);
    }

    #[test]
    fn map_rect_sorts_flipped_edges() {
        let m = AffineMatrix::scale(1.0f32, -1.0).then_translate(0.0, 100.0);
        let rect = m.map_rect(&Rect::new(10.0, 20.0, 30.0, 60.0));
        assert_eq!(rect, Rect::new(10.0, 40.0, 30.0, 80.0));
    }

    #[test]
    fn scale_about_keeps_pivot_fixed() {
        let m = AffineMatrix::scale_about(3.0f64, 0.5, 40.0, 60.0);
        assert_eq!(m.map_xy(40.0, 60.0), (40.0, 60.0));
        assert_eq!(m.map_xy(50.0, 80.0), (70.0, 70.0));
    }

    #[test]
    fn map_path_rewrites_every_point() {
        let mut path = Path::<f32>::new();
        path.move_to(0.0, 0.0).quad_to(1.0, 1.0, 2.0, 0.0).close();

        AffineMatrix::translate(5.0, -5.0).map_path(&mut path);

        let pts: Vec<_> = path.points().copied().collect();
        assert_eq!(
            pts,
            vec![
                Point::new(5.0, -5.0),
                Point::new(6.0, -4.0),
                Point::new(7.0, -5.0)
            ]
        );
    }
}

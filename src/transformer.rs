//! Mapping between value space and pixel space.
//!
//! The [`Transformer`] owns two matrices and borrows a third on every call:
//!
//! 1. **value-to-pixel**: moves the data minimum to the origin and scales the
//!    data range onto the content area, flipping Y so larger values go up.
//! 2. **pan/zoom**: the gesture matrix, read from the [`ViewportState`] at
//!    call time.
//! 3. **offset**: moves the content area to its place on the canvas.
//!
//! Forward operations always apply them in that order. Inverse operations
//! undo them in reverse order. Zooming therefore scales only the plot content
//! and never the fixed chrome around it.
//!
//! # Examples
//!
//! ## Value to Pixel
//!
//! ```rust
//! use tablechart::{Transformer, ValueBounds, ViewPortHandler};
//!
//! let mut viewport = ViewPortHandler::<f64>::new();
//! viewport.set_chart_dimens(100.0, 200.0);
//!
//! let mut transformer = Transformer::new();
//! let bounds = ValueBounds::from_min_max(10.0, 90.0, 20.0, 100.0);
//! transformer.prepare_value_to_pixel(&viewport, bounds);
//! transformer.prepare_offset(&viewport, false);
//!
//! // The data minimum lands on the bottom-left corner of the content area...
//! let p = transformer.value_to_pixel(&viewport, 10.0, 20.0);
//! assert_eq!((p.x, p.y), (0.0, 200.0));
//!
//! // ...and the data maximum on the top-right corner.
//! let p = transformer.value_to_pixel(&viewport, 90.0, 100.0);
//! assert_eq!((p.x, p.y), (100.0, 0.0));
//! ```
//!
//! ## Handling a Tap
//!
//! ```rust
//! use tablechart::{Transformer, ValueBounds, ViewPortHandler};
//!
//! let mut viewport = ViewPortHandler::<f64>::new();
//! viewport.set_chart_dimens(100.0, 200.0);
//!
//! let mut transformer = Transformer::new();
//! let bounds = ValueBounds::from_min_max(10.0, 90.0, 20.0, 100.0);
//! transformer.prepare_value_to_pixel(&viewport, bounds);
//! transformer.prepare_offset(&viewport, false);
//!
//! match transformer.pixel_to_value(&viewport, 50.0, 100.0) {
//!     Ok(value) => {
//!         assert!((value.x - 50.0).abs() < 1e-9);
//!         assert!((value.y - 60.0).abs() < 1e-9);
//!     }
//!     Err(_) => unreachable!("prepared matrices are invertible"),
//! }
//! ```

use num_traits::Float;
use tracing::{debug, trace};

use crate::error::{MatrixStage, Result};
use crate::geom::{Path, Point, Rect};
use crate::matrix::AffineMatrix;
use crate::viewport::ViewportState;

/// The data bounds a chart is laid out for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueBounds<S = f32> {
    pub min_x: S,
    /// `max_x - min_x`
    pub range_x: S,
    pub min_y: S,
    /// `max_y - min_y`
    pub range_y: S,
}

impl<S: Float> ValueBounds<S> {
    pub fn new(min_x: S, range_x: S, min_y: S, range_y: S) -> Self {
        Self {
            min_x,
            range_x,
            min_y,
            range_y,
        }
    }

    pub fn from_min_max(min_x: S, max_x: S, min_y: S, max_y: S) -> Self {
        Self::new(min_x, max_x - min_x, min_y, max_y - min_y)
    }
}

/// The rect axis an animation phase is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAxis {
    /// Scales `top` and `bottom`, e.g. vertical bars growing in.
    Vertical,
    /// Scales `left` and `right`, e.g. horizontal bars growing in.
    Horizontal,
}

/// Builds the value-to-pixel matrix for a content area and data bounds.
///
/// A zero range would give an infinite scale; that axis is clamped to a scale
/// of zero instead, collapsing every value onto one pixel line. The resulting
/// matrix is not invertible.
///
/// # Examples
///
/// ```
/// use tablechart::{ValueBounds, value_to_pixel_matrix};
///
/// let m = value_to_pixel_matrix(100.0, 200.0, &ValueBounds::new(10.0, 80.0, 20.0, 80.0));
/// assert_eq!(m.scale_x, 1.25);
/// assert_eq!(m.scale_y, -2.5);
///
/// let flat = value_to_pixel_matrix(100.0, 200.0, &ValueBounds::new(10.0, 0.0, 20.0, 80.0));
/// assert_eq!(flat.scale_x, 0.0);
/// assert!(flat.inverse().is_none());
/// ```
pub fn value_to_pixel_matrix<S: Float>(
    content_width: S,
    content_height: S,
    bounds: &ValueBounds<S>,
) -> AffineMatrix<S> {
    let scale_x = clamp_scale(content_width / bounds.range_x, "x");
    let scale_y = clamp_scale(content_height / bounds.range_y, "y");

    AffineMatrix::translate(-bounds.min_x, -bounds.min_y).then_scale(scale_x, -scale_y)
}

fn clamp_scale<S: Float>(scale: S, axis: &'static str) -> S {
    if scale.is_finite() {
        scale
    } else {
        debug!(axis, "degenerate value range, collapsing axis");
        S::zero()
    }
}

/// Builds the offset matrix for the current content insets of `viewport`.
///
/// `inverted` flips the vertical axis so content grows downward from the top
/// inset, as used for labels drawn against an inverted plot.
pub fn offset_matrix<S: Float>(
    viewport: &impl ViewportState<S>,
    inverted: bool,
) -> AffineMatrix<S> {
    if inverted {
        AffineMatrix::translate(viewport.offset_left(), -viewport.offset_top())
            .then_scale(S::one(), -S::one())
    } else {
        AffineMatrix::translate(
            viewport.offset_left(),
            viewport.chart_height() - viewport.offset_bottom(),
        )
    }
}

/// Converts values into pixels on the screen and back.
///
/// One transformer exists per chart or table view. It is prepared whenever the
/// layout or the data range changes and then used for every frame. The
/// pan/zoom matrix is never stored: every method takes the viewport and reads
/// its matrix again, so a gesture is visible on the very next call.
///
/// # Coordinate Spaces
///
/// Primitives are not tagged with their space. Forward methods (`map_*`,
/// [`value_to_pixel`](Self::value_to_pixel)) expect value coordinates and leave
/// pixel coordinates behind; [`map_pixels_to_value`](Self::map_pixels_to_value)
/// and [`pixel_to_value`](Self::pixel_to_value) go the other way.
///
/// # Buffers
///
/// Bulk methods work in place on caller-owned storage so a renderer can reuse
/// its buffers across frames. The transformer keeps no scratch state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformer<S = f32> {
    value_to_pixel: AffineMatrix<S>,
    offset: AffineMatrix<S>,
}

impl<S: Float> Default for Transformer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Float> Transformer<S> {
    /// Creates a transformer with identity matrices.
    pub fn new() -> Self {
        Self {
            value_to_pixel: AffineMatrix::identity(),
            offset: AffineMatrix::identity(),
        }
    }

    /// Prepares the value-to-pixel matrix from the content size of `viewport`
    /// and the given data bounds.
    ///
    /// See [`value_to_pixel_matrix`] for the degenerate range policy.
    pub fn prepare_value_to_pixel(
        &mut self,
        viewport: &impl ViewportState<S>,
        bounds: ValueBounds<S>,
    ) {
        self.value_to_pixel =
            value_to_pixel_matrix(viewport.content_width(), viewport.content_height(), &bounds);
        trace!(
            scale_x = self.value_to_pixel.scale_x.to_f64(),
            scale_y = self.value_to_pixel.scale_y.to_f64(),
            "prepared value-to-pixel matrix"
        );
    }

    /// Positional form of [`prepare_value_to_pixel`](Self::prepare_value_to_pixel).
    pub fn prepare_value_to_pixel_px(
        &mut self,
        viewport: &impl ViewportState<S>,
        min_x: S,
        range_x: S,
        range_y: S,
        min_y: S,
    ) {
        self.prepare_value_to_pixel(viewport, ValueBounds::new(min_x, range_x, min_y, range_y));
    }

    /// Prepares the offset matrix from the content insets of `viewport`.
    pub fn prepare_offset(&mut self, viewport: &impl ViewportState<S>, inverted: bool) {
        self.offset = offset_matrix(viewport, inverted);
        trace!(inverted, "prepared offset matrix");
    }

    pub fn value_matrix(&self) -> &AffineMatrix<S> {
        &self.value_to_pixel
    }

    pub fn offset_matrix(&self) -> &AffineMatrix<S> {
        &self.offset
    }

    /// Returns value-to-pixel, then pan/zoom, then offset as one matrix.
    ///
    /// Composed on every call since the pan/zoom matrix may have changed.
    pub fn combined_forward_matrix(&self, viewport: &impl ViewportState<S>) -> AffineMatrix<S> {
        self.value_to_pixel
            .then(&viewport.pan_zoom_matrix())
            .then(&self.offset)
    }

    /// Inverse of [`combined_forward_matrix`](Self::combined_forward_matrix).
    pub fn combined_inverse_matrix(
        &self,
        viewport: &impl ViewportState<S>,
    ) -> Result<AffineMatrix<S>> {
        self.combined_forward_matrix(viewport)
            .try_invert(MatrixStage::Combined)
    }

    /// Transforms a flat `[x0, y0, x1, y1, ...]` buffer of values into pixels
    /// in place.
    pub fn map_points(&self, viewport: &impl ViewportState<S>, pts: &mut [S]) {
        self.value_to_pixel.map_points(pts);
        viewport.pan_zoom_matrix().map_points(pts);
        self.offset.map_points(pts);
    }

    /// Transforms typed points from values into pixels in place.
    pub fn map_point_slice(&self, viewport: &impl ViewportState<S>, points: &mut [Point<S>]) {
        self.value_to_pixel.map_point_slice(points);
        viewport.pan_zoom_matrix().map_point_slice(points);
        self.offset.map_point_slice(points);
    }

    /// Transforms a rect from values into pixels in place.
    ///
    /// The result is sorted so that `top <= bottom`.
    pub fn map_rect(&self, viewport: &impl ViewportState<S>, rect: &mut Rect<S>) {
        let pan_zoom = viewport.pan_zoom_matrix();
        *rect = self.value_to_pixel.map_rect(rect);
        *rect = pan_zoom.map_rect(rect);
        *rect = self.offset.map_rect(rect);
    }

    /// Scales one axis of `rect` by the animation `phase` and then transforms
    /// it like [`map_rect`](Self::map_rect).
    ///
    /// `phase` is expected in `[0, 1]`; it is not checked.
    pub fn map_rect_with_phase(
        &self,
        viewport: &impl ViewportState<S>,
        rect: &mut Rect<S>,
        phase: S,
        axis: PhaseAxis,
    ) {
        match axis {
            PhaseAxis::Vertical => {
                rect.top = rect.top * phase;
                rect.bottom = rect.bottom * phase;
            }
            PhaseAxis::Horizontal => {
                rect.left = rect.left * phase;
                rect.right = rect.right * phase;
            }
        }
        self.map_rect(viewport, rect);
    }

    /// Transforms many rects with a single combined matrix.
    pub fn map_rects(&self, viewport: &impl ViewportState<S>, rects: &mut [Rect<S>]) {
        let m = self.combined_forward_matrix(viewport);
        for rect in rects {
            *rect = m.map_rect(rect);
        }
    }

    /// Transforms every vertex of `path` from values into pixels in place.
    pub fn map_path(&self, viewport: &impl ViewportState<S>, path: &mut Path<S>) {
        self.value_to_pixel.map_path(path);
        viewport.pan_zoom_matrix().map_path(path);
        self.offset.map_path(path);
    }

    pub fn map_paths(&self, viewport: &impl ViewportState<S>, paths: &mut [Path<S>]) {
        for path in paths {
            self.map_path(viewport, path);
        }
    }

    /// Transforms a flat buffer of pixel positions into values in place.
    ///
    /// All three inverses are computed before any coordinate is touched, so on
    /// error `pixels` is left as it was.
    pub fn map_pixels_to_value(
        &self,
        viewport: &impl ViewportState<S>,
        pixels: &mut [S],
    ) -> Result<()> {
        let offset = self.offset.try_invert(MatrixStage::Offset)?;
        let pan_zoom = viewport
            .pan_zoom_matrix()
            .try_invert(MatrixStage::PanZoom)?;
        let value = self.value_to_pixel.try_invert(MatrixStage::ValueToPixel)?;

        offset.map_points(pixels);
        pan_zoom.map_points(pixels);
        value.map_points(pixels);
        Ok(())
    }

    /// Returns the value under the pixel position `(x, y)`.
    ///
    /// An error means there is no value under this point.
    pub fn pixel_to_value(&self, viewport: &impl ViewportState<S>, x: S, y: S) -> Result<Point<S>> {
        let mut out = Point::new(x, y);
        self.pixel_to_value_into(viewport, x, y, &mut out)?;
        Ok(out)
    }

    /// Writes the value under `(x, y)` into `out`; `out` is untouched on error.
    pub fn pixel_to_value_into(
        &self,
        viewport: &impl ViewportState<S>,
        x: S,
        y: S,
        out: &mut Point<S>,
    ) -> Result<()> {
        let mut buf = [x, y];
        self.map_pixels_to_value(viewport, &mut buf)?;
        *out = Point::new(buf[0], buf[1]);
        Ok(())
    }

    /// Returns the pixel position of the value `(x, y)`.
    pub fn value_to_pixel(&self, viewport: &impl ViewportState<S>, x: S, y: S) -> Point<S> {
        let mut buf = [x, y];
        self.map_points(viewport, &mut buf);
        Point::new(buf[0], buf[1])
    }
}

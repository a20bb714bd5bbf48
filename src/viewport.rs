//! The viewport collaborator consumed by the transformer.
//!
//! A viewport knows the size of the canvas, the insets that separate the plot
//! content from axis chrome, and the current pan/zoom matrix driven by
//! gestures. The [`Transformer`](crate::Transformer) reads all of these through
//! [`ViewportState`] on every call and never keeps a copy.
//!
//! [`ViewPortHandler`] is a plain implementation for embedders that do not
//! already own one.

use num_traits::Float;
use tracing::trace;

use crate::geom::Rect;
use crate::matrix::AffineMatrix;

/// Read-only view of the layout and gesture state of a chart.
pub trait ViewportState<S: Float = f32> {
    /// Width of the drawable content area in pixels.
    fn content_width(&self) -> S;

    /// Height of the drawable content area in pixels.
    fn content_height(&self) -> S;

    /// Full canvas height in pixels.
    fn chart_height(&self) -> S;

    fn offset_left(&self) -> S;

    fn offset_top(&self) -> S;

    fn offset_bottom(&self) -> S;

    fn offset_right(&self) -> S;

    /// The current pan/zoom matrix.
    fn pan_zoom_matrix(&self) -> AffineMatrix<S>;
}

/// Canvas dimensions, content insets and the pan/zoom matrix of one chart.
///
/// # Examples
///
/// ```
/// use tablechart::{Rect, ViewPortHandler, ViewportState};
///
/// let mut viewport = ViewPortHandler::<f32>::new();
/// viewport.set_chart_dimens(400.0, 300.0);
/// viewport.restrain_view_port(40.0, 10.0, 20.0, 30.0);
///
/// assert_eq!(viewport.content_rect(), Rect::new(40.0, 10.0, 380.0, 270.0));
/// assert_eq!(viewport.content_width(), 340.0);
/// assert_eq!(viewport.offset_bottom(), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPortHandler<S = f32> {
    chart_width: S,
    chart_height: S,
    content_rect: Rect<S>,
    pan_zoom: AffineMatrix<S>,
}

impl<S: Float> Default for ViewPortHandler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Float> ViewPortHandler<S> {
    /// Creates an empty viewport with an identity pan/zoom matrix.
    pub fn new() -> Self {
        Self {
            chart_width: S::zero(),
            chart_height: S::zero(),
            content_rect: Rect::new(S::zero(), S::zero(), S::zero(), S::zero()),
            pan_zoom: AffineMatrix::identity(),
        }
    }

    /// Sets the canvas size, keeping the current insets.
    pub fn set_chart_dimens(&mut self, width: S, height: S) {
        let left = self.offset_left();
        let top = self.offset_top();
        let right = self.offset_right();
        let bottom = self.offset_bottom();

        self.chart_width = width;
        self.chart_height = height;

        self.restrain_view_port(left, top, right, bottom);
    }

    /// Sets the insets between the canvas border and the content area.
    pub fn restrain_view_port(&mut self, left: S, top: S, right: S, bottom: S) {
        self.content_rect = Rect::new(
            left,
            top,
            self.chart_width - right,
            self.chart_height - bottom,
        );
        trace!(
            content_width = self.content_width().to_f64(),
            content_height = self.content_height().to_f64(),
            "viewport restrained"
        );
    }

    pub fn content_rect(&self) -> Rect<S> {
        self.content_rect
    }

    pub fn chart_width(&self) -> S {
        self.chart_width
    }

    /// Replaces the pan/zoom matrix.
    pub fn set_pan_zoom(&mut self, matrix: AffineMatrix<S>) {
        self.pan_zoom = matrix;
    }

    pub fn reset_pan_zoom(&mut self) {
        self.pan_zoom = AffineMatrix::identity();
    }

    /// Appends a zoom about `(pivot_x, pivot_y)` to the pan/zoom matrix.
    ///
    /// The pivot is given in the space the pan/zoom matrix maps from, i.e.
    /// content-relative pixels before the layout offset.
    pub fn zoom(&mut self, scale_x: S, scale_y: S, pivot_x: S, pivot_y: S) {
        let zoom = AffineMatrix::scale_about(scale_x, scale_y, pivot_x, pivot_y);
        self.pan_zoom = self.pan_zoom.then(&zoom);
    }

    /// Appends a translation to the pan/zoom matrix.
    pub fn translate(&mut self, dx: S, dy: S) {
        self.pan_zoom = self.pan_zoom.then_translate(dx, dy);
    }
}

impl<S: Float> ViewportState<S> for ViewPortHandler<S> {
    fn content_width(&self) -> S {
        self.content_rect.width()
    }

    fn content_height(&self) -> S {
        self.content_rect.height()
    }

    fn chart_height(&self) -> S {
        self.chart_height
    }

    fn offset_left(&self) -> S {
        self.content_rect.left
    }

    fn offset_top(&self) -> S {
        self.content_rect.top
    }

    fn offset_bottom(&self) -> S {
        self.chart_height - self.content_rect.bottom
    }

    fn offset_right(&self) -> S {
        self.chart_width - self.content_rect.right
    }

    fn pan_zoom_matrix(&self) -> AffineMatrix<S> {
        self.pan_zoom
    }
}

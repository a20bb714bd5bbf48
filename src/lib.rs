//! Value/pixel coordinate transformer for chart and table rendering.
//!
//! `tablechart` converts data values into pixel positions on a canvas and back.
//! Three affine matrices are composed for every conversion:
//!
//! 1. **value-to-pixel**: derived from the data bounds and the size of the
//!    content area
//! 2. **pan/zoom**: driven by gestures and owned by the viewport
//! 3. **offset**: positions the content area inside the canvas
//!
//! # Core Concepts
//!
//! ## Matrices
//!
//! [`AffineMatrix`] is a small `Copy` value with composition, point/rect/path
//! mapping and fallible inversion. Matrices are built, never edited in place.
//!
//! ## Viewport
//!
//! [`ViewportState`] is what the transformer needs to know about the layout and
//! the current gesture state. [`ViewPortHandler`] is a ready-made
//! implementation.
//!
//! ## Transformer
//!
//! [`Transformer`] holds the value-to-pixel and offset matrices. Every call
//! borrows the viewport to read the live pan/zoom matrix.
//!
//! # Examples
//!
//! ## Drawing and Tapping
//!
//! ```rust
//! use tablechart::{Rect, Transformer, ValueBounds, ViewPortHandler};
//!
//! let mut viewport = ViewPortHandler::<f32>::new();
//! viewport.set_chart_dimens(800.0, 600.0);
//! viewport.restrain_view_port(50.0, 20.0, 20.0, 40.0);
//!
//! let mut transformer = Transformer::new();
//! transformer.prepare_value_to_pixel(&viewport, ValueBounds::from_min_max(0.0, 100.0, 0.0, 50.0));
//! transformer.prepare_offset(&viewport, false);
//!
//! // A bar from 0 to 25 at x in [10, 20]
//! let mut bar = Rect::new(10.0, 25.0, 20.0, 0.0);
//! transformer.map_rect(&viewport, &mut bar);
//! assert!(bar.top < bar.bottom);
//!
//! // The user zooms in; no re-preparation is needed.
//! viewport.zoom(2.0, 1.0, 0.0, 0.0);
//!
//! let value = transformer.pixel_to_value(&viewport, 300.0, 200.0).unwrap();
//! assert!(value.x > 0.0 && value.x < 100.0);
//! ```
//!
//! ## Degenerate Data
//!
//! ```rust
//! use tablechart::{MatrixStage, Transformer, ValueBounds, ViewPortHandler};
//!
//! let mut viewport = ViewPortHandler::<f32>::new();
//! viewport.set_chart_dimens(800.0, 600.0);
//!
//! // All values share one X; the axis collapses instead of becoming infinite.
//! let mut transformer = Transformer::new();
//! transformer.prepare_value_to_pixel(&viewport, ValueBounds::new(5.0, 0.0, 0.0, 10.0));
//! transformer.prepare_offset(&viewport, false);
//!
//! let err = transformer.pixel_to_value(&viewport, 10.0, 10.0).unwrap_err();
//! assert_eq!(err.stage(), MatrixStage::ValueToPixel);
//! ```

pub mod error;
pub mod geom;
pub mod matrix;
pub mod transformer;
pub mod viewport;

pub use error::{MatrixStage, Result, TransformError};
pub use geom::{Path, PathCommand, Point, Rect};
pub use matrix::AffineMatrix;
pub use transformer::{PhaseAxis, Transformer, ValueBounds, offset_matrix, value_to_pixel_matrix};
pub use viewport::{ViewPortHandler, ViewportState};

pub use num_traits::Float;

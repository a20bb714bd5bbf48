//! Geometric primitives passed through the transformer.
//!
//! The same types carry coordinates in either value space or pixel space. Which
//! space a primitive is in depends on the operation that produced it:
//!
//! - Before a forward mapping (`map_points`, `map_rect`, ...) coordinates are
//!   data values.
//! - After a forward mapping, or before an inverse mapping, they are pixels.
//!
//! # Coordinate Systems
//!
//! ## Pixel Coordinates
//!
//! - Origin (0, 0) at the top-left of the canvas
//! - X increases to the right
//! - Y increases downward
//!
//! ## Value Coordinates
//!
//! - Origin and scale defined by the data
//! - X increases to the right
//! - Y increases upward (note the difference!)
//!
//! [`Rect`] uses canvas-style edges (`left`, `top`, `right`, `bottom`). In value
//! space `top` simply names the edge stored first; mapping a rect always
//! returns it sorted so that `top <= bottom` in pixel space.

pub mod util;

use num_traits::Float;

use self::util::sorted_pair;

/// A 2D point in either value or pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<S = f32> {
    /// X coordinate.
    pub x: S,
    /// Y coordinate.
    pub y: S,
}

impl<S> Point<S> {
    /// Creates a new point.
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle described by its four edges.
///
/// # Examples
///
/// ```
/// use tablechart::{Point, Rect};
///
/// let rect = Rect::from_points(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
/// assert_eq!(rect, Rect::new(10.0, 20.0, 50.0, 80.0));
/// assert_eq!(rect.width(), 40.0);
/// assert_eq!(rect.height(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<S = f32> {
    /// Left edge.
    pub left: S,
    /// Top edge.
    pub top: S,
    /// Right edge.
    pub right: S,
    /// Bottom edge.
    pub bottom: S,
}

impl<S> Rect<S> {
    /// Creates a rectangle from its edges, stored as given.
    pub const fn new(left: S, top: S, right: S, bottom: S) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl<S: Float> Rect<S> {
    /// Creates a rectangle spanning two opposite corners.
    ///
    /// The result is sorted regardless of the order of the points.
    pub fn from_points(p1: Point<S>, p2: Point<S>) -> Self {
        let (left, right) = sorted_pair(p1.x, p2.x);
        let (top, bottom) = sorted_pair(p1.y, p2.y);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Computed as `right - left`; negative for an unsorted rect.
    pub fn width(&self) -> S {
        self.right - self.left
    }

    /// Computed as `bottom - top`; negative for an unsorted rect.
    pub fn height(&self) -> S {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point<S> {
        let two = S::one() + S::one();
        Point::new(
            (self.left + self.right) / two,
            (self.top + self.bottom) / two,
        )
    }

    /// Returns a copy with `left <= right` and `top <= bottom`.
    pub fn sorted(&self) -> Self {
        let (left, right) = sorted_pair(self.left, self.right);
        let (top, bottom) = sorted_pair(self.top, self.bottom);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns true if the rect encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Returns true if the point lies within the rect.
    ///
    /// Bounds are inclusive and unsorted edges are handled.
    pub fn contains(&self, point: &Point<S>) -> bool {
        let sorted = self.sorted();
        point.x >= sorted.left
            && point.x <= sorted.right
            && point.y >= sorted.top
            && point.y <= sorted.bottom
    }
}

/// A single drawing command of a [`Path`].
///
/// Control and end points are stored inline so a transform can rewrite them in
/// place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand<S = f32> {
    MoveTo(Point<S>),
    LineTo(Point<S>),
    /// Quadratic curve: `[control, end]`.
    QuadTo([Point<S>; 2]),
    /// Cubic curve: `[control1, control2, end]`.
    CubicTo([Point<S>; 3]),
    Close,
}

impl<S> PathCommand<S> {
    /// All points of this command.
    pub fn points(&self) -> &[Point<S>] {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => std::slice::from_ref(p),
            PathCommand::QuadTo(pts) => pts,
            PathCommand::CubicTo(pts) => pts,
            PathCommand::Close => &[],
        }
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Point<S>] {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => std::slice::from_mut(p),
            PathCommand::QuadTo(pts) => pts,
            PathCommand::CubicTo(pts) => pts,
            PathCommand::Close => &mut [],
        }
    }
}

/// An ordered list of drawing commands, such as a line series outline.
///
/// # Examples
///
/// ```
/// use tablechart::{Path, Point};
///
/// let mut path = Path::new();
/// path.move_to(0.0, 0.0).line_to(10.0, 5.0).close();
///
/// assert_eq!(path.len(), 3);
/// let points: Vec<_> = path.points().copied().collect();
/// assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path<S = f32> {
    commands: Vec<PathCommand<S>>,
}

impl<S: Float> Path<S> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn move_to(&mut self, x: S, y: S) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: S, y: S) -> &mut Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: S, cy: S, x: S, y: S) -> &mut Self {
        self.commands
            .push(PathCommand::QuadTo([Point::new(cx, cy), Point::new(x, y)]));
        self
    }

    pub fn cubic_to(&mut self, c1x: S, c1y: S, c2x: S, c2y: S, x: S, y: S) -> &mut Self {
        self.commands.push(PathCommand::CubicTo([
            Point::new(c1x, c1y),
            Point::new(c2x, c2y),
            Point::new(x, y),
        ]));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Removes all commands, keeping the allocation for reuse.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl<S> Path<S> {
    pub fn commands(&self) -> &[PathCommand<S>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over every control and end point in command order.
    pub fn points(&self) -> impl Iterator<Item = &Point<S>> {
        self.commands.iter().flat_map(|c| c.points().iter())
    }

    pub(crate) fn points_mut(&mut self) -> impl Iterator<Item = &mut Point<S>> {
        self.commands.iter_mut().flat_map(|c| c.points_mut().iter_mut())
    }
}

impl<S> FromIterator<PathCommand<S>> for Path<S> {
    fn from_iter<I: IntoIterator<Item = PathCommand<S>>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_point_in_sorted_rect() {
        let rect = Rect::new(0.0f64, 0.0, 10.0, 5.0);

        assert!(rect.contains(&Point::new(5.0, 3.0)));
        assert!(rect.contains(&Point::new(0.0, 5.0)));
    }

    #[test]
    fn contains_handles_unsorted_edges() {
        let rect = Rect::new(10.0f64, 2.0, 6.0, -4.0);

        assert!(rect.contains(&Point::new(8.0, -1.0)));
        assert!(rect.contains(&Point::new(6.0, 2.0)));
    }

    #[test]
    fn contains_rejects_outside_values() {
        let rect = Rect::new(-5.0f64, -5.0, -3.0, -3.0);

        assert!(!rect.contains(&Point::new(-10.0, -4.0)));
        assert!(!rect.contains(&Point::new(-4.0, 10.0)));
    }

    #[test]
    fn sorted_and_empty() {
        let rect = Rect::new(4.0f32, 8.0, 1.0, 2.0);
        assert!(rect.is_empty());

        let sorted = rect.sorted();
        assert_eq!(sorted, Rect::new(1.0, 2.0, 4.0, 8.0));
        assert!(!sorted.is_empty());
        assert_eq!(sorted.center(), Point::new(2.5, 5.0));
    }

    #[test]
    fn path_points_follow_command_order() {
        let mut path = Path::<f32>::new();
        path.move_to(0.0, 0.0)
            .quad_to(1.0, 1.0, 2.0, 0.0)
            .cubic_to(3.0, 1.0, 4.0, 1.0, 5.0, 0.0)
            .close();

        let xs: Vec<f32> = path.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(path.len(), 4);

        path.clear();
        assert!(path.is_empty());
    }
}

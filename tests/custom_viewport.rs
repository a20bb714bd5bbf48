use std::cell::Cell;

use tablechart::{AffineMatrix, Path, Transformer, ValueBounds, ViewportState};

/// A table view with fixed insets whose gesture handler stores its matrix in a
/// `Cell`, so it can be changed while the view is borrowed.
struct TableView {
    width: f32,
    height: f32,
    header: f32,
    gutter: f32,
    pan_zoom: Cell<AffineMatrix<f32>>,
}

impl TableView {
    fn new() -> Self {
        Self {
            width: 320.0,
            height: 240.0,
            header: 40.0,
            gutter: 20.0,
            pan_zoom: Cell::new(AffineMatrix::identity()),
        }
    }
}

impl ViewportState<f32> for TableView {
    fn content_width(&self) -> f32 {
        self.width - self.gutter
    }

    fn content_height(&self) -> f32 {
        self.height - self.header
    }

    fn chart_height(&self) -> f32 {
        self.height
    }

    fn offset_left(&self) -> f32 {
        self.gutter
    }

    fn offset_top(&self) -> f32 {
        self.header
    }

    fn offset_bottom(&self) -> f32 {
        0.0
    }

    fn offset_right(&self) -> f32 {
        0.0
    }

    fn pan_zoom_matrix(&self) -> AffineMatrix<f32> {
        self.pan_zoom.get()
    }
}

fn prepared(view: &TableView) -> Transformer<f32> {
    let mut transformer = Transformer::new();
    transformer.prepare_value_to_pixel(view, ValueBounds::from_min_max(0.0, 30.0, 0.0, 20.0));
    transformer.prepare_offset(view, false);
    transformer
}

#[test]
fn custom_viewport_lays_out_content_below_header() {
    let view = TableView::new();
    let transformer = prepared(&view);

    let top_left = transformer.value_to_pixel(&view, 0.0, 20.0);
    assert!((top_left.x - 20.0).abs() < 1e-4);
    assert!((top_left.y - 40.0).abs() < 1e-4);

    let bottom_right = transformer.value_to_pixel(&view, 30.0, 0.0);
    assert!((bottom_right.x - 320.0).abs() < 1e-4);
    assert!((bottom_right.y - 240.0).abs() < 1e-4);
}

#[test]
fn scrolling_moves_content_but_not_insets() {
    let view = TableView::new();
    let transformer = prepared(&view);

    let mut row = Path::new();
    row.move_to(0.0, 10.0).line_to(30.0, 10.0);
    let mut before = row.clone();
    transformer.map_path(&view, &mut before);

    // Scroll up by one row height in content pixels.
    view.pan_zoom.set(AffineMatrix::translate(0.0, -10.0));
    let mut after = row.clone();
    transformer.map_path(&view, &mut after);

    for (b, a) in before.points().zip(after.points()) {
        assert!((a.x - b.x).abs() < 1e-4);
        assert!((a.y - (b.y - 10.0)).abs() < 1e-4);
    }

    let tapped = transformer.pixel_to_value(&view, 20.0, 130.0).unwrap();
    assert!(tapped.x.abs() < 1e-4);
    assert!((tapped.y - 10.0).abs() < 1e-3);
}

#[test]
fn flat_buffer_round_trip() {
    let view = TableView::new();
    view.pan_zoom.set(AffineMatrix::scale_about(1.5, 1.5, 150.0, 100.0));
    let transformer = prepared(&view);

    let values = [0.0, 0.0, 15.0, 10.0, 30.0, 20.0, 7.5, 2.5];
    let mut buffer = values;
    transformer.map_points(&view, &mut buffer);
    transformer.map_pixels_to_value(&view, &mut buffer).unwrap();

    for (got, want) in buffer.iter().zip(values.iter()) {
        assert!((got - want).abs() < 1e-3, "{got} != {want}");
    }
}

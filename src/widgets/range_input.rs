//! Range input widget for the binning interval

use egui::{Response, Ui};

/// A pair of linked drag values editing `(start, end)`.
///
/// Each end is limited by the overall bounds and by the other end, so the
/// widget itself never produces an inverted range.
pub struct RangeInput<'a> {
    label: &'a str,
    range: &'a mut (f64, f64),
    bounds: Option<(f64, f64)>,
    speed: f64,
}

impl<'a> RangeInput<'a> {
    /// Create a new range input widget
    pub fn new(label: &'a str, range: &'a mut (f64, f64)) -> Self {
        Self {
            label,
            range,
            bounds: None,
            speed: 1.0,
        }
    }

    /// Limit both ends to `bounds`
    pub fn bounds(mut self, bounds: (f64, f64)) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the drag speed for value inputs
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Show the widget. The returned response is `changed()` when either end moved.
    pub fn show(self, ui: &mut Ui) -> Response {
        let (lo, hi) = self
            .bounds
            .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
        let (start, end) = self.range;

        ui.horizontal(|ui| {
            ui.label(self.label);
            let start_response = ui.add(
                egui::DragValue::new(start)
                    .speed(self.speed)
                    .range(lo..=end.min(hi)),
            );
            ui.label("to");
            let end_response = ui.add(
                egui::DragValue::new(end)
                    .speed(self.speed)
                    .range(start.max(lo)..=hi),
            );
            start_response | end_response
        })
        .inner
    }
}

//! Viewport calculation and zoom state.
//!
//! The render scale is the page's fit-to-container scale (floored) times the
//! user zoom factor, so rendering follows the container width.

/// Width available to the canvas inside its container.
pub fn available_width(client_width: f64, gutter: f64) -> f64 {
    client_width - gutter
}

/// Scale that makes a page of `page_width` fill `container_width`, never
/// below `min_fit`.
pub fn fit_scale(container_width: f64, page_width: f64, min_fit: f64) -> f64 {
    if !page_width.is_finite() || page_width <= 0.0 {
        return min_fit;
    }
    // f64::max ignores a NaN operand
    (container_width / page_width).max(min_fit)
}

pub fn render_scale(fit: f64, zoom: f64) -> f64 {
    fit * zoom
}

/// User zoom factor, clamped to a fixed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    factor: f64,
    step: f64,
    min: f64,
    max: f64,
}

impl Zoom {
    pub fn new(initial: f64, step: f64, min: f64, max: f64) -> Self {
        Self {
            factor: initial.clamp(min, max),
            step,
            min,
            max,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn step_in(&mut self) {
        self.factor = (self.factor + self.step).clamp(self.min, self.max);
    }

    pub fn step_out(&mut self) {
        self.factor = (self.factor - self.step).clamp(self.min, self.max);
    }

    /// Rounded percentage, e.g. `120%`.
    pub fn label(&self) -> String {
        format!("{}%", (self.factor * 100.0).round() as i64)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(1.2, 0.1, 0.6, 2.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_scale_follows_container() {
        assert_eq!(fit_scale(1200.0, 600.0, 0.6), 2.0);
        assert_eq!(fit_scale(300.0, 600.0, 0.6), 0.6);
        assert_eq!(fit_scale(-20.0, 600.0, 0.6), 0.6);
    }

    #[test]
    fn fit_scale_degenerate_page() {
        assert_eq!(fit_scale(800.0, 0.0, 0.6), 0.6);
        assert_eq!(fit_scale(800.0, f64::NAN, 0.6), 0.6);
    }

    #[test]
    fn render_scale_applies_zoom() {
        let width = available_width(1020.0, 20.0);
        let fit = fit_scale(width, 500.0, 0.6);
        assert_eq!(fit, 2.0);
        assert!((render_scale(fit, 1.2) - 2.4).abs() < 1e-12);
    }

    #[test]
    fn zoom_stays_in_range() {
        let mut zoom = Zoom::default();
        for _ in 0..50 {
            zoom.step_in();
            assert!(zoom.factor() <= 2.2 && zoom.factor() >= 0.6);
        }
        assert_eq!(zoom.factor(), 2.2);
        for _ in 0..50 {
            zoom.step_out();
            assert!(zoom.factor() <= 2.2 && zoom.factor() >= 0.6);
        }
        assert_eq!(zoom.factor(), 0.6);
    }

    #[test]
    fn zoom_labels() {
        let mut zoom = Zoom::default();
        assert_eq!(zoom.label(), "120%");
        zoom.step_in();
        assert_eq!(zoom.label(), "130%");
        zoom.step_out();
        zoom.step_out();
        assert_eq!(zoom.label(), "110%");
    }

    #[test]
    fn initial_factor_is_clamped() {
        assert_eq!(Zoom::new(5.0, 0.1, 0.6, 2.2).factor(), 2.2);
        assert_eq!(Zoom::new(0.1, 0.1, 0.6, 2.2).factor(), 0.6);
    }
}

use derive_more::Display;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - Chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr)]
pub enum ChartKind {
    #[display(fmt = "Price")]
    #[strum(serialize = "price")]
    PriceLine,
    #[display(fmt = "Volume")]
    #[strum(serialize = "volume")]
    VolumeBars,
}

/// Value Object - Viewport
///
/// The visible sub-range of the X (time) axis carried inside the full data
/// domain, plus the pixel size of the drawing surface. Invariant while the
/// domain is non-degenerate:
/// `domain_start <= visible_start < visible_end <= domain_end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub domain_start: f64,
    pub domain_end: f64,
    pub visible_start: f64,
    pub visible_end: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 0.0,
            visible_start: 0.0,
            visible_end: 0.0,
            width: 800,
            height: 420,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    /// Viewport spanning the full data domain.
    pub fn full(domain_start: f64, domain_end: f64, width: u32, height: u32) -> Self {
        Self {
            domain_start,
            domain_end,
            visible_start: domain_start,
            visible_end: domain_end,
            width,
            height,
        }
    }

    pub fn visible_span(&self) -> f64 {
        self.visible_end - self.visible_start
    }

    pub fn domain_span(&self) -> f64 {
        self.domain_end - self.domain_start
    }

    /// A viewport with no usable extent; every gesture is a no-op on it.
    pub fn is_degenerate(&self) -> bool {
        self.domain_span() <= 0.0 || self.width == 0
    }

    pub fn is_full_extent(&self) -> bool {
        self.visible_start == self.domain_start && self.visible_end == self.domain_end
    }

    /// Replace the data domain and show it in full, discarding zoom/pan state.
    pub fn set_domain(&mut self, start: f64, end: f64) {
        self.domain_start = start;
        self.domain_end = end;
        self.reset();
    }

    /// Back to the full data domain, exactly. Idempotent.
    pub fn reset(&mut self) {
        self.visible_start = self.domain_start;
        self.visible_end = self.domain_end;
    }

    /// Rescale the visible span by `scale` about the focal ratio (0.0 = left
    /// edge, 1.0 = right edge), so the instant under the pointer stays under
    /// the pointer. The span is clamped to `[min_span, domain span]`; growing
    /// to or past the full domain snaps exactly onto it.
    pub fn zoom_at(&mut self, scale: f64, focus_ratio: f64, min_span: f64) {
        if self.is_degenerate() || !scale.is_finite() || scale <= 0.0 {
            return;
        }
        let span = self.visible_span();
        let max_span = self.domain_span();
        let floor = min_span.clamp(0.0, max_span);
        let new_span = (span * scale).clamp(floor, max_span);
        if new_span >= max_span {
            self.reset();
            return;
        }

        let focus = self.visible_start + span * focus_ratio;
        self.visible_start = focus - new_span * focus_ratio;
        self.visible_end = self.visible_start + new_span;
        self.clamp_into_domain();
    }

    /// Shift both visible bounds by `delta` time units, clamped so the
    /// viewport never leaves the data domain. Zoom level is unaffected.
    pub fn pan_by(&mut self, delta: f64) {
        if self.is_degenerate() || !delta.is_finite() {
            return;
        }
        let clamped = delta.clamp(
            self.domain_start - self.visible_start,
            self.domain_end - self.visible_end,
        );
        self.visible_start += clamped;
        self.visible_end += clamped;
    }

    fn clamp_into_domain(&mut self) {
        if self.visible_span() >= self.domain_span() {
            self.reset();
            return;
        }
        if self.visible_start < self.domain_start {
            let shift = self.domain_start - self.visible_start;
            self.visible_start += shift;
            self.visible_end += shift;
        } else if self.visible_end > self.domain_end {
            let shift = self.visible_end - self.domain_end;
            self.visible_start -= shift;
            self.visible_end -= shift;
        }
    }

    /// Pixels per time unit at the current zoom level.
    pub fn pixels_per_unit(&self) -> f64 {
        let span = self.visible_span();
        if span <= 0.0 {
            return 0.0;
        }
        f64::from(self.width) / span
    }

    /// Convert a timestamp to a screen X coordinate
    pub fn time_to_x(&self, timestamp: f64) -> f64 {
        let span = self.visible_span();
        if span <= 0.0 {
            return 0.0;
        }
        (timestamp - self.visible_start) / span * f64::from(self.width)
    }

    /// Convert a screen X coordinate back to time
    pub fn x_to_time(&self, x: f64) -> f64 {
        if self.width == 0 {
            return self.visible_start;
        }
        self.visible_start + self.visible_span() * (x / f64::from(self.width))
    }

    /// Whether a pointer X position lies over the drawing surface.
    pub fn contains_x(&self, x: f64) -> bool {
        x >= 0.0 && x <= f64::from(self.width)
    }
}

use super::entities::Chart;

/// Modifier key that arms the pan gesture. Plain drags stay reserved for the
/// default hover/tooltip behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanModifier {
    Shift,
    Control,
    Alt,
}

impl PanModifier {
    pub fn is_held(&self, shift: bool, ctrl: bool, alt: bool) -> bool {
        match self {
            PanModifier::Shift => shift,
            PanModifier::Control => ctrl,
            PanModifier::Alt => alt,
        }
    }
}

/// Tunable interaction parameters. Tests treat these as configuration, not
/// magic numbers.
#[derive(Debug, Clone)]
pub struct InteractionConfig {
    /// Visible-span multiplier applied per zoom-in wheel notch; must be in
    /// (0, 1). A notch of -1 divides by the same factor.
    pub zoom_step: f64,
    /// Lower bound on how few data points a fully zoomed-in viewport shows.
    pub min_visible_points: usize,
    pub pan_modifier: PanModifier,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.85,
            min_visible_points: 4,
            pan_modifier: PanModifier::Shift,
        }
    }
}

/// Drag phase of the controller. Zoom and reset are instantaneous and never
/// enter a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanState {
    Idle,
    Panning { last_x: f64 },
}

/// Translates pointer/wheel gestures into viewport mutations on a chart.
///
/// One controller per chart instance, driven synchronously from UI events.
/// Series data is never touched; only `chart.viewport` moves.
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: InteractionConfig,
    state: PanState,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self { config, state: PanState::Idle }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn state(&self) -> PanState {
        self.state
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanState::Panning { .. })
    }

    /// Wheel gesture. Positive `notches` zoom in, negative zoom out, with the
    /// data instant under `pointer_x` held in place. Gestures outside the
    /// chart area or on a chart without usable extent are ignored.
    /// Returns whether the viewport changed.
    pub fn zoom(&mut self, chart: &mut Chart, notches: f64, pointer_x: f64) -> bool {
        if notches == 0.0 || !notches.is_finite() {
            return false;
        }
        if chart.viewport.is_degenerate() || !chart.viewport.contains_x(pointer_x) {
            return false;
        }

        let scale = self.config.zoom_step.powf(notches);
        let min_span = chart.min_zoom_span(self.config.min_visible_points);
        let focus_ratio = pointer_x / f64::from(chart.viewport.width);

        let before = chart.viewport.clone();
        chart.viewport.zoom_at(scale, focus_ratio, min_span);
        chart.viewport != before
    }

    /// Pointer-down. Arms the pan only while the configured modifier is held;
    /// otherwise the drag is left to the default hover behavior.
    pub fn begin_drag(&mut self, pointer_x: f64, modifier_held: bool) -> bool {
        if modifier_held {
            self.state = PanState::Panning { last_x: pointer_x };
            true
        } else {
            self.state = PanState::Idle;
            false
        }
    }

    /// Pointer-move. While panning, converts the pixel delta into a time
    /// delta at the current zoom level and shifts the viewport, clamped to
    /// the domain. Releasing the modifier mid-drag cancels the pan at its
    /// last value. Returns whether the viewport changed.
    pub fn drag_to(&mut self, chart: &mut Chart, pointer_x: f64, modifier_held: bool) -> bool {
        let PanState::Panning { last_x } = self.state else {
            return false;
        };
        if !modifier_held {
            self.state = PanState::Idle;
            return false;
        }
        if chart.viewport.is_degenerate() {
            return false;
        }

        let dx = pointer_x - last_x;
        self.state = PanState::Panning { last_x: pointer_x };

        // Dragging right pulls earlier data into view.
        let delta = -dx * chart.viewport.visible_span() / f64::from(chart.viewport.width);
        let before = chart.viewport.clone();
        chart.viewport.pan_by(delta);
        chart.viewport != before
    }

    /// Pointer-up or pointer-leave.
    pub fn end_drag(&mut self) {
        self.state = PanState::Idle;
    }

    /// Double-click. Restores the full data domain exactly, discarding any
    /// zoom/pan state. Returns false when already at full extent.
    pub fn reset(&mut self, chart: &mut Chart) -> bool {
        self.state = PanState::Idle;
        if chart.viewport.is_full_extent() {
            return false;
        }
        chart.viewport.reset();
        true
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

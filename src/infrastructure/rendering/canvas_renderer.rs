use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::{
    chart::{Chart, ChartKind},
    errors::{AppError, RenderingResult},
    logging::{LogComponent, get_logger},
    market_data::Series,
};
use crate::time_utils::format_time_label;

/// Series color cycle, one entry per player.
const SERIES_COLORS: [&str; 6] = [
    "#00ff88", "#4da6ff", "#f39c12", "#ff4d94", "#b39ddb", "#ff6b6b",
];

/// Precomputed vertical scaling for one frame.
#[derive(Debug, Clone)]
struct ScaleParams {
    top_pad: f64,
    plot_height: f64,
    min_value: f64,
    value_range: f64,
}

/// Canvas 2D renderer for the analytics charts - Infrastructure implementation
///
/// Data is drawn across the full canvas width so screen X and viewport X
/// agree exactly; the gesture math and the tooltip depend on that.
pub struct CanvasChartRenderer {
    canvas_id: String,
    width: u32,
    height: u32,
}

impl CanvasChartRenderer {
    const TOP_PAD: f64 = 28.0;
    const BOTTOM_PAD: f64 = 24.0;

    pub fn new(canvas_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self { canvas_id: canvas_id.into(), width, height }
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Get canvas element and context
    fn get_canvas_context(&self) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| JsValue::from_str("Canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        let context = canvas
            .get_context("2d")
            .map_err(|_| JsValue::from_str("Failed to get 2D context"))?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))?;

        Ok((canvas, context))
    }

    /// Redraw the chart clipped to its current viewport.
    pub fn render(&self, chart: &Chart) -> RenderingResult<()> {
        self.render_inner(chart)
            .map_err(|e| AppError::RenderingError(format!("{:?}", e)))
    }

    fn render_inner(&self, chart: &Chart) -> Result<(), JsValue> {
        let (_canvas, context) = self.get_canvas_context()?;

        context.clear_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        context.set_fill_style_str("#1a1f2b");
        context.fill_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));

        if !chart.has_data() || chart.viewport.is_degenerate() {
            self.render_no_data_message(&context)?;
            self.render_title(&context, chart)?;
            return Ok(());
        }

        let scale = self.scale_params(chart);

        self.render_gridlines(&context, &scale)?;
        match chart.kind {
            ChartKind::PriceLine => {
                for (i, series) in chart.series.iter().enumerate() {
                    self.render_line_series(&context, chart, series, &scale, series_color(i));
                }
                self.render_last_value_line(&context, chart, &scale)?;
            }
            ChartKind::VolumeBars => {
                for (i, series) in chart.series.iter().enumerate() {
                    self.render_bar_series(&context, chart, series, &scale, series_color(i));
                }
            }
        }
        self.render_value_scale(&context, chart, &scale)?;
        self.render_time_axis(&context, chart)?;
        self.render_title(&context, chart)?;

        Ok(())
    }

    fn scale_params(&self, chart: &Chart) -> ScaleParams {
        let plot_height = f64::from(self.height) - Self::TOP_PAD - Self::BOTTOM_PAD;

        let (mut min_value, mut max_value) = chart.visible_value_bounds().unwrap_or((0.0, 1.0));
        // Volume bars grow from zero; prices float with 5% headroom.
        match chart.kind {
            ChartKind::VolumeBars => min_value = 0.0,
            ChartKind::PriceLine => {
                let padding = (max_value - min_value) * 0.05;
                min_value -= padding;
                max_value += padding;
            }
        }
        let mut value_range = max_value - min_value;
        if value_range <= 0.0 {
            // Flat series: give it one unit of air so the line sits centered.
            min_value -= 0.5;
            value_range = 1.0;
        }

        ScaleParams { top_pad: Self::TOP_PAD, plot_height, min_value, value_range }
    }

    fn value_to_y(&self, value: f64, scale: &ScaleParams) -> f64 {
        let normalized = (value - scale.min_value) / scale.value_range;
        scale.top_pad + (1.0 - normalized) * scale.plot_height
    }

    fn render_gridlines(
        &self,
        context: &CanvasRenderingContext2d,
        scale: &ScaleParams,
    ) -> Result<(), JsValue> {
        context.set_stroke_style_str("#2b3342");
        context.set_line_width(1.0);
        for i in 0..=4 {
            let y = scale.top_pad + scale.plot_height * f64::from(i) / 4.0;
            context.begin_path();
            context.move_to(0.0, y);
            context.line_to(f64::from(self.width), y);
            context.stroke();
        }
        Ok(())
    }

    fn render_line_series(
        &self,
        context: &CanvasRenderingContext2d,
        chart: &Chart,
        series: &Series,
        scale: &ScaleParams,
        color: &str,
    ) {
        let visible = series.points_in(chart.viewport.visible_start, chart.viewport.visible_end);
        if visible.is_empty() {
            return;
        }

        context.set_stroke_style_str(color);
        context.set_fill_style_str(color);
        context.set_line_width(2.0);

        if visible.len() == 1 {
            let x = chart.viewport.time_to_x(visible[0].timestamp.as_f64());
            let y = self.value_to_y(visible[0].value, scale);
            context.fill_rect(x - 2.0, y - 2.0, 4.0, 4.0);
            return;
        }

        context.begin_path();
        for (i, point) in visible.iter().enumerate() {
            let x = chart.viewport.time_to_x(point.timestamp.as_f64());
            let y = self.value_to_y(point.value, scale);
            if i == 0 {
                context.move_to(x, y);
            } else {
                context.line_to(x, y);
            }
        }
        context.stroke();
    }

    fn render_bar_series(
        &self,
        context: &CanvasRenderingContext2d,
        chart: &Chart,
        series: &Series,
        scale: &ScaleParams,
        color: &str,
    ) {
        let visible = series.points_in(chart.viewport.visible_start, chart.viewport.visible_end);
        if visible.is_empty() {
            return;
        }

        let spacing = series
            .min_spacing()
            .unwrap_or_else(|| chart.viewport.visible_span());
        let bar_width = (spacing * chart.viewport.pixels_per_unit() * 0.6).clamp(1.0, 48.0);
        let base_y = self.value_to_y(0.0_f64.max(scale.min_value), scale);

        context.set_fill_style_str(color);
        for point in visible {
            let x = chart.viewport.time_to_x(point.timestamp.as_f64());
            let y = self.value_to_y(point.value, scale);
            context.fill_rect(x - bar_width / 2.0, y, bar_width, (base_y - y).max(1.0));
        }
    }

    fn render_last_value_line(
        &self,
        context: &CanvasRenderingContext2d,
        chart: &Chart,
        scale: &ScaleParams,
    ) -> Result<(), JsValue> {
        // Reference line at the most recent visible price.
        let last = chart
            .series
            .iter()
            .flat_map(|s| {
                s.points_in(chart.viewport.visible_start, chart.viewport.visible_end)
                    .last()
            })
            .max_by_key(|p| p.timestamp);
        let Some(last) = last else {
            return Ok(());
        };

        let y = self.value_to_y(last.value, scale);
        context.set_stroke_style_str("#72c685");
        context.set_line_width(1.0);
        context.begin_path();
        context.move_to(0.0, y);
        context.line_to(f64::from(self.width), y);
        context.stroke();

        context.set_fill_style_str("#72c685");
        context.set_font("12px 'Courier New', monospace");
        context.fill_text(
            &format!("${:.2}", last.value),
            f64::from(self.width) - 64.0,
            (y - 4.0).max(scale.top_pad + 10.0),
        )?;
        Ok(())
    }

    fn render_value_scale(
        &self,
        context: &CanvasRenderingContext2d,
        chart: &Chart,
        scale: &ScaleParams,
    ) -> Result<(), JsValue> {
        context.set_fill_style_str("#aaaaaa");
        context.set_font("12px Arial");

        let max_value = scale.min_value + scale.value_range;
        let (max_text, min_text) = match chart.kind {
            ChartKind::PriceLine => {
                (format!("${:.2}", max_value), format!("${:.2}", scale.min_value))
            }
            ChartKind::VolumeBars => {
                (format!("{:.0}", max_value), format!("{:.0}", scale.min_value))
            }
        };
        context.fill_text(&max_text, 6.0, scale.top_pad + 12.0)?;
        context.fill_text(&min_text, 6.0, scale.top_pad + scale.plot_height - 4.0)?;
        Ok(())
    }

    fn render_time_axis(
        &self,
        context: &CanvasRenderingContext2d,
        chart: &Chart,
    ) -> Result<(), JsValue> {
        let span = chart.viewport.visible_span();
        if span <= 0.0 {
            return Ok(());
        }

        context.set_fill_style_str("#8a93a5");
        context.set_font("11px Arial");

        let labels = 5;
        let y = f64::from(self.height) - 8.0;
        for i in 0..=labels {
            let t = chart.viewport.visible_start + span * f64::from(i) / f64::from(labels);
            let label = format_time_label(t as u64, span as u64);
            let x = chart.viewport.time_to_x(t);
            let x = x.clamp(2.0, f64::from(self.width) - 40.0);
            context.fill_text(&label, x, y)?;
        }
        Ok(())
    }

    fn render_no_data_message(&self, context: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        context.set_fill_style_str("#ffffff");
        context.set_font("16px Arial");
        let text = "No trades recorded yet";
        context.fill_text(text, 50.0, f64::from(self.height) / 2.0)?;

        get_logger().warn(
            LogComponent::Infrastructure("CanvasRenderer"),
            "No series data to render",
        );

        Ok(())
    }

    fn render_title(
        &self,
        context: &CanvasRenderingContext2d,
        chart: &Chart,
    ) -> Result<(), JsValue> {
        context.set_fill_style_str("#ffffff");
        context.set_font("14px Arial");
        let title = match chart.kind {
            ChartKind::PriceLine => "Price History",
            ChartKind::VolumeBars => "Trading Volume",
        };
        context.fill_text(title, 6.0, 18.0)?;
        Ok(())
    }
}

fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

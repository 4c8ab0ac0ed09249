use super::value_objects::{ChartKind, Viewport};
use crate::domain::market_data::{PlayerName, Series, Timestamp};

/// A data point resolved under the pointer, fed to the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPoint {
    pub player: PlayerName,
    pub timestamp: Timestamp,
    pub value: f64,
}

/// Domain entity - one rendered chart
///
/// Owns its viewport; series data is read-only from the chart's point of
/// view and replaced wholesale on every analytics refresh.
#[derive(Debug, Clone)]
pub struct Chart {
    pub id: String,
    pub kind: ChartKind,
    pub series: Vec<Series>,
    pub viewport: Viewport,
}

impl Chart {
    pub fn new(id: String, kind: ChartKind, width: u32, height: u32) -> Self {
        Self {
            id,
            kind,
            series: Vec::new(),
            viewport: Viewport::new(width, height),
        }
    }

    /// Replace the chart's series and rebuild the data domain from their
    /// combined time bounds. The viewport resets to the new full extent;
    /// without any points it falls back to the default (degenerate) viewport,
    /// which renders as an empty chart.
    pub fn set_series(&mut self, series: Vec<Series>) {
        self.series = series;
        match self.combined_time_bounds() {
            Some((start, end)) => {
                self.viewport.set_domain(start.as_f64(), end.as_f64());
            }
            None => {
                let (width, height) = (self.viewport.width, self.viewport.height);
                self.viewport = Viewport::new(width, height);
            }
        }
    }

    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    fn combined_time_bounds(&self) -> Option<(Timestamp, Timestamp)> {
        self.series
            .iter()
            .filter_map(Series::time_bounds)
            .fold(None, |acc, (start, end)| match acc {
                None => Some((start, end)),
                Some((lo, hi)) => Some((lo.min(start), hi.max(end))),
            })
    }

    /// Smallest zoom width that keeps at least `min_points` data points in
    /// view, derived from the tightest spacing between consecutive points.
    /// Charts with fewer than two distinct instants report 0.0 (no extra
    /// constraint; the degenerate-domain guard already stops them).
    pub fn min_zoom_span(&self, min_points: usize) -> f64 {
        let spacing = self
            .series
            .iter()
            .filter_map(Series::min_spacing)
            .fold(None, |acc: Option<f64>, gap| match acc {
                None => Some(gap),
                Some(min) => Some(min.min(gap)),
            });
        match spacing {
            Some(gap) => gap * min_points.saturating_sub(1).max(1) as f64,
            None => 0.0,
        }
    }

    /// Smallest and largest values currently inside the visible range,
    /// across all series. Drives the renderer's value scale.
    pub fn visible_value_bounds(&self) -> Option<(f64, f64)> {
        let start = self.viewport.visible_start;
        let end = self.viewport.visible_end;
        self.series
            .iter()
            .flat_map(|s| s.points_in(start, end))
            .fold(None, |acc, p| match acc {
                None => Some((p.value, p.value)),
                Some((lo, hi)) => Some((lo.min(p.value), hi.max(p.value))),
            })
    }

    /// Resolve the visible data point nearest to a pointer X position.
    /// Tooltip duty only; the viewport is untouched.
    pub fn hover(&self, pointer_x: f64) -> Option<HoverPoint> {
        if !self.viewport.contains_x(pointer_x) || self.viewport.is_degenerate() {
            return None;
        }
        let time = self.viewport.x_to_time(pointer_x);
        let start = self.viewport.visible_start;
        let end = self.viewport.visible_end;

        let mut best: Option<(f64, HoverPoint)> = None;
        for series in &self.series {
            let Some(point) = series.nearest(time) else {
                continue;
            };
            let ts = point.timestamp.as_f64();
            if ts < start || ts > end {
                continue;
            }
            let distance = (ts - time).abs();
            if best.as_ref().map(|(d, _)| distance < *d).unwrap_or(true) {
                best = Some((
                    distance,
                    HoverPoint {
                        player: series.name().clone(),
                        timestamp: point.timestamp,
                        value: point.value,
                    },
                ));
            }
        }
        best.map(|(_, hover)| hover)
    }
}

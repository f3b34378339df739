//! Drawing Surface
//! Explicit figure context that accumulates chart primitives before display.
//!
//! A `Figure` is a display list: bar groups, text, axis annotations and legend
//! entries in the order they were added. Display backends (the egui viewer and
//! the static exporter) only read it.

use crate::charts::SeriesColor;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigureError {
    #[error("Shape mismatch: {positions} positions for {heights} heights")]
    ShapeMismatch { positions: usize, heights: usize },
    #[error("Invalid bar width: {0}")]
    InvalidBarWidth(f64),
    #[error("Tick count {ticks} does not match label count {labels}")]
    TickLabelMismatch { ticks: usize, labels: usize },
    #[error("Legend has {handles} handles but {names} names")]
    LegendMismatch { handles: usize, names: usize },
    #[error("Unknown bar group handle: {0}")]
    UnknownBarGroup(usize),
}

/// Geometry of one drawn bar. `x` is the left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

impl Bar {
    pub fn center(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Which point of the text box sits on the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Centred horizontally, bottom edge on the position
    CenterBottom,
    /// Centred horizontally, top edge on the position
    CenterTop,
}

/// Text placed in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: TextAnchor,
}

/// Handle to a group of bars drawn by one `bar` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarGroupId(pub usize);

/// Bars returned from a `bar` call, like a plotting library's bar container.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnBars {
    pub id: BarGroupId,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub color: SeriesColor,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub group: BarGroupId,
    pub name: String,
    pub color: SeriesColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XTick {
    pub position: f64,
    pub label: String,
}

/// Primitive drawing operations a chart needs from its surface.
pub trait DrawingSurface {
    /// Draw bars centred on `positions` with the given `heights`.
    fn bar(
        &mut self,
        positions: &[f64],
        heights: &[f64],
        width: f64,
        color: SeriesColor,
    ) -> Result<DrawnBars, FigureError>;

    fn text(&mut self, x: f64, y: f64, text: String, anchor: TextAnchor);

    fn set_title(&mut self, title: &str);

    fn set_y_label(&mut self, label: &str);

    fn set_x_ticks(&mut self, positions: &[f64], labels: &[String]) -> Result<(), FigureError>;

    fn legend(&mut self, handles: &[BarGroupId], names: &[String]) -> Result<(), FigureError>;
}

/// In-memory figure owned by the caller for one rendering pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub y_label: Option<String>,
    pub x_ticks: Vec<XTick>,
    pub bar_groups: Vec<BarGroup>,
    pub labels: Vec<Label>,
    pub legend: Vec<LegendEntry>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legend name of a bar group, if the legend lists it.
    pub fn legend_name(&self, group: BarGroupId) -> Option<&str> {
        self.legend
            .iter()
            .find(|entry| entry.group == group)
            .map(|entry| entry.name.as_str())
    }

    pub fn bar_count(&self) -> usize {
        self.bar_groups.iter().map(|group| group.bars.len()).sum()
    }

    /// Horizontal data extent covered by bars and ticks, padded by half a slot.
    pub fn x_range(&self) -> (f64, f64) {
        let edges = self
            .bar_groups
            .iter()
            .flat_map(|group| group.bars.iter())
            .flat_map(|bar| [bar.x, bar.x + bar.width])
            .chain(self.x_ticks.iter().map(|tick| tick.position));

        let (min, max) = edges.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min.is_infinite() {
            return (-0.5, 0.5);
        }
        (min - 0.5, max + 0.5)
    }

    /// Vertical data extent, always including zero, with headroom for labels.
    pub fn y_range(&self) -> (f64, f64) {
        let mut min = 0.0f64;
        let mut max = 0.0f64;
        for bar in self.bar_groups.iter().flat_map(|group| group.bars.iter()) {
            if bar.height.is_finite() {
                min = min.min(bar.height);
                max = max.max(bar.height);
            }
        }
        if min == max {
            return (0.0, 1.0);
        }
        let pad = (max - min) * 0.1;
        let lower = if min < 0.0 { min - pad } else { 0.0 };
        let upper = if max > 0.0 { max + pad } else { 0.0 };
        (lower, upper)
    }
}

impl DrawingSurface for Figure {
    fn bar(
        &mut self,
        positions: &[f64],
        heights: &[f64],
        width: f64,
        color: SeriesColor,
    ) -> Result<DrawnBars, FigureError> {
        if positions.len() != heights.len() {
            return Err(FigureError::ShapeMismatch {
                positions: positions.len(),
                heights: heights.len(),
            });
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(FigureError::InvalidBarWidth(width));
        }

        let bars: Vec<Bar> = positions
            .iter()
            .zip(heights)
            .map(|(&center, &height)| Bar {
                x: center - width / 2.0,
                width,
                height,
            })
            .collect();

        let id = BarGroupId(self.bar_groups.len());
        self.bar_groups.push(BarGroup {
            color,
            bars: bars.clone(),
        });
        Ok(DrawnBars { id, bars })
    }

    fn text(&mut self, x: f64, y: f64, text: String, anchor: TextAnchor) {
        self.labels.push(Label { x, y, text, anchor });
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_y_label(&mut self, label: &str) {
        self.y_label = Some(label.to_string());
    }

    fn set_x_ticks(&mut self, positions: &[f64], labels: &[String]) -> Result<(), FigureError> {
        if positions.len() != labels.len() {
            return Err(FigureError::TickLabelMismatch {
                ticks: positions.len(),
                labels: labels.len(),
            });
        }
        self.x_ticks = positions
            .iter()
            .zip(labels)
            .map(|(&position, label)| XTick {
                position,
                label: label.clone(),
            })
            .collect();
        Ok(())
    }

    fn legend(&mut self, handles: &[BarGroupId], names: &[String]) -> Result<(), FigureError> {
        if handles.len() != names.len() {
            return Err(FigureError::LegendMismatch {
                handles: handles.len(),
                names: names.len(),
            });
        }
        let mut entries = Vec::with_capacity(handles.len());
        for (handle, name) in handles.iter().zip(names) {
            let group = self
                .bar_groups
                .get(handle.0)
                .ok_or(FigureError::UnknownBarGroup(handle.0))?;
            entries.push(LegendEntry {
                group: *handle,
                name: name.clone(),
                color: group.color,
            });
        }
        self.legend = entries;
        Ok(())
    }
}

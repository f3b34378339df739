//! Charts module - grouped bar chart drawing and display backends

mod color;
mod export;
mod figure;
mod plotter;
mod renderer;
mod series;

pub use color::SeriesColor;
pub use export::{ImageFormat, StaticChartExporter};
pub use figure::Figure;
pub use plotter::ChartPlotter;
pub use renderer::ChartRenderer;
pub use series::{ChartData, Series};

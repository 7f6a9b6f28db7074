pub mod chart_canvas;
pub mod chart_handle;
pub mod layout;

pub use chart_canvas::ChartCanvas;

mod chart_panel;
pub use chart_panel::ChartPanel;

mod controls;
pub use controls::{CountrySelect, ScaleRadio, SeriesToggle};

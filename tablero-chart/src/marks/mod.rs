pub mod bar;
pub mod pie;
pub mod scatter;
pub mod table;

pub use bar::{BarPoint, BarSeries, GroupedBarChart, InstitutionsChart, LineSeries, StackSeries};
pub use pie::{PieChart, PieSlice};
pub use scatter::{GrowthMatrix, RuleLine, ScatterPoint, ScatterSeries};
pub use table::{StyledCell, StyledTable};

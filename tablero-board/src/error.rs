use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableroBoardError {
    #[error(transparent)]
    Data(#[from] tablero_data::error::TableroDataError),

    #[error(transparent)]
    Chart(#[from] tablero_chart::error::TableroChartError),

    #[error(transparent)]
    Scale(#[from] tablero_scales::error::TableroScaleError),
}

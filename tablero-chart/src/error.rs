use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableroChartError {
    #[error(transparent)]
    Data(#[from] tablero_data::error::TableroDataError),

    #[error(transparent)]
    Scale(#[from] tablero_scales::error::TableroScaleError),
}

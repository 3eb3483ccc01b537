#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TableroScaleError {
    #[error("Empty domain")]
    EmptyDomain,

    #[error("Invalid domain: min ({min}) must not exceed max ({max})")]
    InvalidDomain { min: f64, max: f64 },

    #[error("Center ({center}) must lie within the domain [{min}, {max}]")]
    CenterOutOfRange { center: f64, min: f64, max: f64 },
}

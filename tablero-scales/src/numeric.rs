use crate::error::TableroScaleError;

/// A linear normalizer that maps values from a `(min, max)` domain into
/// [0, 1]. Color scales wrap one of these and own their degenerate-domain
/// defaults, so callers are expected to check `is_degenerate` before
/// trusting `normalize` output.
#[derive(Clone, Debug)]
pub struct LinearNormalize {
    domain_start: f64,
    domain_end: f64,
    clamp: bool,
}

impl LinearNormalize {
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            clamp: false,
        }
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
    }

    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            // Neutral midpoint instead of a division by zero.
            return 0.5;
        }
        let t = (value - self.domain_start) / (self.domain_end - self.domain_start);
        if self.clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }
}

/// A two-segment linear normalizer over `(min, center, max)`: values below
/// the center map into [0, 0.5], values above into [0.5, 1], each segment
/// linear. Out-of-domain values saturate at the endpoints.
#[derive(Clone, Debug)]
pub struct TwoSlopeNormalize {
    min: f64,
    center: f64,
    max: f64,
}

impl TwoSlopeNormalize {
    /// Errors when the domain is inverted or the center falls outside it.
    pub fn try_new(min: f64, center: f64, max: f64) -> Result<Self, TableroScaleError> {
        if min.is_nan() || max.is_nan() || center.is_nan() {
            return Err(TableroScaleError::EmptyDomain);
        }
        if min > max {
            return Err(TableroScaleError::InvalidDomain { min, max });
        }
        if center < min || center > max {
            return Err(TableroScaleError::CenterOutOfRange { center, min, max });
        }
        Ok(Self { min, center, max })
    }

    /// Like `try_new`, but snaps an out-of-range center onto the nearest
    /// domain endpoint instead of failing.
    pub fn clamped(min: f64, center: f64, max: f64) -> Result<Self, TableroScaleError> {
        if min.is_nan() || max.is_nan() || center.is_nan() {
            return Err(TableroScaleError::EmptyDomain);
        }
        if min > max {
            return Err(TableroScaleError::InvalidDomain { min, max });
        }
        Ok(Self {
            min,
            center: center.clamp(min, max),
            max,
        })
    }

    pub fn domain(&self) -> (f64, f64, f64) {
        (self.min, self.center, self.max)
    }

    pub fn normalize(&self, value: f64) -> f64 {
        if value <= self.center {
            let width = self.center - self.min;
            if width == 0.0 {
                // Empty lower segment collapses onto the center.
                0.5
            } else {
                (0.5 * (value - self.min) / width).clamp(0.0, 0.5)
            }
        } else {
            let width = self.max - self.center;
            if width == 0.0 {
                0.5
            } else {
                (0.5 + 0.5 * (value - self.center) / width).clamp(0.5, 1.0)
            }
        }
    }
}

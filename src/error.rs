use thiserror::Error;

/// Errors surfaced by the checked pricing entry points.
///
/// The plain `f64` functions never produce these; they let NaN/inf flow
/// through to the caller instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Invalid rate domain: 1 + {periodic_rate} cannot be raised to {num_periods}")]
    RateDomain { periodic_rate: f64, num_periods: f64 },

    #[error("Non-finite result in {context}")]
    NonFinite { context: &'static str },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let code = match err {
            PricingError::InvalidInput { .. } => 2,
            PricingError::RateDomain { .. } | PricingError::NonFinite { .. } => 4,
        };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_errors_map_to_exit_codes() {
        let input = PricingError::InvalidInput {
            field: "frequency",
            reason: "must be >= 1".to_string(),
        };
        assert_eq!(AppError::from(input).exit_code(), 2);

        let domain = PricingError::RateDomain {
            periodic_rate: -1.5,
            num_periods: 0.5,
        };
        let app = AppError::from(domain);
        assert_eq!(app.exit_code(), 4);
        assert!(app.to_string().contains("rate domain"));
    }
}

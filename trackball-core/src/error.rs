/// Error types for viewport and trackball configuration
use thiserror::Error;

/// Errors raised while building a viewport or validating configuration.
///
/// Tracker operations themselves never fail; these only come from setup.
#[derive(Debug, Error, PartialEq)]
pub enum TrackballError {
    /// Width or height was zero, negative or not finite.
    #[error("invalid viewport size {width}x{height}: both sides must be positive and finite")]
    InvalidViewport { width: f32, height: f32 },

    /// The trackball radius was zero, negative or not finite.
    #[error("invalid trackball radius {0}: must be positive and finite")]
    InvalidRadius(f32),

    /// The trackball radius fraction was zero, negative or not finite.
    #[error("invalid radius fraction {0}: must be positive and finite")]
    InvalidRadiusFraction(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_viewport_message() {
        let err = TrackballError::InvalidViewport {
            width: 0.0,
            height: 240.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x240"), "unexpected message: {msg}");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + std::error::Error>() {}
        assert_send_sync::<TrackballError>();
    }
}

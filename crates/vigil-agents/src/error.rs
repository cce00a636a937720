//! Error types for the vigil-agents crate.
//!
//! All validation happens at agent construction; tick-time code operates
//! on state that is known to be valid and never returns errors.

/// Errors that can occur while constructing an agent from its spec.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The agent has no name.
    #[error("agent name must not be empty")]
    EmptyName,

    /// A scalar parameter is NaN or infinite.
    #[error("parameter `{field}` must be finite")]
    NonFinite {
        /// The offending parameter name.
        field: &'static str,
    },

    /// A parameter that must be strictly positive is zero or negative.
    #[error("parameter `{field}` is {value} but must be positive")]
    NotPositive {
        /// The offending parameter name.
        field: &'static str,
        /// The value that was supplied.
        value: f32,
    },

    /// A parameter that must not be negative is negative.
    #[error("parameter `{field}` is {value} but must not be negative")]
    Negative {
        /// The offending parameter name.
        field: &'static str,
        /// The value that was supplied.
        value: f32,
    },

    /// A scalar parameter is outside its valid range.
    #[error("parameter `{field}` is {value} but must be in [{min}, {max}]")]
    OutOfRange {
        /// The offending parameter name.
        field: &'static str,
        /// The value that was supplied.
        value: f32,
        /// Lower bound of the valid range.
        min: f32,
        /// Upper bound of the valid range.
        max: f32,
    },

    /// The wait window is inverted (`min_wait > max_wait`).
    #[error("wait window is inverted: min_wait {min} > max_wait {max}")]
    InvalidWaitWindow {
        /// The configured minimum wait.
        min: f32,
        /// The configured maximum wait.
        max: f32,
    },

    /// A waypoint has a NaN or infinite coordinate.
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFiniteWaypoint {
        /// Index of the offending waypoint.
        index: usize,
    },
}

//! Log targets of the style engine.
//!
//! Compile anomalies such as unknown property names or tag keys the data
//! source does not know are reported through `tracing` at `warn` level,
//! never as errors. Install a subscriber to see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("mapcss_style::compile=warn")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Style engine root target.
    pub const STYLE: &str = "mapcss_style";
    /// Compiling rules against a data source.
    pub const COMPILE: &str = "mapcss_style::compile";
    /// Evaluating rules for an element.
    pub const EVALUATE: &str = "mapcss_style::evaluate";
}

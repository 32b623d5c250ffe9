//! Line interpretation for the two monitor pipelines: debug-text filtering
//! and 6-axis IMU telemetry.

pub mod history;
pub mod imu;
pub mod text;

pub use history::{SampleHistory, AXIS_NAMES};
pub use imu::{ImuSample, FIELD_COUNT};
pub use text::{contains_marker, DEFAULT_MARKER};

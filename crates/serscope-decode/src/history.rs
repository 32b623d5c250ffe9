use crate::imu::ImuSample;

/// Axis labels shared by the plot legends.
pub const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// Append-only record of accepted samples and their receipt timestamps.
///
/// Kept for the whole run and walked in full on every redraw; there is no
/// eviction. Entries stay in arrival order.
#[derive(Debug, Default)]
pub struct SampleHistory {
    timestamps: Vec<f64>,
    accel: [Vec<f64>; 3],
    gyro: [Vec<f64>; 3],
}

impl SampleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `sample` as received at `timestamp` (seconds since the epoch).
    pub fn push(&mut self, timestamp: f64, sample: &ImuSample) {
        self.timestamps.push(timestamp);
        for axis in 0..3 {
            self.accel[axis].push(sample.accel[axis]);
            self.gyro[axis].push(sample.gyro[axis]);
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn accel(&self, axis: usize) -> &[f64] {
        &self.accel[axis]
    }

    pub fn gyro(&self, axis: usize) -> &[f64] {
        &self.gyro[axis]
    }

    /// `[t, value]` pairs for one acceleration axis, in arrival order.
    pub fn accel_series(&self, axis: usize) -> Vec<[f64; 2]> {
        series(&self.timestamps, &self.accel[axis])
    }

    /// `[t, value]` pairs for one angular-velocity axis, in arrival order.
    pub fn gyro_series(&self, axis: usize) -> Vec<[f64; 2]> {
        series(&self.timestamps, &self.gyro[axis])
    }
}

fn series(timestamps: &[f64], values: &[f64]) -> Vec<[f64; 2]> {
    timestamps
        .iter()
        .zip(values)
        .map(|(&t, &v)| [t, v])
        .collect()
}

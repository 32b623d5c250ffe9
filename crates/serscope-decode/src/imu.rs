use serde::{Deserialize, Serialize};

/// Fields per telemetry line: accel x/y/z, then gyro x/y/z.
pub const FIELD_COUNT: usize = 6;

/// One 6-axis inertial reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    /// Linear acceleration x/y/z.
    pub accel: [f64; 3],
    /// Angular velocity x/y/z.
    pub gyro: [f64; 3],
}

impl ImuSample {
    /// Parse one decoded line of `ax,ay,az,wx,wy,wz`.
    ///
    /// Anything that is not exactly six parseable floats yields `None`:
    /// partial and garbled lines are expected on a live link, so the caller
    /// drops them and moves on. Whitespace around a field is tolerated.
    pub fn parse(line: &str) -> Option<Self> {
        let mut values = [0.0_f64; FIELD_COUNT];
        let mut fields = line.split(',');
        for value in &mut values {
            *value = fields.next()?.trim().parse().ok()?;
        }
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            accel: [values[0], values[1], values[2]],
            gyro: [values[3], values[4], values[5]],
        })
    }
}

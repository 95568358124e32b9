use serde::Serialize;

/// Request key carrying the reading, same name as the model feature.
pub const DISSOLVED_OXYGEN: &str = "Dissolved Oxygen";

/// Below this dissolved oxygen level (mg/L) the pond needs aeration.
pub const LOW_THRESHOLD: f64 = 7.0;
/// Below this level fish are at immediate risk.
pub const CRITICAL_THRESHOLD: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OxygenLevel {
    Critical,
    Low,
    Stable,
}

/// What to do about a dissolved oxygen reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OxygenStatus {
    pub level: OxygenLevel,
    /// Whether the aeration pump should be running.
    pub pump: bool,
    pub message: &'static str,
}

pub fn assess(dissolved_oxygen: f64) -> OxygenStatus {
    if dissolved_oxygen < CRITICAL_THRESHOLD {
        OxygenStatus {
            level: OxygenLevel::Critical,
            pump: true,
            message: "Oxygen level dangerously low! Immediate action required.",
        }
    } else if dissolved_oxygen < LOW_THRESHOLD {
        OxygenStatus {
            level: OxygenLevel::Low,
            pump: true,
            message: "Oxygen level low. Pump is regulating oxygen.",
        }
    } else {
        OxygenStatus {
            level: OxygenLevel::Stable,
            pump: false,
            message: "Oxygen levels are stable.",
        }
    }
}

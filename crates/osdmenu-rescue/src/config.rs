//! Live GPS rescue configuration.
//!
//! This is the struct the flight controller reads every loop. The menu
//! never touches it except inside the pages' enter and exit hooks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Labels for [`GpsRescueConfig::altitude_mode`], in index order.
pub const ALTITUDE_MODE_LABELS: &[&str] = &["MAX_ALT", "FIXED_ALT", "CURRENT_ALT"];

/// How the rescue picks its return altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AltitudeMode {
    /// Highest altitude seen during the flight.
    MaxAlt,
    /// The configured initial altitude.
    FixedAlt,
    /// Altitude at the moment the rescue starts.
    CurrentAlt,
}

impl AltitudeMode {
    /// Mode for a stored index, if valid.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::MaxAlt),
            1 => Some(Self::FixedAlt),
            2 => Some(Self::CurrentAlt),
            _ => None,
        }
    }

    /// Stored index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// OSD label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        ALTITUDE_MODE_LABELS[self as usize]
    }
}

/// GPS rescue parameters as held by the flight controller.
///
/// Distances are meters, speeds centimeters per second, throttle values
/// are PWM microseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GpsRescueConfig {
    /// Maximum pitch angle, degrees.
    pub angle: u16,
    pub initial_altitude_m: u16,
    pub descent_distance_m: u16,
    pub rescue_groundspeed: u16,
    pub throttle_p: u16,
    pub throttle_i: u16,
    pub throttle_d: u16,
    pub vel_p: u16,
    pub vel_i: u16,
    pub vel_d: u16,
    pub yaw_p: u16,
    pub throttle_min: u16,
    pub throttle_max: u16,
    pub throttle_hover: u16,
    pub min_sats: u8,
    pub min_rescue_dth: u16,
    pub allow_arming_without_fix: bool,
    pub target_landing_altitude_m: u16,
    pub target_landing_distance_m: u16,
    /// Index into [`ALTITUDE_MODE_LABELS`].
    pub altitude_mode: u8,
    pub ascend_rate: u16,
    pub descend_rate: u16,
}

impl Default for GpsRescueConfig {
    fn default() -> Self {
        Self {
            angle: 32,
            initial_altitude_m: 30,
            descent_distance_m: 20,
            rescue_groundspeed: 500,
            throttle_p: 150,
            throttle_i: 20,
            throttle_d: 50,
            vel_p: 80,
            vel_i: 20,
            vel_d: 15,
            yaw_p: 40,
            throttle_min: 1100,
            throttle_max: 1600,
            throttle_hover: 1280,
            min_sats: 8,
            min_rescue_dth: 100,
            allow_arming_without_fix: false,
            target_landing_altitude_m: 5,
            target_landing_distance_m: 10,
            altitude_mode: AltitudeMode::MaxAlt.index(),
            ascend_rate: 500,
            descend_rate: 150,
        }
    }
}

impl GpsRescueConfig {
    /// Decoded altitude mode, if the stored index is valid.
    #[must_use]
    pub const fn altitude_mode(&self) -> Option<AltitudeMode> {
        AltitudeMode::from_index(self.altitude_mode)
    }
}

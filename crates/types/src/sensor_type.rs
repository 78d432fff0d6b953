//! Sensor classification flags.
//!
//! A sensor type combines independent axes: what is measured (`TEMP`,
//! `FAN`) and where it comes from (`LMSENSOR`, `NVIDIA`, `HDD`, `REMOTE`).
//! Queries test for intersection, so `SensorType::TEMP` matches every
//! temperature sensor whatever its origin.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bit-combinable sensor type
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorType(u32);

impl SensorType {
    pub const NONE: SensorType = SensorType(0);

    pub const TEMP: SensorType = SensorType(0x0001);
    pub const FAN: SensorType = SensorType(0x0002);
    pub const REMOTE: SensorType = SensorType(0x0004);

    pub const LMSENSOR: SensorType = SensorType(0x0100);
    pub const NVIDIA: SensorType = SensorType(0x0200);
    pub const HDD: SensorType = SensorType(0x0400);

    pub const LMSENSOR_TEMP: SensorType = SensorType(Self::LMSENSOR.0 | Self::TEMP.0);
    pub const LMSENSOR_FAN: SensorType = SensorType(Self::LMSENSOR.0 | Self::FAN.0);
    pub const NVIDIA_TEMP: SensorType = SensorType(Self::NVIDIA.0 | Self::TEMP.0);
    pub const HDD_TEMP: SensorType = SensorType(Self::HDD.0 | Self::TEMP.0);

    pub const fn from_bits(bits: u32) -> Self {
        SensorType(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set
    pub const fn contains(self, other: SensorType) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if at least one bit is shared
    pub const fn intersects(self, other: SensorType) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_temperature(self) -> bool {
        self.intersects(Self::TEMP)
    }

    pub const fn is_fan(self) -> bool {
        self.intersects(Self::FAN)
    }

    /// Unit suffix used when rendering values of this type
    pub const fn unit(self) -> &'static str {
        if self.is_temperature() {
            "C"
        } else {
            ""
        }
    }

    /// Human readable label for the source kind
    pub fn describe(self) -> &'static str {
        if self.intersects(Self::REMOTE) {
            "Remote"
        } else if self.contains(Self::LMSENSOR_TEMP) {
            "Temperature"
        } else if self.contains(Self::LMSENSOR_FAN) {
            "Fan"
        } else if self.intersects(Self::NVIDIA) {
            "NVidia GPU Temperature"
        } else if self.contains(Self::HDD_TEMP) {
            "HDD Temperature"
        } else {
            "N/A"
        }
    }
}

impl BitOr for SensorType {
    type Output = SensorType;

    fn bitor(self, rhs: SensorType) -> SensorType {
        SensorType(self.0 | rhs.0)
    }
}

impl BitOrAssign for SensorType {
    fn bitor_assign(&mut self, rhs: SensorType) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SensorType {
    type Output = SensorType;

    fn bitand(self, rhs: SensorType) -> SensorType {
        SensorType(self.0 & rhs.0)
    }
}

impl fmt::Debug for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(SensorType, &str); 6] = [
            (SensorType::TEMP, "TEMP"),
            (SensorType::FAN, "FAN"),
            (SensorType::REMOTE, "REMOTE"),
            (SensorType::LMSENSOR, "LMSENSOR"),
            (SensorType::NVIDIA, "NVIDIA"),
            (SensorType::HDD, "HDD"),
        ];

        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();

        if names.is_empty() {
            write!(f, "SensorType({:#x})", self.0)
        } else {
            write!(f, "SensorType({})", names.join(" | "))
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

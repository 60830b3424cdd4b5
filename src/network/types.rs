//! Houses, generators and consumption classes.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Fixed demand level of a house.
///
/// Each class maps to a constant demand in kW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ConsumptionClass {
    /// 10 kW.
    Low,
    /// 20 kW.
    Normal,
    /// 40 kW.
    High,
}

impl ConsumptionClass {
    /// All classes, lowest demand first.
    pub const ALL: [ConsumptionClass; 3] = [
        ConsumptionClass::Low,
        ConsumptionClass::Normal,
        ConsumptionClass::High,
    ];

    /// Demand in kW.
    pub const fn demand_kw(self) -> u32 {
        match self {
            ConsumptionClass::Low => 10,
            ConsumptionClass::Normal => 20,
            ConsumptionClass::High => 40,
        }
    }

    /// Canonical upper-case label used by the network file format.
    pub const fn label(self) -> &'static str {
        match self {
            ConsumptionClass::Low => "LOW",
            ConsumptionClass::Normal => "NORMAL",
            ConsumptionClass::High => "HIGH",
        }
    }

    /// Labels accepted when parsing, canonical label first. The second
    /// spelling is the one used by older network files.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            ConsumptionClass::Low => &["LOW", "BASSE"],
            ConsumptionClass::Normal => &["NORMAL"],
            ConsumptionClass::High => &["HIGH", "FORTE"],
        }
    }
}

impl fmt::Display for ConsumptionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConsumptionClass {
    type Err = GridError;

    /// Case-insensitive parse of `LOW`, `NORMAL` or `HIGH`, or of a
    /// legacy alias (`BASSE`, `FORTE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        ConsumptionClass::ALL
            .into_iter()
            .find(|class| {
                class
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(label))
            })
            .ok_or_else(|| {
                GridError::invalid(format!(
                    "unknown consumption class '{label}' (expected LOW, NORMAL or HIGH)"
                ))
            })
    }
}

/// A power-consuming entity.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub(crate) name: String,
    pub(crate) class: ConsumptionClass,
}

impl House {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> ConsumptionClass {
        self.class
    }

    /// Demand in kW, derived from the consumption class.
    pub fn demand_kw(&self) -> f64 {
        f64::from(self.class.demand_kw())
    }
}

/// A power-producing entity with a mutable capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    pub(crate) name: String,
    pub(crate) capacity_kw: f64,
}

impl Generator {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum production in kW. Always `>= 0`.
    pub fn capacity_kw(&self) -> f64 {
        self.capacity_kw
    }
}

/// What an upsert did.
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert<T> {
    /// The entity did not exist and was created.
    Created,
    /// The entity existed; `previous` holds the value it had before.
    Updated { previous: T },
}

impl<T> Upsert<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Upsert::Created)
    }
}

/// What a successful `connect` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connect {
    /// The house had no generator before.
    Created,
    /// The house was moved off `previous` (which may equal the new one).
    Moved { previous: String },
}

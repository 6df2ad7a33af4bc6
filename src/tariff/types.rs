//! Tariff schedule types: lookup keys, slabs, and the charge rules a schedule carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bill::error::BillError;

/// Distribution licensee that issued the tariff order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utility {
    TataPower,
    Adani,
}

impl Utility {
    pub const ALL: [Utility; 2] = [Utility::TataPower, Utility::Adani];

    /// Maps a user-facing label (`"tata"`, `"Tata Power"`, `"adani"`, ...) to a utility.
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "tata" | "tata_power" | "tatapower" | "tpc" => Some(Self::TataPower),
            "adani" | "adani_electricity" | "aeml" => Some(Self::Adani),
            _ => None,
        }
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TataPower => write!(f, "Tata Power"),
            Self::Adani => write!(f, "Adani Electricity"),
        }
    }
}

/// How the consumer is connected to the licensee.
///
/// `Welcome` consumers are supplied by one licensee over another's wires and
/// are billed on loss-adjusted units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    Direct,
    Welcome,
}

impl NetworkType {
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "direct" => Some(Self::Direct),
            "welcome" | "changeover" => Some(Self::Welcome),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct"),
            Self::Welcome => write!(f, "Welcome"),
        }
    }
}

/// Consumer category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Residential,
    Commercial,
}

impl Category {
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "residential" | "res" | "lt_i" => Some(Self::Residential),
            "commercial" | "com" | "lt_ii" => Some(Self::Commercial),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Residential => write!(f, "Residential"),
            Self::Commercial => write!(f, "Commercial"),
        }
    }
}

/// Supply phase of the connection; selects per-phase fixed charges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    SinglePhase,
    ThreePhase,
}

impl Phase {
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "single" | "single_phase" | "1" => Some(Self::SinglePhase),
            "three" | "three_phase" | "3" => Some(Self::ThreePhase),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePhase => write!(f, "Single Phase"),
            Self::ThreePhase => write!(f, "Three Phase"),
        }
    }
}

fn normalize(label: &str) -> String {
    label
        .trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

/// Registry key: one schedule per (utility, network, category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TariffKey {
    pub utility: Utility,
    pub network: NetworkType,
    pub category: Category,
}

impl TariffKey {
    pub fn new(utility: Utility, network: NetworkType, category: Category) -> Self {
        Self {
            utility,
            network,
            category,
        }
    }

    /// Builds a key from free-form labels.
    ///
    /// # Errors
    ///
    /// Returns [`BillError::UnknownTariff`] if any label names no known
    /// utility, network, or category, since no schedule can exist for it.
    pub fn parse(utility: &str, network: &str, category: &str) -> Result<Self, BillError> {
        let unknown = || BillError::UnknownTariff {
            utility: utility.to_string(),
            network: network.to_string(),
            category: category.to_string(),
        };
        Ok(Self {
            utility: Utility::from_label(utility).ok_or_else(unknown)?,
            network: NetworkType::from_label(network).ok_or_else(unknown)?,
            category: Category::from_label(category).ok_or_else(unknown)?,
        })
    }
}

impl fmt::Display for TariffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.utility, self.network, self.category)
    }
}

/// One consumption tier. `up_to` is the cumulative upper edge in kWh;
/// `None` marks the unbounded last slab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slab {
    #[serde(default)]
    pub up_to: Option<f64>,
    /// Rate per kWh (INR).
    pub rate: f64,
}

impl Slab {
    pub fn bounded(up_to: f64, rate: f64) -> Self {
        Self {
            up_to: Some(up_to),
            rate,
        }
    }

    pub fn unbounded(rate: f64) -> Self {
        Self { up_to: None, rate }
    }

    /// Upper edge, with the unbounded slab reported as `f64::INFINITY`.
    pub fn upper_bound(&self) -> f64 {
        self.up_to.unwrap_or(f64::INFINITY)
    }
}

/// Which unit count a per-unit charge is levied on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitBasis {
    Metered,
    #[default]
    Billed,
}

/// Which unit count the energy slabs are applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlabBasis {
    #[default]
    BilledUnits,
    /// Billed units minus solar units (net metering).
    NetOfSolar,
}

/// Fixed-charge tier keyed by billed units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedTier {
    #[serde(default)]
    pub up_to: Option<f64>,
    /// Monthly charge (INR).
    pub amount: f64,
}

fn default_bmd_fraction() -> f64 {
    0.75
}

fn default_penalty_multiplier() -> f64 {
    1.5
}

/// How the monthly fixed or demand charge is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixedChargeRule {
    /// Amount looked up by billed-units breakpoint. Three-phase connections
    /// pay `three_phase` instead when it is set.
    Tiered {
        tiers: Vec<FixedTier>,
        #[serde(default)]
        three_phase: Option<f64>,
    },
    /// Flat per-phase constant.
    Flat { single_phase: f64, three_phase: f64 },
    /// Demand charge on Billing Maximum Demand, with a penalty on demand
    /// recorded above the sanctioned load.
    Demand {
        rate_per_kw: f64,
        #[serde(default = "default_bmd_fraction")]
        bmd_fraction: f64,
        #[serde(default = "default_penalty_multiplier")]
        penalty_multiplier: f64,
    },
}

/// Surcharge per block of sanctioned load above a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdditionalLoadRule {
    pub threshold_kw: f64,
    pub block_kw: f64,
    pub charge_per_block: f64,
}

/// Power Purchase Cost Adjustment rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PpcaRule {
    #[default]
    None,
    Flat {
        rate: f64,
    },
    /// Per-slab PPCA, partitioned like the energy slabs.
    Slabbed {
        slabs: Vec<Slab>,
    },
}

/// Minimum-charge provision: below `below_units` billed units the PPCA is
/// replaced by `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PpcaFloor {
    pub below_units: f64,
    pub amount: f64,
}

fn unity() -> f64 {
    1.0
}

/// Immutable tariff schedule for one (utility, network, category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffSchedule {
    pub utility: Utility,
    pub network: NetworkType,
    pub category: Category,
    /// Metered-to-billed multiplier applied on `Welcome` networks.
    #[serde(default = "unity")]
    pub loss_factor: f64,
    /// Ordered slabs covering `[0, inf)`.
    pub slabs: Vec<Slab>,
    #[serde(default)]
    pub slab_basis: SlabBasis,
    pub wheeling_rate: f64,
    #[serde(default)]
    pub wheeling_basis: UnitBasis,
    pub fixed_charge: FixedChargeRule,
    #[serde(default)]
    pub additional_load: Option<AdditionalLoadRule>,
    #[serde(default)]
    pub ppca: PpcaRule,
    #[serde(default)]
    pub ppca_floor: Option<PpcaFloor>,
    /// Rebate per solar unit (INR/kWh).
    #[serde(default)]
    pub solar_rebate_rate: f64,
    /// Electricity duty as a percentage of the duty base (e.g. `16.0`).
    pub duty_percent: f64,
    /// Tax on sale of electricity per billed unit (INR/kWh).
    pub tose_rate: f64,
}

impl TariffSchedule {
    pub fn key(&self) -> TariffKey {
        TariffKey::new(self.utility, self.network, self.category)
    }
}

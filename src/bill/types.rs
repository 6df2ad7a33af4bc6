//! Bill inputs, intermediate stage outputs, and the final breakdown.

use crate::tariff::{Category, NetworkType, Phase, TariffKey, Utility};

/// Values supplied for one bill calculation.
///
/// # Examples
///
/// ```
/// use mumbai_bill::bill::BillInput;
/// use mumbai_bill::tariff::{Category, NetworkType, Utility};
///
/// let input = BillInput::new(Utility::Adani, NetworkType::Direct, Category::Residential, 250.0)
///     .with_solar_units(40.0)
///     .with_sanctioned_load_kw(5.0);
/// assert_eq!(input.solar_units, 40.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BillInput {
    pub utility: Utility,
    pub network: NetworkType,
    pub category: Category,
    /// Consumption recorded by the meter (kWh, >= 0).
    pub metered_units: f64,
    /// Solar generation credited this month (kWh, <= billed units).
    pub solar_units: f64,
    /// Sanctioned load (kW, >= 0).
    pub sanctioned_load_kw: f64,
    /// Recorded maximum demand (kW, >= 0). Only used by demand-charge schedules.
    pub recorded_max_demand_kw: f64,
    pub phase: Phase,
    /// This month's published PPCA rate (INR/kWh); overrides the schedule's rule.
    pub ppca_rate: Option<f64>,
}

impl BillInput {
    pub fn new(
        utility: Utility,
        network: NetworkType,
        category: Category,
        metered_units: f64,
    ) -> Self {
        Self {
            utility,
            network,
            category,
            metered_units,
            solar_units: 0.0,
            sanctioned_load_kw: 0.0,
            recorded_max_demand_kw: 0.0,
            phase: Phase::SinglePhase,
            ppca_rate: None,
        }
    }

    pub fn key(&self) -> TariffKey {
        TariffKey::new(self.utility, self.network, self.category)
    }

    pub fn with_solar_units(mut self, solar_units: f64) -> Self {
        self.solar_units = solar_units;
        self
    }

    pub fn with_sanctioned_load_kw(mut self, kw: f64) -> Self {
        self.sanctioned_load_kw = kw;
        self
    }

    pub fn with_recorded_max_demand_kw(mut self, kw: f64) -> Self {
        self.recorded_max_demand_kw = kw;
        self
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_ppca_rate(mut self, rate: f64) -> Self {
        self.ppca_rate = Some(rate);
        self
    }
}

/// Units and cost falling into one slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabLine {
    pub lower_bound: f64,
    /// `f64::INFINITY` for the last slab.
    pub upper_bound: f64,
    pub units: f64,
    pub rate: f64,
    pub cost: f64,
}

/// Ordered per-slab partition of a unit count, one line per schedule slab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlabBreakdown {
    pub lines: Vec<SlabLine>,
}

impl SlabBreakdown {
    pub fn total_units(&self) -> f64 {
        self.lines.iter().map(|l| l.units).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.lines.iter().map(|l| l.cost).sum()
    }
}

/// Charges and rebate computed after the energy slabs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surcharges {
    pub wheeling: f64,
    /// Fixed charge, or demand charge on BMD for demand schedules.
    pub fixed: f64,
    /// Surcharge for sanctioned load above the schedule threshold.
    pub additional_load: f64,
    pub ppca: f64,
    /// Whether the low-consumption PPCA floor replaced the computed PPCA.
    pub ppca_floor_applied: bool,
    pub demand_penalty: f64,
    pub solar_rebate: f64,
}

/// Duty base and the two statutory levies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Taxes {
    /// Pre-tax subtotal the duty is charged on, floored at zero.
    pub duty_base: f64,
    pub duty: f64,
    pub tose: f64,
}

/// Complete bill breakdown. All amounts carry full precision; round with
/// [`BillResult::rounded`] or through `Display` at presentation time.
#[derive(Debug, Clone, PartialEq)]
pub struct BillResult {
    pub tariff: TariffKey,
    /// Version label of the tariff table used.
    pub tariff_version: String,
    /// Duty percentage the duty was charged at.
    pub duty_percent: f64,
    pub metered_units: f64,
    pub billed_units: f64,
    /// Units the energy slabs were applied to.
    pub slab_units: f64,
    pub slabs: SlabBreakdown,
    pub energy_total: f64,
    pub wheeling_total: f64,
    pub fixed_total: f64,
    pub additional_load_charge: f64,
    pub ppca_total: f64,
    pub demand_penalty: f64,
    pub solar_rebate: f64,
    pub duty_base: f64,
    pub duty: f64,
    pub tose: f64,
    pub grand_total: f64,
}

impl BillResult {
    /// Average cost per metered kWh, in INR/kWh.
    ///
    /// Bills with less than one metered unit are divided by one so a
    /// fixed-charge-only bill reports its total rather than dividing by zero.
    pub fn average_rate(&self) -> f64 {
        self.grand_total / self.metered_units.max(1.0)
    }
}

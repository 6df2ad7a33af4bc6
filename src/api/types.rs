//! API request and response types.
//!
//! Responses carry amounts rounded to paise; the calculation itself runs at
//! full precision.

use serde::{Deserialize, Serialize};

use crate::bill::report::round_paise;
use crate::bill::{BillInput, BillResult, SlabLine};
use crate::tariff::{Phase, TariffKey, TariffSchedule};

fn default_network() -> String {
    "direct".to_string()
}

fn default_category() -> String {
    "residential".to_string()
}

/// Bill calculation request. Labels are matched case-insensitively.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillRequest {
    pub utility: String,
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub metered_units: f64,
    #[serde(default)]
    pub solar_units: f64,
    #[serde(default)]
    pub sanctioned_load_kw: f64,
    #[serde(default)]
    pub recorded_max_demand_kw: f64,
    #[serde(default)]
    pub phase: Phase,
    #[serde(default)]
    pub ppca_rate: Option<f64>,
}

impl BillRequest {
    /// Builds the calculation input for an already resolved key.
    pub fn to_input(&self, key: TariffKey) -> BillInput {
        BillInput {
            utility: key.utility,
            network: key.network,
            category: key.category,
            metered_units: self.metered_units,
            solar_units: self.solar_units,
            sanctioned_load_kw: self.sanctioned_load_kw,
            recorded_max_demand_kw: self.recorded_max_demand_kw,
            phase: self.phase,
            ppca_rate: self.ppca_rate,
        }
    }
}

/// One energy slab in a bill response.
#[derive(Debug, Serialize)]
pub struct SlabRecord {
    pub lower_kwh: f64,
    /// `None` for the unbounded last slab.
    pub upper_kwh: Option<f64>,
    pub units_kwh: f64,
    pub rate: f64,
    pub cost: f64,
}

impl From<&SlabLine> for SlabRecord {
    fn from(line: &SlabLine) -> Self {
        Self {
            lower_kwh: line.lower_bound,
            upper_kwh: line.upper_bound.is_finite().then_some(line.upper_bound),
            units_kwh: round_paise(line.units),
            rate: line.rate,
            cost: round_paise(line.cost),
        }
    }
}

/// Bill breakdown with every amount rounded to paise.
#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub tariff: TariffKey,
    pub tariff_version: String,
    pub metered_units: f64,
    pub billed_units: f64,
    pub slabs: Vec<SlabRecord>,
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
    /// Grand total per metered kWh.
    pub average_rate: f64,
}

impl From<&BillResult> for BillResponse {
    fn from(bill: &BillResult) -> Self {
        let r = bill.rounded();
        Self {
            tariff: r.tariff,
            tariff_version: r.tariff_version,
            metered_units: r.metered_units,
            billed_units: r.billed_units,
            slabs: bill.slabs.lines.iter().map(SlabRecord::from).collect(),
            energy_total: r.energy_total,
            wheeling_total: r.wheeling_total,
            fixed_total: r.fixed_total,
            additional_load_charge: r.additional_load_charge,
            ppca_total: r.ppca_total,
            demand_penalty: r.demand_penalty,
            solar_rebate: r.solar_rebate,
            duty_base: r.duty_base,
            duty: r.duty,
            tose: r.tose,
            grand_total: r.grand_total,
            average_rate: round_paise(bill.average_rate()),
        }
    }
}

/// Summary of one registered schedule.
#[derive(Debug, Serialize)]
pub struct TariffSummary {
    #[serde(flatten)]
    pub key: TariffKey,
    pub loss_factor: f64,
    pub wheeling_rate: f64,
    pub duty_percent: f64,
    pub tose_rate: f64,
}

impl From<&TariffSchedule> for TariffSummary {
    fn from(s: &TariffSchedule) -> Self {
        Self {
            key: s.key(),
            loss_factor: s.loss_factor,
            wheeling_rate: s.wheeling_rate,
            duty_percent: s.duty_percent,
            tose_rate: s.tose_rate,
        }
    }
}

/// Registered tariffs response.
#[derive(Debug, Serialize)]
pub struct TariffsResponse {
    pub version: String,
    pub tariffs: Vec<TariffSummary>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

//! Wheeling, fixed/demand, additional-load, PPCA, penalty, and solar rebate.

use tracing::{debug, warn};

use crate::bill::slabs::compute_slabs;
use crate::bill::types::{BillInput, SlabBreakdown, Surcharges};
use crate::tariff::{
    AdditionalLoadRule, FixedChargeRule, FixedTier, Phase, PpcaRule, TariffSchedule, UnitBasis,
};

/// Computes every charge levied alongside the energy slabs.
///
/// `slabs` is the energy breakdown; its unit total is the slab basis that a
/// per-slab PPCA rule is partitioned over.
pub fn compute_surcharges(
    input: &BillInput,
    billed_units: f64,
    slabs: &SlabBreakdown,
    schedule: &TariffSchedule,
) -> Surcharges {
    let wheeling_units = match schedule.wheeling_basis {
        UnitBasis::Metered => input.metered_units,
        UnitBasis::Billed => billed_units,
    };
    let wheeling = wheeling_units * schedule.wheeling_rate;

    let (fixed, demand_penalty) = fixed_and_penalty(&schedule.fixed_charge, input, billed_units);

    let additional_load = schedule
        .additional_load
        .map_or(0.0, |rule| additional_load_charge(&rule, input.sanctioned_load_kw));

    let (ppca, ppca_floor_applied) = ppca(schedule, input.ppca_rate, billed_units, slabs.total_units());

    let solar_rebate = input.solar_units * schedule.solar_rebate_rate;

    let surcharges = Surcharges {
        wheeling,
        fixed,
        additional_load,
        ppca,
        ppca_floor_applied,
        demand_penalty,
        solar_rebate,
    };
    debug!(?surcharges, "computed surcharges");
    surcharges
}

/// Fixed (or demand) charge and the excess-demand penalty.
fn fixed_and_penalty(rule: &FixedChargeRule, input: &BillInput, billed_units: f64) -> (f64, f64) {
    match rule {
        FixedChargeRule::Tiered { tiers, three_phase } => {
            let fixed = match (input.phase, three_phase) {
                (Phase::ThreePhase, Some(amount)) => *amount,
                _ => tier_amount(tiers, billed_units),
            };
            (fixed, 0.0)
        }
        FixedChargeRule::Flat {
            single_phase,
            three_phase,
        } => {
            let fixed = match input.phase {
                Phase::SinglePhase => *single_phase,
                Phase::ThreePhase => *three_phase,
            };
            (fixed, 0.0)
        }
        FixedChargeRule::Demand {
            rate_per_kw,
            bmd_fraction,
            penalty_multiplier,
        } => {
            let recorded = input.recorded_max_demand_kw;
            let sanctioned = input.sanctioned_load_kw;
            let bmd = recorded.max(sanctioned * bmd_fraction);
            let excess = (recorded - sanctioned).max(0.0);
            let penalty = excess * rate_per_kw * penalty_multiplier;
            if penalty > 0.0 {
                warn!(
                    recorded_kw = recorded,
                    sanctioned_kw = sanctioned,
                    penalty,
                    "recorded demand exceeds sanctioned load"
                );
            }
            debug!(bmd_kw = bmd, "billing maximum demand");
            (bmd * rate_per_kw, penalty)
        }
    }
}

/// First tier whose upper edge covers `billed_units`.
fn tier_amount(tiers: &[FixedTier], billed_units: f64) -> f64 {
    tiers
        .iter()
        .find(|t| t.up_to.is_none_or(|up_to| billed_units <= up_to))
        .or(tiers.last())
        .map_or(0.0, |t| t.amount)
}

/// Charge per block of sanctioned load above the threshold, counting a
/// partial block as a whole one.
fn additional_load_charge(rule: &AdditionalLoadRule, sanctioned_load_kw: f64) -> f64 {
    if sanctioned_load_kw <= rule.threshold_kw || rule.block_kw <= 0.0 {
        return 0.0;
    }
    let blocks = ((sanctioned_load_kw - rule.threshold_kw) / rule.block_kw).ceil();
    let charge = blocks * rule.charge_per_block;
    warn!(
        sanctioned_load_kw,
        blocks, charge, "additional load surcharge applied"
    );
    charge
}

/// PPCA amount and whether the low-consumption floor replaced it.
fn ppca(
    schedule: &TariffSchedule,
    rate_override: Option<f64>,
    billed_units: f64,
    slab_units: f64,
) -> (f64, bool) {
    let computed = match (rate_override, &schedule.ppca) {
        (Some(rate), _) => billed_units * rate,
        (None, PpcaRule::None) => 0.0,
        (None, PpcaRule::Flat { rate }) => billed_units * rate,
        (None, PpcaRule::Slabbed { slabs }) => compute_slabs(slab_units, slabs).total_cost(),
    };

    match schedule.ppca_floor {
        Some(floor) if billed_units < floor.below_units => {
            warn!(
                billed_units,
                computed,
                floor = floor.amount,
                "PPCA floor overrides computed amount"
            );
            (floor.amount, true)
        }
        _ => (computed, false),
    }
}

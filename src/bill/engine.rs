//! Bill calculation pipeline: convert, slab, surcharge, tax, aggregate.

use std::sync::LazyLock;

use tracing::debug;

use crate::bill::error::{BillError, ValidationError, require_non_negative};
use crate::bill::slabs::compute_slabs;
use crate::bill::surcharge::compute_surcharges;
use crate::bill::tax::{compute_taxes, duty_base};
use crate::bill::types::{BillInput, BillResult, SlabBreakdown, Surcharges, Taxes};
use crate::bill::units::{convert, slab_units};
use crate::tariff::{TariffRegistry, TariffSchedule};

static BUILTIN: LazyLock<TariffRegistry> = LazyLock::new(TariffRegistry::builtin);

/// Calculates a bill against the compiled-in tariff table.
///
/// # Errors
///
/// See [`calculate_bill_with`].
///
/// # Examples
///
/// ```
/// use mumbai_bill::bill::{BillInput, calculate_bill};
/// use mumbai_bill::tariff::{Category, NetworkType, Utility};
///
/// let input = BillInput::new(Utility::TataPower, NetworkType::Direct, Category::Residential, 250.0);
/// let bill = calculate_bill(&input).unwrap();
/// assert_eq!(bill.billed_units, 250.0);
/// assert!(bill.grand_total > bill.duty_base);
/// ```
pub fn calculate_bill(input: &BillInput) -> Result<BillResult, BillError> {
    calculate_bill_with(&BUILTIN, input)
}

/// Calculates a bill against `registry`.
///
/// Pure: identical inputs give bit-identical results.
///
/// # Errors
///
/// Returns [`BillError::Validation`] for negative or non-finite inputs or
/// solar units above billed units, and [`BillError::UnknownTariff`] if the
/// registry holds no schedule for the input's key.
pub fn calculate_bill_with(
    registry: &TariffRegistry,
    input: &BillInput,
) -> Result<BillResult, BillError> {
    validate_input(input)?;
    let schedule = registry.resolve(input.key())?;

    let billed_units = convert(input.metered_units, input.network, schedule.loss_factor)?;
    if input.solar_units > billed_units {
        return Err(ValidationError::new(
            "solar_units",
            format!(
                "must not exceed billed units ({billed_units}), got {}",
                input.solar_units
            ),
        )
        .into());
    }
    debug!(metered = input.metered_units, billed = billed_units, "converted units");

    let units = slab_units(billed_units, input.solar_units, schedule.slab_basis);
    let slabs = compute_slabs(units, &schedule.slabs);
    debug!(slab_units = units, energy = slabs.total_cost(), "computed energy slabs");

    let surcharges = compute_surcharges(input, billed_units, &slabs, schedule);
    let base = duty_base(slabs.total_cost(), &surcharges);
    let taxes = compute_taxes(base, billed_units, schedule);
    debug!(?taxes, "computed taxes");

    let bill = aggregate(
        registry.version(),
        schedule,
        input,
        billed_units,
        units,
        slabs,
        &surcharges,
        &taxes,
    );
    require_finite_totals(&bill)?;
    Ok(bill)
}

fn validate_input(input: &BillInput) -> Result<(), ValidationError> {
    require_non_negative("metered_units", input.metered_units)?;
    require_non_negative("solar_units", input.solar_units)?;
    require_non_negative("sanctioned_load_kw", input.sanctioned_load_kw)?;
    require_non_negative("recorded_max_demand_kw", input.recorded_max_demand_kw)?;
    if let Some(rate) = input.ppca_rate {
        require_non_negative("ppca_rate", rate)?;
    }
    Ok(())
}

/// Rejects bills whose inputs were finite but large enough to overflow a total.
///
/// Every component is checked because the duty base clamp maps NaN to zero.
fn require_finite_totals(bill: &BillResult) -> Result<(), ValidationError> {
    let totals = [
        ("energy_total", bill.energy_total),
        ("wheeling_total", bill.wheeling_total),
        ("fixed_total", bill.fixed_total),
        ("additional_load_charge", bill.additional_load_charge),
        ("ppca_total", bill.ppca_total),
        ("demand_penalty", bill.demand_penalty),
        ("solar_rebate", bill.solar_rebate),
        ("duty_base", bill.duty_base),
        ("duty", bill.duty),
        ("tose", bill.tose),
        ("grand_total", bill.grand_total),
    ];
    match totals.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((field, value)) => Err(ValidationError::new(
            field,
            format!("overflowed to {value}; inputs are too large to bill"),
        )),
        None => Ok(()),
    }
}

/// Assembles the final breakdown.
///
/// `grand_total = duty_base + duty + tose`; nothing is rounded here.
#[expect(clippy::too_many_arguments)]
pub fn aggregate(
    tariff_version: &str,
    schedule: &TariffSchedule,
    input: &BillInput,
    billed_units: f64,
    slab_units: f64,
    slabs: SlabBreakdown,
    surcharges: &Surcharges,
    taxes: &Taxes,
) -> BillResult {
    let energy_total = slabs.total_cost();
    BillResult {
        tariff: schedule.key(),
        tariff_version: tariff_version.to_string(),
        duty_percent: schedule.duty_percent,
        metered_units: input.metered_units,
        billed_units,
        slab_units,
        slabs,
        energy_total,
        wheeling_total: surcharges.wheeling,
        fixed_total: surcharges.fixed,
        additional_load_charge: surcharges.additional_load,
        ppca_total: surcharges.ppca,
        demand_penalty: surcharges.demand_penalty,
        solar_rebate: surcharges.solar_rebate,
        duty_base: taxes.duty_base,
        duty: taxes.duty,
        tose: taxes.tose,
        grand_total: taxes.duty_base + taxes.duty + taxes.tose,
    }
}

//! Metered-to-billed unit conversion.

use crate::bill::error::{ValidationError, require_non_negative};
use crate::tariff::{NetworkType, SlabBasis};

/// Converts metered units to billed units.
///
/// `Welcome` consumers are billed `metered_units * loss_factor`; `Direct`
/// consumers are billed what the meter records. The result is not rounded.
///
/// # Errors
///
/// Returns a [`ValidationError`] if `metered_units` is negative or not finite.
///
/// # Examples
///
/// ```
/// use mumbai_bill::bill::units::convert;
/// use mumbai_bill::tariff::NetworkType;
///
/// assert_eq!(convert(100.0, NetworkType::Direct, 1.05785).unwrap(), 100.0);
/// assert!((convert(100.0, NetworkType::Welcome, 1.05785).unwrap() - 105.785).abs() < 1e-9);
/// ```
pub fn convert(
    metered_units: f64,
    network: NetworkType,
    loss_factor: f64,
) -> Result<f64, ValidationError> {
    require_non_negative("metered_units", metered_units)?;
    let billed = match network {
        NetworkType::Direct => metered_units,
        NetworkType::Welcome => metered_units * loss_factor,
    };
    if !billed.is_finite() {
        return Err(ValidationError::new(
            "metered_units",
            format!("{metered_units} overflows billed units"),
        ));
    }
    Ok(billed)
}

/// Units the energy slabs are applied to under `basis`.
///
/// Callers have already checked `solar_units <= billed_units`.
pub fn slab_units(billed_units: f64, solar_units: f64, basis: SlabBasis) -> f64 {
    match basis {
        SlabBasis::BilledUnits => billed_units,
        SlabBasis::NetOfSolar => (billed_units - solar_units).max(0.0),
    }
}

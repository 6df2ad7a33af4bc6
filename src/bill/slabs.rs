//! Slab-wise partition of a unit count and its cost.

use crate::bill::types::{SlabBreakdown, SlabLine};
use crate::tariff::Slab;

/// Partitions `units` across the ordered `slabs`.
///
/// Each slab takes `min(remaining, upper_bound - lower_bound)` units, so
/// consumption spills into the next slab only once the current one is full.
/// Every slab gets a line, with zero units once consumption is exhausted.
/// With an unbounded last slab the line units sum to `units`.
///
/// # Examples
///
/// ```
/// use mumbai_bill::bill::slabs::compute_slabs;
/// use mumbai_bill::tariff::Slab;
///
/// let slabs = [Slab::bounded(100.0, 2.0), Slab::unbounded(5.2)];
/// let breakdown = compute_slabs(250.0, &slabs);
/// assert_eq!(breakdown.lines[0].units, 100.0);
/// assert_eq!(breakdown.lines[1].units, 150.0);
/// assert_eq!(breakdown.total_cost(), 200.0 + 780.0);
/// ```
pub fn compute_slabs(units: f64, slabs: &[Slab]) -> SlabBreakdown {
    let mut remaining = units.max(0.0);
    let mut prev_boundary = 0.0_f64;
    let mut lines = Vec::with_capacity(slabs.len());

    for slab in slabs {
        let upper = slab.upper_bound();
        let width = (upper - prev_boundary).max(0.0);
        let in_slab = remaining.min(width).max(0.0);
        remaining -= in_slab;

        lines.push(SlabLine {
            lower_bound: prev_boundary,
            upper_bound: upper,
            units: in_slab,
            rate: slab.rate,
            cost: in_slab * slab.rate,
        });
        prev_boundary = upper;
    }

    SlabBreakdown { lines }
}

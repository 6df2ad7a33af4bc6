//! CSV export for bill breakdowns.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::bill::report::slab_label;
use crate::bill::types::BillResult;

/// Column header for CSV bill export.
const HEADER: &str = "component,lower_kwh,upper_kwh,units_kwh,rate,amount";

/// Exports a bill breakdown to a CSV file at the given path.
///
/// Writes a header row, one row per energy slab, then one row per charge.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(bill: &BillResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(bill, buf)
}

/// Writes a bill breakdown as CSV to any writer.
///
/// Amounts are rounded to paise; unit counts to two decimals.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(bill: &BillResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for line in &bill.slabs.lines {
        let upper = if line.upper_bound.is_finite() {
            format!("{:.2}", line.upper_bound)
        } else {
            String::new()
        };
        wtr.write_record(&[
            format!("energy {}", slab_label(line)),
            format!("{:.2}", line.lower_bound),
            upper,
            format!("{:.2}", line.units),
            format!("{:.4}", line.rate),
            format!("{:.2}", line.cost),
        ])?;
    }

    let charges = [
        ("energy_total", bill.energy_total),
        ("wheeling", bill.wheeling_total),
        ("fixed", bill.fixed_total),
        ("additional_load", bill.additional_load_charge),
        ("ppca", bill.ppca_total),
        ("demand_penalty", bill.demand_penalty),
        ("solar_rebate", bill.solar_rebate),
        ("duty_base", bill.duty_base),
        ("duty", bill.duty),
        ("tose", bill.tose),
        ("grand_total", bill.grand_total),
        ("average_rate", bill.average_rate()),
    ];
    for (name, amount) in charges {
        let amount = format!("{amount:.2}");
        wtr.write_record([name, "", "", "", "", amount.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

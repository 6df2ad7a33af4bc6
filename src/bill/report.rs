//! Presentation helpers: paise rounding and the printed bill statement.

use std::fmt;

use crate::bill::types::{BillResult, SlabLine};

/// Rounds an amount to the nearest paisa.
pub fn round_paise(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl BillResult {
    /// Copy with every amount and unit count rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();
        for line in &mut out.slabs.lines {
            line.units = round_paise(line.units);
            line.cost = round_paise(line.cost);
        }
        for value in [
            &mut out.metered_units,
            &mut out.billed_units,
            &mut out.slab_units,
            &mut out.energy_total,
            &mut out.wheeling_total,
            &mut out.fixed_total,
            &mut out.additional_load_charge,
            &mut out.ppca_total,
            &mut out.demand_penalty,
            &mut out.solar_rebate,
            &mut out.duty_base,
            &mut out.duty,
            &mut out.tose,
            &mut out.grand_total,
        ] {
            *value = round_paise(*value);
        }
        out
    }
}

/// Slab label such as `0-100` or `500+`.
pub fn slab_label(line: &SlabLine) -> String {
    if line.upper_bound.is_finite() {
        format!("{}-{}", line.lower_bound, line.upper_bound)
    } else {
        format!("{}+", line.lower_bound)
    }
}

impl fmt::Display for BillResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Electricity Bill ({}) ---", self.tariff_version)?;
        writeln!(f, "Tariff:                 {}", self.tariff)?;
        writeln!(f, "Metered units:          {:.2} kWh", self.metered_units)?;
        writeln!(f, "Billed units:           {:.2} kWh", self.billed_units)?;
        writeln!(f, "Energy slabs:")?;
        for line in self.slabs.lines.iter().filter(|l| l.units > 0.0) {
            writeln!(
                f,
                "  {:<12} {:>10.2} kWh @ {:.4} = {:.2}",
                slab_label(line),
                line.units,
                line.rate,
                line.cost
            )?;
        }
        writeln!(f, "Fixed/demand charges:   {:.2}", self.fixed_total)?;
        if self.additional_load_charge > 0.0 {
            writeln!(f, "Additional load charge: {:.2}", self.additional_load_charge)?;
        }
        writeln!(f, "Energy charges:         {:.2}", self.energy_total)?;
        writeln!(f, "Wheeling charges:       {:.2}", self.wheeling_total)?;
        writeln!(f, "PPCA:                   {:.2}", self.ppca_total)?;
        if self.demand_penalty > 0.0 {
            writeln!(f, "Demand penalty:         {:.2}", self.demand_penalty)?;
        }
        if self.solar_rebate > 0.0 {
            writeln!(f, "Solar rebate:           -{:.2}", self.solar_rebate)?;
        }
        writeln!(f, "Duty base:              {:.2}", self.duty_base)?;
        writeln!(
            f,
            "Electricity duty ({}%): {:.2}",
            self.duty_percent, self.duty
        )?;
        writeln!(f, "Tax on sale:            {:.2}", self.tose)?;
        writeln!(f, "Average rate:           {:.2} /kWh", self.average_rate())?;
        write!(f, "Grand total:            {:.2}", self.grand_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::{BillInput, calculate_bill};
    use crate::tariff::{Category, NetworkType, Utility};

    #[test]
    fn round_paise_rounds_half_away_from_zero() {
        assert_eq!(round_paise(288.806), 288.81);
        assert_eq!(round_paise(2183.6499999999996), 2183.65);
        assert_eq!(round_paise(0.0), 0.0);
    }

    #[test]
    fn rounded_copy_keeps_full_precision_original() {
        let input = BillInput::new(Utility::TataPower, NetworkType::Welcome, Category::Residential, 123.0);
        let bill = calculate_bill(&input).unwrap();
        let rounded = bill.rounded();
        assert_eq!(rounded.billed_units, 130.12);
        assert!((bill.billed_units - 130.11555).abs() < 1e-9);
    }

    #[test]
    fn statement_ends_with_grand_total() {
        let input = BillInput::new(Utility::Adani, NetworkType::Direct, Category::Residential, 250.0);
        let bill = calculate_bill(&input).unwrap();
        let text = bill.to_string();
        let last = text.lines().last().unwrap_or("");
        assert_eq!(last, format!("Grand total:            {:.2}", bill.grand_total));
        assert!(text.contains("Electricity duty (16%)"));
        assert!(text.contains("0-100"));
    }

    #[test]
    fn average_rate_divides_by_metered_units() {
        // metered, not billed, units: the Welcome loss factor is part of the rate
        let input = BillInput::new(Utility::TataPower, NetworkType::Welcome, Category::Residential, 250.0);
        let bill = calculate_bill(&input).unwrap();
        assert!((bill.average_rate() - bill.grand_total / 250.0).abs() < 1e-12);
        let line = format!("Average rate:           {:.2} /kWh", bill.average_rate());
        assert!(bill.to_string().contains(&line));
    }

    #[test]
    fn average_rate_guards_zero_units() {
        let input = BillInput::new(Utility::TataPower, NetworkType::Direct, Category::Residential, 0.0);
        let bill = calculate_bill(&input).unwrap();
        assert!(bill.grand_total > 0.0, "fixed charge still billed");
        assert_eq!(bill.average_rate(), bill.grand_total);
        assert!(bill.average_rate().is_finite());
    }

    #[test]
    fn unbounded_slab_label() {
        let line = SlabLine {
            lower_bound: 500.0,
            upper_bound: f64::INFINITY,
            units: 1.0,
            rate: 1.0,
            cost: 1.0,
        };
        assert_eq!(slab_label(&line), "500+");
    }
}

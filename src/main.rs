//! Bill calculator entry point: CLI wiring, tariff loading, and output.

use std::path::Path;
use std::process;

use tracing::Level;

use mumbai_bill::bill::{BillInput, calculate_bill_with};
use mumbai_bill::cli::{CliOptions, parse_args, print_usage};
use mumbai_bill::config::TariffConfig;
use mumbai_bill::io::export::export_csv;
use mumbai_bill::tariff::{TariffKey, TariffRegistry};

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the tariff table: `--tariffs` file if given, otherwise the built-in table.
fn load_registry(path: Option<&Path>) -> TariffRegistry {
    let Some(path) = path else {
        return TariffRegistry::builtin();
    };
    let config = match TariffConfig::from_toml_file(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    match config.into_registry() {
        Ok(registry) => registry,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    }
}

fn print_tariffs(registry: &TariffRegistry) {
    println!("Tariff table {}", registry.version());
    for key in registry.keys() {
        println!("  {key}");
    }
}

fn build_input(cli: &CliOptions, key: TariffKey, units: f64) -> BillInput {
    let mut input = BillInput::new(key.utility, key.network, key.category, units)
        .with_solar_units(cli.solar_units)
        .with_sanctioned_load_kw(cli.load_kw)
        .with_recorded_max_demand_kw(cli.demand_kw)
        .with_phase(cli.phase);
    input.ppca_rate = cli.ppca_rate;
    input
}

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    init_tracing(cli.verbose);

    let registry = load_registry(cli.tariffs.as_deref());

    if cli.list_tariffs {
        print_tariffs(&registry);
        return;
    }

    if let Some(units) = cli.units {
        let bill = TariffKey::parse(&cli.utility, &cli.network, &cli.category)
            .and_then(|key| calculate_bill_with(&registry, &build_input(&cli, key, units)));
        let bill = match bill {
            Ok(bill) => bill,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        };

        println!("{bill}");

        if let Some(ref path) = cli.export {
            if let Err(e) = export_csv(&bill, path) {
                eprintln!("error: failed to write CSV: {e}");
                process::exit(1);
            }
            eprintln!("Bill breakdown written to {}", path.display());
        }
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(mumbai_bill::api::AppState { registry });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(mumbai_bill::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}

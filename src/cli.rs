//! Command-line argument parsing.
//!
//! Numeric values are parsed here; a malformed number is a usage error and
//! never reaches the calculation. Utility, network, and category labels are
//! passed through as text so an unrecognised combination is reported as an
//! unknown tariff.

use std::env;
use std::path::PathBuf;

use crate::tariff::Phase;

pub struct CliOptions {
    pub utility: String,
    pub network: String,
    pub category: String,
    pub units: Option<f64>,
    pub solar_units: f64,
    pub load_kw: f64,
    pub demand_kw: f64,
    pub phase: Phase,
    pub ppca_rate: Option<f64>,
    pub tariffs: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub list_tariffs: bool,
    pub verbose: bool,
    pub serve: bool,
    pub port: u16,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            utility: "tata".to_string(),
            network: "direct".to_string(),
            category: "residential".to_string(),
            units: None,
            solar_units: 0.0,
            load_kw: 0.0,
            demand_kw: 0.0,
            phase: Phase::SinglePhase,
            ppca_rate: None,
            tariffs: None,
            export: None,
            list_tariffs: false,
            verbose: false,
            serve: false,
            port: 3000,
        }
    }
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--utility" | "--network" | "--category" => {
                i += 1;
                let value = args.next_or_err(i, &format!("missing value for {flag}"))?;
                let slot = match flag {
                    "--utility" => &mut opts.utility,
                    "--network" => &mut opts.network,
                    _ => &mut opts.category,
                };
                *slot = value.to_string();
            }
            "--units" => {
                i += 1;
                opts.units = Some(parse_number(args, i, flag)?);
            }
            "--solar" => {
                i += 1;
                opts.solar_units = parse_number(args, i, flag)?;
            }
            "--load-kw" => {
                i += 1;
                opts.load_kw = parse_number(args, i, flag)?;
            }
            "--demand-kw" => {
                i += 1;
                opts.demand_kw = parse_number(args, i, flag)?;
            }
            "--ppca" => {
                i += 1;
                opts.ppca_rate = Some(parse_number(args, i, flag)?);
            }
            "--phase" => {
                i += 1;
                let value = args.next_or_err(
                    i,
                    "missing value for --phase (expected `single` or `three`)",
                )?;
                opts.phase = Phase::from_label(value).ok_or_else(|| {
                    format!("invalid value for --phase: `{value}` (expected `single` or `three`)")
                })?;
            }
            "--tariffs" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --tariffs (expected a TOML file path)",
                )?;
                if opts.tariffs.replace(PathBuf::from(path)).is_some() {
                    return Err("--tariffs provided more than once".to_string());
                }
            }
            "--export" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --export (expected a file path)")?;
                if opts.export.replace(PathBuf::from(path)).is_some() {
                    return Err("--export provided more than once".to_string());
                }
            }
            "--list-tariffs" => opts.list_tariffs = true,
            "--verbose" | "-v" => opts.verbose = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = value
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{value}\" is not a valid u16"))?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.units.is_none() && !opts.list_tariffs && !opts.serve {
        return Err("missing required argument --units <kWh>".to_string());
    }
    if opts.export.is_some() && opts.units.is_none() {
        return Err("--export requires --units".to_string());
    }

    Ok(opts)
}

fn parse_number(args: &[String], index: usize, flag: &str) -> Result<f64, String> {
    let raw = args.next_or_err(index, &format!("missing value for {flag} (expected a number)"))?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("{flag} value \"{raw}\" is not a number"))?;
    if !value.is_finite() {
        return Err(format!("{flag} value \"{raw}\" must be finite"));
    }
    Ok(value)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("mumbai-bill: Mumbai electricity bill calculator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  mumbai-bill --units <kWh> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --utility <tata|adani>               Distribution licensee (default: tata)");
    eprintln!("  --network <direct|welcome>           Connection network (default: direct)");
    eprintln!("  --category <residential|commercial>  Consumer category (default: residential)");
    eprintln!("  --units <kWh>                        Metered units for the month");
    eprintln!("  --solar <kWh>                        Solar units generated");
    eprintln!("  --load-kw <kW>                       Sanctioned load");
    eprintln!("  --demand-kw <kW>                     Recorded maximum demand (commercial)");
    eprintln!("  --phase <single|three>               Supply phase (default: single)");
    eprintln!("  --ppca <rate>                        This month's PPCA rate (INR/kWh)");
    eprintln!("  --tariffs <path>                     Load tariff table from TOML");
    eprintln!("  --export <path>                      Write bill breakdown to CSV");
    eprintln!("  --list-tariffs                       List registered tariffs and exit");
    eprintln!("  --verbose                            Log calculation stages to stderr");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                              Start REST API server");
        eprintln!("  --port <u16>                         API server port (default: 3000)");
    }
    eprintln!("  --help                               Show this help message");
}

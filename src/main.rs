//! sheetcalc - command-line front-end for the formula spreadsheet

mod config;
mod error;

use config::Config;
use error::CliError;
use log::{LevelFilter, debug};
use sheetcalc_core::{CellValue, SaveOptions, Spreadsheet};
use sheetcalc_engine::engine::format_number_with_precision;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: sheetcalc [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Spreadsheet file to open (.json); created on save if missing");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <CELL=CONTENT>  Set a cell (can be repeated)");
    eprintln!("  -g, --get <CELL>          Print a cell's value (can be repeated)");
    eprintln!("  -l, --list                Print every non-empty cell");
    eprintln!("  -e, --eval <FORMULA>      Evaluate a formula against the sheet (can be repeated)");
    eprintln!("  -o, --output <FILE>       Save to FILE");
    eprintln!("  --save                    Save back to [FILE]");
    eprintln!("  --config <PATH>           Load settings from a TOML file");
    eprintln!("  --no-config               Ignore any config file");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    file: Option<PathBuf>,
    sets: Vec<(String, String)>,
    gets: Vec<String>,
    evals: Vec<String>,
    list: bool,
    output: Option<PathBuf>,
    save: bool,
    config_file: Option<PathBuf>,
    no_config: bool,
}

impl Options {
    /// Where to save, if anywhere.
    fn save_target(&self) -> error::Result<Option<PathBuf>> {
        match (&self.output, self.save, &self.file) {
            (Some(out), _, _) => Ok(Some(out.clone())),
            (None, true, Some(file)) => Ok(Some(file.clone())),
            (None, true, None) => Err(CliError::NothingToSave),
            (None, false, _) => Ok(None),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
}

fn parse_args(args: &[String]) -> error::Result<Command> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "-s" | "--set" => {
                let value = take_value(args, &mut i, "--set")?;
                let (cell, content) = value
                    .split_once('=')
                    .ok_or_else(|| CliError::BadAssignment(value.to_string()))?;
                options.sets.push((cell.trim().to_string(), content.to_string()));
            }
            "-g" | "--get" => options.gets.push(take_value(args, &mut i, "--get")?.to_string()),
            "-e" | "--eval" => options.evals.push(take_value(args, &mut i, "--eval")?.to_string()),
            "-l" | "--list" => options.list = true,
            "-o" | "--output" => {
                options.output = Some(PathBuf::from(take_value(args, &mut i, "--output")?));
            }
            "--save" => options.save = true,
            "--config" => {
                options.config_file = Some(PathBuf::from(take_value(args, &mut i, "--config")?));
            }
            "--no-config" => options.no_config = true,
            _ if arg.starts_with('-') => return Err(CliError::UnknownOption(arg.to_string())),
            _ => {
                if options.file.is_some() {
                    return Err(CliError::UnexpectedArgument(arg.to_string()));
                }
                options.file = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }
    Ok(Command::Run(options))
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> error::Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

fn init_logging(level: Option<LevelFilter>) {
    env_logger::Builder::new()
        .filter_level(level.unwrap_or(LevelFilter::Warn))
        .parse_default_env()
        .init();
}

fn display_value(value: &CellValue, precision: usize) -> String {
    match value {
        CellValue::Number(n) => format_number_with_precision(*n, precision),
        other => other.to_string(),
    }
}

fn run(options: &Options, config: &Config) -> anyhow::Result<()> {
    let save_target = options.save_target()?;

    let mut sheet = match &options.file {
        Some(path) if path.exists() => Spreadsheet::open(path)?,
        Some(path) => {
            debug!("{} does not exist, starting an empty sheet", path.display());
            Spreadsheet::new()
        }
        None => Spreadsheet::new(),
    };

    for (cell, content) in &options.sets {
        let order = sheet.set_contents_of_cell(cell, content)?;
        let names: Vec<&str> = order.iter().map(|name| name.as_str()).collect();
        println!("updated: {}", names.join(", "));
    }

    for formula in &options.evals {
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        let value = sheet.evaluate(formula)?;
        println!("{}", display_value(&value, config.precision));
    }

    for cell in &options.gets {
        let value = sheet.get_cell_value(cell)?;
        println!("{}: {}", cell.to_ascii_uppercase(), display_value(value, config.precision));
    }

    if options.list {
        for (name, cell) in sheet.cells() {
            println!(
                "{}: {} => {}",
                name,
                cell.to_input_string(),
                display_value(&cell.value, config.precision)
            );
        }
    }

    if let Some(path) = save_target {
        sheet.save_with(&path, SaveOptions { pretty: config.pretty })?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let config = if options.no_config {
        Config::default()
    } else {
        let (config, warnings) = config::load_config(options.config_file.as_deref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        config
    };
    init_logging(config.log_level);

    if let Err(e) = run(&options, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

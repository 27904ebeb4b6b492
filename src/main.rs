// Command line front end: reads OCR text and reports the TD1 MRZ verdict

use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mrzcheck::{
    models::MrzStatus,
    validation::{dni, ExpiryValidationResult, ExpiryValidator},
    DocumentValidator, MrzError, ValidatorConfig, Verdict,
};

#[derive(Parser)]
#[command(name = "mrzcheck", version, about = "Validate the TD1 machine readable zone of an ID card from OCR text")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the MRZ found in a block of OCR text
    Check {
        /// File holding the OCR text; reads stdin when omitted or "-"
        input: Option<PathBuf>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,

        /// JSON file with validator settings
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Keep the longest-first line order even if it fails the grammar
        #[arg(long)]
        no_reorder: bool,
    },
    /// Check the control letter of a Spanish DNI number
    Dni { value: String },
}

#[derive(Serialize)]
struct Report<'a> {
    status: MrzStatus,
    advice: &'a str,
    verdict: &'a Verdict,
    expiry: Option<ExpiryValidationResult>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Check {
            input,
            json,
            config,
            no_reorder,
        } => run_check(input.as_deref(), json, config.as_deref(), no_reorder),
        Command::Dni { value } => Ok(run_dni(&value)),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(3)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_check(
    input: Option<&Path>,
    json: bool,
    config_path: Option<&Path>,
    no_reorder: bool,
) -> Result<ExitCode, MrzError> {
    let mut config = match config_path {
        Some(path) => ValidatorConfig::from_file(path)?,
        None => ValidatorConfig::default(),
    };
    if no_reorder {
        config.reconcile_line_order = false;
    }

    let text = read_input(input)?;
    let verdict = DocumentValidator::with_config(config).validate(&text);
    let status = verdict.status();

    let today = Local::now().date_naive();
    let expiry = verdict
        .fields()
        .map(|fields| ExpiryValidator::validate(fields, today));

    if json {
        let report = Report {
            status,
            advice: status.advice(),
            verdict: &verdict,
            expiry,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_detailed_report(&verdict, expiry.as_ref());
    }

    Ok(ExitCode::from(match status {
        MrzStatus::Verified => 0,
        MrzStatus::CompositeMismatch | MrzStatus::CheckDigitMismatch => 1,
        MrzStatus::Invalid => 2,
    }))
}

fn read_input(input: Option<&Path>) -> Result<String, MrzError> {
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASSED"
    } else {
        "FAILED"
    }
}

// Function to print a detailed validation report
fn print_detailed_report(verdict: &Verdict, expiry: Option<&ExpiryValidationResult>) {
    println!("\n===============================================");
    println!("         TD1 MRZ VALIDATION REPORT");
    println!("===============================================\n");

    println!("MRZ LINES:");
    for line in verdict.lines().lines() {
        println!("  {}", line);
    }

    match verdict {
        Verdict::StructuralFailure { reason, violation, .. } => {
            println!("\nSTRUCTURE: {}", reason);
            println!("  {}", violation);
        }
        Verdict::Verified { fields, checks, .. } => {
            println!("\nDOCUMENT INFORMATION:");
            println!("  Document Type: {}", fields.document_type);
            println!("  Issuer: {}", fields.issuer);
            println!("  Document Number: {}", fields.document_number_clean());
            println!("  Surnames: {}", fields.surnames);
            println!("  Given Names: {}", fields.given_names);
            println!("  Nationality: {}", fields.nationality);
            println!("  Date of Birth: {}", fields.birth_date);
            println!("  Sex: {}", fields.sex.marker());
            println!("  Date of Expiry: {}", fields.expiry_date);

            println!("\nCHECK DIGITS:");
            println!("  1. Document Number: {}", pass_fail(checks.document_ok));
            println!("  2. Date of Birth: {}", pass_fail(checks.birth_ok));
            println!("  3. Date of Expiry: {}", pass_fail(checks.expiry_ok));
            println!("  4. Composite: {}", pass_fail(checks.composite_ok));
        }
    }

    if let Some(expiry) = expiry {
        println!("\nDATES: {}", pass_fail(expiry.is_valid));
        for issue in &expiry.issues {
            println!("  - {}", issue);
        }
    }

    let status = verdict.status();
    println!("\nMRZ status: {}", status);
    println!("{}", status.advice());
}

fn run_dni(value: &str) -> ExitCode {
    let normalized = dni::normalize_dni(value);
    if dni::is_valid_spanish_dni(&normalized) {
        println!("{}: valid DNI", normalized);
        ExitCode::SUCCESS
    } else {
        println!("{}: invalid DNI format or control letter", normalized);
        ExitCode::from(1)
    }
}

//! WhatsApp template CLI
//!
//! Usage:
//!   wa-templates [OPTIONS] <COMMAND> [FILE]
//!
//! Commands:
//!   validate  Validate a template for a wizard step
//!   preview   Render a template preview
//!   payload   Print the submission payload
//!
//! Options:
//!   -c, --config <FILE>  Validation limits and languages (TOML format)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wa_templates::{
    compose, render_text, to_payload, EngineConfig, PreviewValues, Template, TextConfig,
    ValidationResult, Validator, WizardStep,
};

#[derive(Parser)]
#[command(name = "wa-templates")]
#[command(about = "Validate and preview WhatsApp message templates")]
struct Cli {
    /// Validation limits and languages (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a template for a wizard step
    Validate {
        /// Template JSON file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Wizard step: 1 details, 2 content, 3 buttons, 4 review
        #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=4))]
        step: u8,

        /// Print the validation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a template preview
    Preview {
        /// Template JSON file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Body variable value, in order; repeat for each variable
        #[arg(short, long = "value")]
        values: Vec<String>,

        /// Header variable value
        #[arg(long)]
        header_value: Option<String>,

        /// Style output with ANSI escape codes
        #[arg(long)]
        ansi: bool,

        /// Print the preview tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the submission payload of a template that passes review
    Payload {
        /// Template JSON file (reads from stdin if not provided)
        input: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    let validator = Validator::new(config);

    match cli.command {
        Command::Validate { input, step, json } => {
            let template = load(input.as_deref());
            let step = match WizardStep::try_from(step) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let result = validator.validate(step, &template);
            if json {
                print_json(&result);
            } else {
                report(&template, &result);
                if result.valid {
                    println!("{} ok", step);
                }
            }
            if !result.valid {
                std::process::exit(1);
            }
        }
        Command::Preview {
            input,
            values,
            header_value,
            ansi,
            json,
        } => {
            let template = load(input.as_deref());
            let values = PreviewValues::new()
                .with_header(header_value)
                .with_body(values);
            let preview = compose(&template, &values);
            if json {
                print_json(&preview);
            } else {
                println!(
                    "{}",
                    render_text(&preview, &TextConfig::new().with_ansi(ansi))
                );
            }
        }
        Command::Payload { input } => {
            let template = load(input.as_deref());
            let result = validator.validate(WizardStep::Review, &template);
            report(&template, &result);
            if !result.valid {
                std::process::exit(1);
            }
            print_json(&to_payload(&template));
        }
    }
}

/// Read and parse a template from a file or stdin, exiting on failure
fn load(input: Option<&Path>) -> Template {
    let source = match input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match Template::from_json(&source) {
        Ok(template) => template,
        Err(e) => {
            eprintln!("Error: invalid template JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print every issue to stderr, with source context where the field has text
fn report(template: &Template, result: &ValidationResult) {
    for (severity, issue) in result.issues() {
        match template.field_text(&issue.field) {
            Some(text) if !text.is_empty() => {
                eprint!("{}", issue.format(severity, text, &issue.field))
            }
            _ => eprintln!("{}: {}", severity, issue),
        }
    }
    if !result.valid {
        eprintln!(
            "{} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

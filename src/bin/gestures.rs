//! Gestures CLI - Command-line interface for campus-gestures
//!
//! Commands:
//! - classify: Replay a captured pointer trace and report recognized gestures
//! - run: Process streaming trace events from stdin (streaming mode)
//! - validate: Validate pointer trace schema
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use campus_gestures::engine::GestureEngine;
use campus_gestures::schema::{TraceAdapter, TraceEvent, TRACE_SCHEMA_VERSION};
use campus_gestures::{RecognizedGesture, ENGINE_VERSION, PRODUCER_NAME, REPORT_SCHEMA_VERSION};

/// Gestures - On-device pointer gesture recognition
#[derive(Parser)]
#[command(name = "gestures")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Recognize swipe and double-tap gestures in pointer traces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a captured pointer trace and report recognized gestures
    Classify {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Process streaming trace events from stdin (streaming mode)
    Run {
        /// Flush output after each recognized gesture
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Validate pointer trace schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one trace event per line)
    Ndjson,
    /// JSON array of trace events
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one recognized gesture per line)
    Ndjson,
    /// Full gesture report as JSON
    Json,
    /// Full gesture report, pretty-printed
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (pointer.trace_event.v1)
    Input,
    /// Output schema (gesture.report.v1)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GesturesCliError> {
    match cli.command {
        Commands::Classify {
            input,
            output,
            input_format,
            output_format,
        } => cmd_classify(&input, &output, input_format, output_format),

        Commands::Run { flush } => cmd_run(flush),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_classify(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), GesturesCliError> {
    let input_data = read_input(input)?;

    let events = match input_format {
        InputFormat::Ndjson => TraceAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => TraceAdapter::parse_array(&input_data)?,
    };

    if events.is_empty() {
        return Err(GesturesCliError::NoEvents);
    }

    let mut engine = GestureEngine::new();
    let recognized = engine.replay(&events)?;

    let output_data = match output_format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for gesture in &recognized {
                lines.push(serde_json::to_string(gesture)?);
            }
            lines.join("\n") + "\n"
        }
        OutputFormat::Json => engine.report(recognized).to_json()?,
        OutputFormat::JsonPretty => engine.report(recognized).to_json_pretty()?,
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(flush: bool) -> Result<(), GesturesCliError> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Reading trace events from a TTY; pipe NDJSON input (Ctrl-D to finish)");
    }

    let mut engine = GestureEngine::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut previous: Option<TraceEvent> = None;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let event: TraceEvent = serde_json::from_str(trimmed).map_err(|e| {
            GesturesCliError::ParseError(format!("Failed to parse trace event: {}", e))
        })?;
        event.validate()?;

        // Ordering is the capture layer's contract; enforce it at the door.
        if let Some(prev) = &previous {
            if event.timestamp < prev.timestamp {
                return Err(GesturesCliError::ParseError(format!(
                    "Trace events out of order at {}",
                    event.timestamp
                )));
            }
        }

        let gesture = match event.phase {
            campus_gestures::PointerPhase::Down => {
                engine.pointer_down(event.source, event.x, event.y, event.timestamp_ms());
                None
            }
            campus_gestures::PointerPhase::Up => {
                engine.pointer_up(event.source, event.x, event.y, event.timestamp_ms())
            }
        };

        if let Some(gesture) = gesture {
            let recognized = RecognizedGesture {
                gesture,
                source: event.source,
                detected_at: event.timestamp,
            };
            writeln!(stdout, "{}", serde_json::to_string(&recognized)?)?;
            if flush {
                stdout.flush()?;
            }
        }

        previous = Some(event);
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), GesturesCliError> {
    let input_data = read_input(input)?;

    let events = match input_format {
        InputFormat::Ndjson => TraceAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => TraceAdapter::parse_array(&input_data)?,
    };

    let mut errors: Vec<ValidationErrorDetail> = TraceAdapter::validate_events(&events)
        .iter()
        .map(|f| ValidationErrorDetail {
            index: Some(f.index),
            error: f.error.to_string(),
        })
        .collect();

    if let Err(e) = TraceAdapter::check_order(&events) {
        errors.push(ValidationErrorDetail {
            index: None,
            error: e.to_string(),
        });
    }

    let report = ValidationReport {
        total_events: events.len(),
        invalid_events: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total events:   {}", report.total_events);
        println!("Invalid events: {}", report.invalid_events);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                match err.index {
                    Some(index) => println!("  - Event {}: {}", index, err.error),
                    None => println!("  - Trace: {}", err.error),
                }
            }
        }
    }

    if report.invalid_events > 0 {
        Err(GesturesCliError::ValidationFailed(report.invalid_events))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), GesturesCliError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {}", TRACE_SCHEMA_VERSION);
            println!();
            println!("One trace event per record:");
            println!();
            println!("- timestamp: RFC3339 capture time");
            println!("- source: touch | mouse");
            println!("- phase: down (press / touch-start) | up (release / touch-end)");
            println!("- x, y: position in px, consistent units across a trace");
            println!();
            println!("Timestamps must be non-decreasing in delivery order.");
        }
        SchemaType::Output => {
            println!("Output Schema: {}", REPORT_SCHEMA_VERSION);
            println!();
            println!("Gesture report contains:");
            println!();
            println!("- schema_version: {}", REPORT_SCHEMA_VERSION);
            println!(
                "- producer: {{ name: {}, version: {}, instance_id }}",
                PRODUCER_NAME, ENGINE_VERSION
            );
            let variants: Vec<&str> = campus_gestures::GestureEvent::ALL
                .iter()
                .map(|g| g.as_str())
                .collect();
            println!("- gestures: array of recognized gestures:");
            println!("  - gesture: {}", variants.join(" | "));
            println!("  - source: touch | mouse");
            println!("  - detected_at: capture time of the completing release event");
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, GesturesCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

// Error types

#[derive(Debug)]
enum GesturesCliError {
    Io(io::Error),
    Engine(campus_gestures::GestureError),
    Json(serde_json::Error),
    NoEvents,
    ValidationFailed(usize),
    ParseError(String),
}

impl From<io::Error> for GesturesCliError {
    fn from(e: io::Error) -> Self {
        GesturesCliError::Io(e)
    }
}

impl From<campus_gestures::GestureError> for GesturesCliError {
    fn from(e: campus_gestures::GestureError) -> Self {
        GesturesCliError::Engine(e)
    }
}

impl From<serde_json::Error> for GesturesCliError {
    fn from(e: serde_json::Error) -> Self {
        GesturesCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<GesturesCliError> for CliError {
    fn from(e: GesturesCliError) -> Self {
        match e {
            GesturesCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            GesturesCliError::Engine(e) => CliError {
                code: "TRACE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches {}", TRACE_SCHEMA_VERSION)),
            },
            GesturesCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            GesturesCliError::NoEvents => CliError {
                code: "NO_EVENTS".to_string(),
                message: "No trace events found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            GesturesCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} trace events failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            GesturesCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_events: usize,
    invalid_events: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    /// Event position, or None for whole-trace failures (ordering)
    index: Option<usize>,
    error: String,
}

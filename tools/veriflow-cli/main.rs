use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use veriflow::prelude::*;

/// Build, inspect and normalize identity workflow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the default identity verification workflow
    Template {
        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Workflow name stored in the metadata
        #[arg(long)]
        name: Option<String>,
        /// Workflow version stored in the metadata
        #[arg(long = "workflow-version")]
        workflow_version: Option<String>,
        /// Canvas size as WIDTHxHEIGHT, derived from the blocks when omitted
        #[arg(long)]
        canvas: Option<String>,
    },
    /// Re-export a document, dropping dangling connections and reporting integrity issues
    Check {
        /// Path to the workflow document JSON file
        document_path: String,
        /// Write the normalized document to this file
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Template {
            output,
            name,
            workflow_version,
            canvas,
        } => run_template(output, name, workflow_version, canvas),
        Command::Check {
            document_path,
            output,
        } => run_check(document_path, output),
    }
}

fn run_template(
    output: Option<String>,
    name: Option<String>,
    workflow_version: Option<String>,
    canvas: Option<String>,
) {
    let workflow = identity_workflow()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to build template: {}", e)));

    let mut builder = Exporter::builder();
    if let Some(name) = name {
        builder = builder.with_name(name);
    }
    if let Some(version) = workflow_version {
        builder = builder.with_version(version);
    }
    if let Some(canvas) = canvas {
        let (width, height) = parse_canvas(&canvas).unwrap_or_else(|| {
            exit_with_error(&format!(
                "Invalid canvas size '{}', expected WIDTHxHEIGHT",
                canvas
            ))
        });
        builder = builder.with_canvas_size(width, height);
    }

    let outcome = workflow.export(&builder.build());
    emit(&outcome.document, output.as_deref());
}

fn run_check(document_path: String, output: Option<String>) {
    let document = WorkflowDocument::from_file(&document_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load document: {}", e)));

    let metadata = document.metadata.clone();
    let canvas = document.settings.canvas_size;
    let workflow = Workflow::from_document(document)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid document: {}", e)));

    let exporter = Exporter::builder()
        .with_name(metadata.name)
        .with_version(metadata.version)
        .with_description(metadata.description)
        .with_timestamp(metadata.created_at)
        .with_canvas_size(canvas.width, canvas.height)
        .build();
    let outcome = workflow.export(&exporter);

    println!("Blocks:      {}", outcome.document.blocks.len());
    println!("Connections: {}", outcome.document.connections.len());
    let configured = outcome
        .document
        .blocks
        .iter()
        .filter(|b| b.fields.is_some())
        .count();
    println!("Collection blocks with fields: {}", configured);

    if outcome.is_clean() {
        println!("No integrity issues found.");
    } else {
        println!("\n--- Integrity Warnings ---");
        for warning in &outcome.warnings {
            println!("  -> {}", warning);
        }
    }

    if let Some(path) = output {
        emit(&outcome.document, Some(&path));
    }
}

fn emit(document: &WorkflowDocument, output: Option<&str>) {
    match output {
        Some(path) => {
            document
                .save(path)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write document: {}", e)));
            eprintln!("Wrote workflow document to '{}'", path);
        }
        None => {
            let json = document
                .to_json_pretty()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize: {}", e)));
            println!("{}", json);
        }
    }
}

fn parse_canvas(raw: &str) -> Option<(f64, f64)> {
    let (width, height) = raw.split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

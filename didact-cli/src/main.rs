//! Didact CLI
//!
//! Renders an element literal into an in-memory document, one idle slice
//! at a time, and prints the resulting tree.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use didact_common::warning::clear_warnings;
use didact_core::{
    Element, IdleLoop, Scheduler, SchedulerConfig, create_element, parse_element, props,
};
use didact_dom::serialize::{print_tree, snapshot, to_html};
use didact_dom::{DomTree, HostDocument, NodeId, Value};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Render element literals incrementally into an in-memory document
#[derive(Parser, Debug)]
#[command(name = "didact")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render the built-in hello world tree
    didact

    # Render literals from files, each into a fresh document
    didact didact-cli/res/hello.json didact-cli/res/list.json

    # Inline literal, emitted as HTML
    didact --literal '["p", null, "hi"]' --format html

    # Watch the loop yield every slice
    DIDACT_LOG=didact_core=debug didact --slice-ms 0 --threshold-ms 0
"#)]
struct Cli {
    /// Paths to JSON element literals
    #[arg(value_name = "FILE")]
    paths: Vec<PathBuf>,

    /// Parse a JSON element literal directly instead of files
    #[arg(short, long, value_name = "JSON", conflicts_with = "paths")]
    literal: Option<String>,

    /// Length of each idle slice in milliseconds
    #[arg(long, default_value = "16")]
    slice_ms: u64,

    /// Yield once less than this many milliseconds remain in a slice
    #[arg(long, default_value = "1")]
    threshold_ms: u64,

    /// Give up after this many idle slices
    #[arg(long, default_value = "10000")]
    max_slices: usize,

    /// How to print the rendered document
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented node listing
    Tree,
    /// Serialized markup
    Html,
    /// JSON snapshot
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(source) = &cli.literal {
        let element = parse_element(source).context("invalid --literal")?;
        return render(&cli, "--literal", element);
    }
    if cli.paths.is_empty() {
        return render(&cli, "hello world", hello_world());
    }
    for path in &cli.paths {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let element = parse_element(&source)
            .with_context(|| format!("invalid literal in {}", path.display()))?;
        render(&cli, &path.display().to_string(), element)?;
    }
    Ok(())
}

/// Mount `element` into a fresh `<div id="root">` and print the result.
fn render(cli: &Cli, label: &str, element: Element) -> Result<()> {
    // Each document reports its own ignored input.
    clear_warnings();

    let mut doc = DomTree::new();
    let container = doc.create_element("div")?;
    doc.set_property(container, "id", &Value::from("root"))?;
    doc.append_child(NodeId::ROOT, container)?;

    let mut scheduler = Scheduler::new(SchedulerConfig {
        yield_threshold: Duration::from_millis(cli.threshold_ms),
    });
    let mut idle = IdleLoop::new();
    scheduler.render(element, container, &mut idle);

    let summary = idle.run_until_idle(
        &mut scheduler,
        &mut doc,
        Duration::from_millis(cli.slice_ms),
        cli.max_slices,
    )?;
    tracing::debug!(label, ?summary, stats = ?scheduler.stats(), "render finished");
    if !summary.completed {
        bail!(
            "{label}: render did not finish within {} slices ({} units done)",
            cli.max_slices,
            summary.units
        );
    }

    println!("{}", format!("=== Render: {label} ===").bold().cyan());
    println!(
        "{} units in {} slices, {} nodes",
        summary.units.green(),
        summary.slices.green(),
        doc.len().green()
    );

    println!("\n{}", "=== Document ===".bold().cyan());
    match cli.format {
        Format::Tree => print!("{}", print_tree(&doc, container)),
        Format::Html => println!("{}", to_html(&doc, container)),
        Format::Json => {
            let snap = snapshot(&doc, container).context("container vanished")?;
            println!("{}", serde_json::to_string_pretty(&snap)?);
        }
    }
    println!();
    Ok(())
}

/// `DIDACT_LOG` wins; otherwise `-v` picks the level.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("DIDACT_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn hello_world() -> Element {
    create_element(
        "div",
        props! {},
        [
            create_element("h1", props! {}, ["Hello World"]),
            create_element("h2", props! {}, ["from Didact"]),
        ],
    )
}

use crate::adapters::artifacts::artifact_source_for;
use crate::adapters::classfile::FsClassSource;
use crate::adapters::output::{OutputFormat, output_path, remove_document, write_document};
use crate::app::dto::GraphSummary;
use crate::app::pipeline::{Pipeline, RunReport};
use crate::domain::filter::NameFilter;
use crate::domain::ports::{ArtifactSource, NoArtifacts};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Extract a used-by reference graph from compiled classes and write one
/// viewer-ready document per granularity (class and method).
#[derive(Debug, Parser)]
#[command(name = "calltrack", author, version)]
pub struct Cli {
    /// A .jar, a .class file or a directory containing class files
    pub input: PathBuf,

    /// Only references to types whose name contains this pattern are kept
    pub pattern: String,

    /// Artifact descriptions (.xml or .json) linked to class ids
    #[arg(long, value_name = "FILE")]
    pub class_artifacts: Option<PathBuf>,

    /// Artifact descriptions (.xml or .json) linked to method ids
    #[arg(long, value_name = "FILE")]
    pub method_artifacts: Option<PathBuf>,

    /// Directory the documents are written to
    #[arg(short, long, default_value = "view")]
    pub output_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print the summary without writing documents
    #[arg(long)]
    pub dry_run: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> String {
        let level = match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        if self.quiet {
            level.to_string()
        } else {
            format!("warn,calltrack={level}")
        }
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            input: self.input.clone(),
            pattern: self.pattern.clone(),
            class_artifacts: self.class_artifacts.clone(),
            method_artifacts: self.method_artifacts.clone(),
            output_dir: self.output_dir.clone(),
            format: self.format,
            dry_run: self.dry_run,
        }
    }
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub pattern: String,
    pub class_artifacts: Option<PathBuf>,
    pub method_artifacts: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub dry_run: bool,
}

fn artifact_source(path: Option<&Path>) -> Box<dyn ArtifactSource> {
    match path {
        Some(path) => artifact_source_for(path),
        None => Box::new(NoArtifacts),
    }
}

/// Execute a run and write its documents. Returns whether every graph succeeded.
pub fn run(config: &RunConfig) -> Result<bool> {
    let classes = FsClassSource::new(&config.input);
    let class_artifacts = artifact_source(config.class_artifacts.as_deref());
    let method_artifacts = artifact_source(config.method_artifacts.as_deref());

    println!("Loading classes from: {}", config.input.display());
    let pipeline = Pipeline::new(
        &classes,
        &*class_artifacts,
        &*method_artifacts,
        NameFilter::new(&config.pattern),
    );
    let report = pipeline.run()?;
    print_summary(&report);

    for graph in &report.graphs {
        let name = graph.granularity.as_str();
        let path = output_path(&config.output_dir, graph.granularity, config.format);
        match &graph.outcome {
            Ok(document) if !config.dry_run => {
                write_document(&path, document, config.format)?;
                println!("Wrote {} graph to {}", name, path.display());
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {} graph not written: {}", name, e);
                if !config.dry_run && remove_document(&path)? {
                    eprintln!("Removed stale {}", path.display());
                }
            }
        }
    }

    Ok(report.is_complete())
}

fn print_summary(report: &RunReport) {
    let summary = &report.summary;
    println!("Run Summary:");
    println!("  Classes decoded: {}", summary.classes_decoded);
    println!("  Classes skipped: {}", summary.classes_skipped);
    for failure in &report.skipped {
        println!("    {}", failure);
    }
    print_graph_summary("Class graph", summary.class_graph.as_ref());
    print_graph_summary("Method graph", summary.method_graph.as_ref());
}

fn print_graph_summary(name: &str, summary: Option<&GraphSummary>) {
    match summary {
        Some(s) => {
            println!("  {}:", name);
            println!("    Tuples: {}", s.tuples);
            println!("    Nodes: {} ({} reached)", s.nodes, s.reached);
            println!("    Edges: {}", s.edges);
            println!("    Artifacts: {}", s.artifacts);
            println!("    Shown: {} nodes, {} edges", s.visual_nodes, s.visual_edges);
        }
        None => println!("  {}: failed", name),
    }
}

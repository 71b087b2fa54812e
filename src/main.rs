use anyhow::{Context, Result};
use clap::Parser;
use javadoc_index::cli::{Cli, Commands, OutputFormat};
use javadoc_index::config::{resolve_log_level, resolve_source_roots};
use javadoc_index::discover::java_sources;
use javadoc_index::documentation::{DocEntry, SearchableDocumentation};
use javadoc_index::extractor::JavaDocExtractor;
use javadoc_index::logging::{self, TracingLog};
use javadoc_index::render::{DefaultJavaDocRenderer, JavaDocRenderer};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&resolve_log_level(&cli));

    match cli.command {
        Commands::Index {
            sources,
            format,
            output,
        } => {
            let index = build_index(&sources)?;
            let content = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&index)?,
                OutputFormat::Text => render_index(&index),
            };
            write_output(&content, output.as_deref())?;
        }
        Commands::Paths { sources } => {
            let index = build_index(&sources)?;
            let mut content = String::new();
            for path in index.paths() {
                content.push_str(path);
                content.push('\n');
            }
            write_output(&content, None)?;
        }
        Commands::Show {
            path,
            sources,
            format,
        } => {
            let index = build_index(&sources)?;
            let entry = index
                .get(&path)
                .with_context(|| format!("No JavaDoc indexed for path: {path}"))?;
            let content = match format {
                OutputFormat::Json => serde_json::to_string_pretty(entry)?,
                OutputFormat::Text => render_entry(entry),
            };
            write_output(&content, None)?;
        }
    }

    Ok(())
}

fn build_index(sources: &[PathBuf]) -> Result<SearchableDocumentation> {
    let start = Instant::now();
    let roots = resolve_source_roots(sources)?;
    let files = java_sources(&roots).context("Failed to collect java sources")?;

    let log = TracingLog;
    let mut extractor = JavaDocExtractor::new(&log);
    extractor.add_source_files(files);
    let index = extractor.process();

    tracing::info!(
        entries = index.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Indexed java sources"
    );
    Ok(index)
}

fn render_index(index: &SearchableDocumentation) -> String {
    index.iter().map(render_entry).collect()
}

/// The path on its own line, then the rendered documentation indented.
fn render_entry(entry: &DocEntry) -> String {
    let body = DefaultJavaDocRenderer.render(&entry.javadoc, &entry.location);
    let mut out = format!("{}\n", entry.path);
    if body.is_empty() {
        out.push_str(&format!("  {}\n", entry.javadoc.comment()));
    }
    for line in body.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        print!("{content}");
        if !content.is_empty() && !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

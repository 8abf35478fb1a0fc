use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use originality::{OriginalityConfig, SimilarityReport};
use tracing_subscriber::EnvFilter;

/// Estimate how much of a document overlaps with a reference corpus.
#[derive(Parser, Debug)]
#[command(name = "originality", version, about)]
struct Cli {
    /// Document to check
    query: PathBuf,

    /// Directory of reference documents (not searched recursively)
    corpus_dir: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Score and match corpus documents on all cores
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &cli.config {
        Some(path) => OriginalityConfig::from_file(path)?,
        None => OriginalityConfig::default(),
    };
    if cli.parallel {
        cfg = cfg.with_parallel(true);
    }

    let report =
        originality::build_similarity_report_with_config(&cli.query, &cli.corpus_dir, &cfg)?;

    match cli.format {
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
        OutputFormat::Text => print_summary(&report),
    }
    Ok(())
}

fn print_summary(report: &SimilarityReport) {
    println!("Document:         {}", report.query_id);
    println!("Corpus documents: {}", report.corpus_size);
    println!("Originality:      {:.2}%", report.originality_percent);
    println!("Plagiarism level: {}", report.plagiarism_level);
    if let Some(source) = &report.best_source {
        println!(
            "Closest source:   {source} ({:.2}%)",
            report.max_similarity * 100.0
        );
    }
    println!(
        "Matches:          {} (high {}, medium {}, low {})",
        report.matches.len(),
        report.band_counts.high,
        report.band_counts.medium,
        report.band_counts.low
    );
    for source in &report.top_sources {
        println!("  {:>4}  {}", source.match_count, source.display_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originality::CheckError;
    use std::ffi::OsStr;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_query_is_a_typed_not_found() {
        let dir = tempdir().unwrap();
        let query = dir.path().join("absent.txt");
        let cli = Cli::parse_from([
            OsStr::new("originality"),
            query.as_os_str(),
            dir.path().as_os_str(),
        ]);

        let err = run(&cli).unwrap_err();
        match err.downcast_ref::<CheckError>() {
            Some(CheckError::NotFound { path }) => assert_eq!(path, &query),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn report_runs_against_a_corpus() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("corpus");
        fs::create_dir(&corpus).unwrap();
        fs::write(corpus.join("a.txt"), "совершенно другой текст про погоду").unwrap();
        let query = dir.path().join("query.txt");
        fs::write(&query, "машинное обучение это интересно").unwrap();

        let cli = Cli::parse_from([
            OsStr::new("originality"),
            query.as_os_str(),
            corpus.as_os_str(),
            OsStr::new("--format"),
            OsStr::new("json"),
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        run(&cli).unwrap();
    }
}

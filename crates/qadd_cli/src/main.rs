//! QADD CLI
//!
//! # Usage
//!
//! - `qadd` - run everything (hello, adder A=1 B=1, full verification)
//! - `qadd --only hello` - superposition demo
//! - `qadd --only adder --a 1 --b 0` - one half-adder run
//! - `qadd --only test --format json` - full verification, JSON report
//! - `qadd --thread` - print the explanatory notes

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use qadd_backend::{Backend, SimulatorBackend, TimeoutBackend};
use qadd_core::{adder, half_adder_circuit, hello_circuit, Circuit, Counts, InputPair};
use qadd_verify::{majority_vote, ReportFormat, Reporter, TiePolicy, Verifier, VerifyConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const HISTOGRAM_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "qadd")]
#[command(about = "Reversible half-adder sampling and truth-table verification")]
#[command(version)]
struct Cli {
    /// Shots per circuit execution [default: 4096, or the config file's value]
    #[arg(long)]
    shots: Option<u64>,

    /// Output directory
    #[arg(long, default_value = "outputs")]
    out: PathBuf,

    /// Run only one part
    #[arg(long, value_enum, default_value_t = Only::All)]
    only: Only,

    /// Input A for the half-adder (0 or 1)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    a: i64,

    /// Input B for the half-adder (0 or 1)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    b: i64,

    /// Print the explanatory notes
    #[arg(long)]
    thread: bool,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Per-execution deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Verify the four input pairs concurrently
    #[arg(long)]
    parallel: bool,

    /// Reject tied majorities instead of taking the smallest bitstring
    #[arg(long)]
    strict_ties: bool,

    /// Verification config file (JSON); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format for the verification run
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Only {
    All,
    Hello,
    Adder,
    Test,
}

impl Only {
    fn includes(self, part: Only) -> bool {
        self == Only::All || self == part
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Markdown => ReportFormat::Markdown,
            Format::Json => ReportFormat::Json,
        }
    }
}

const NOTES: [&str; 5] = [
    "Every programming course opens with 'Hello World' and '1+1=2'. This tool runs \
     both on a sampled reversible circuit: a superposition demo and a half-adder, \
     each checked over many shots.",
    "Hello: a Hadamard on a zeroed wire, then a measurement. Over many shots the \
     outcomes split roughly evenly between 0 and 1.",
    "1+1=2: SUM is A XOR B, built from two CNOTs. CARRY is A AND B, built from one \
     Toffoli. With A=1 and B=1 the output (CARRY, SUM) is binary 10, decimal 2.",
    "No hardcoded answers: all four inputs 00, 01, 10 and 11 are sampled and the \
     majority outcome of each is compared with the arithmetic truth table.",
    "This makes no claim of computational advantage. It is a correctness baseline \
     on an ideal simulator; hardware noise is out of scope.",
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if config.verbose { "info" } else { "warn" }),
    )
    .init();

    if cli.thread {
        print_notes();
    }

    if cli.only.includes(Only::Hello) {
        run_hello(&config, &cli.out)?;
    }

    if cli.only.includes(Only::Adder) {
        run_adder(&config, cli.a, cli.b, &cli.out)?;
    }

    if cli.only.includes(Only::Test) {
        let passed = run_test(&config, cli.format.into(), &cli.out)?;
        if !passed {
            eprintln!("Verification FAILED");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Merge an optional config file with command-line flags
fn build_config(cli: &Cli) -> Result<VerifyConfig> {
    let mut config = match &cli.config {
        Some(path) => VerifyConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VerifyConfig::default(),
    };

    if let Some(shots) = cli.shots {
        config.shots = shots;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }
    if cli.parallel {
        config.parallel = true;
    }
    if cli.strict_ties {
        config.tie_policy = TiePolicy::Reject;
    }
    if cli.verbose {
        config.verbose = true;
    }

    config.validate()?;
    Ok(config)
}

fn simulator(config: &VerifyConfig, num_wires: usize) -> SimulatorBackend {
    SimulatorBackend::ideal(num_wires)
        .with_seed_opt(config.seed)
        .with_max_shots(config.max_shots)
}

/// Simulator honoring the configured deadline
fn sampler(config: &VerifyConfig, num_wires: usize) -> Arc<dyn Backend> {
    let backend: Arc<dyn Backend> = Arc::new(simulator(config, num_wires));
    match config.timeout() {
        Some(timeout) => Arc::new(TimeoutBackend::new(backend, timeout)),
        None => backend,
    }
}

fn run_hello(config: &VerifyConfig, out: &Path) -> Result<()> {
    let circuit = hello_circuit();
    let result = sampler(config, circuit.num_wires()).execute(&circuit, config.shots)?;

    println!("\n[Hello] shots={}", config.shots);
    print_counts(&result.counts);

    let path = write_qasm(out, "hello_circuit.qasm", &circuit)?;
    println!("Saved: {}", path.display());
    Ok(())
}

fn run_adder(config: &VerifyConfig, a: i64, b: i64, out: &Path) -> Result<()> {
    let pair = InputPair::new(a, b)?;
    let circuit = half_adder_circuit(a, b)?;
    let result = sampler(config, adder::NUM_WIRES).execute(&circuit, config.shots)?;

    println!("\n[Half-Adder {}] shots={}", pair, config.shots);
    print_counts(&result.counts);
    println!(
        "{}",
        majority_line(pair, &result.counts, result.shots, config.tie_policy)?
    );

    let file = format!("adder_A{}_B{}_circuit.qasm", pair.a, pair.b);
    let path = write_qasm(out, &file, &circuit)?;
    println!("Saved: {}", path.display());
    Ok(())
}

/// Majority summary under the configured tie policy
fn majority_line(pair: InputPair, counts: &Counts, shots: u64, policy: TiePolicy) -> Result<String> {
    let majority = majority_vote(counts, policy)?;
    Ok(format!(
        "majority={} ({}/{})  expected={}",
        majority.bitstring,
        majority.count,
        shots,
        qadd_core::truth_table::expected_for(pair)
    ))
}

/// Returns whether every row passed
fn run_test(config: &VerifyConfig, format: ReportFormat, out: &Path) -> Result<bool> {
    let backend: Arc<dyn Backend> = Arc::new(simulator(config, adder::NUM_WIRES));
    let report = Verifier::new(backend, config.clone()).run()?;

    println!("\n[Full Verification]");
    for record in &report.records {
        println!("{}", record);
    }

    ensure_dir(out)?;
    let text_path = out.join("test_report.txt");
    Reporter::save(&report, ReportFormat::Text, &text_path)?;
    println!("Saved report: {}", text_path.display());

    if format != ReportFormat::Text {
        let path = out.join(format!("test_report.{}", format.extension()));
        Reporter::save(&report, format, &path)?;
        println!("Saved report: {}", path.display());
    }

    if !report.all_passed() {
        for record in report.failures() {
            log::error!("{}", record);
        }
    }

    Ok(report.all_passed())
}

fn print_counts(counts: &Counts) {
    match serde_json::to_string(counts) {
        Ok(json) => println!("Counts: {}", json),
        Err(_) => println!("Counts: {:?}", counts),
    }
    print!("{}", Reporter::histogram(counts, HISTOGRAM_WIDTH));
}

fn print_notes() {
    for (i, note) in NOTES.iter().enumerate() {
        println!("\n--- Note {} ---\n{}\n", i + 1, note);
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

fn write_qasm(dir: &Path, file: &str, circuit: &Circuit) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(file);
    if circuit.gate_count() == 0 {
        bail!(
            "refusing to write empty circuit {}",
            circuit.name().unwrap_or("unnamed")
        );
    }
    std::fs::write(&path, circuit.to_qasm())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["qadd"]).unwrap();

        assert_eq!(cli.shots, None);
        assert_eq!(build_config(&cli).unwrap().shots, 4096);
        assert_eq!(cli.out, PathBuf::from("outputs"));
        assert_eq!(cli.only, Only::All);
        assert_eq!((cli.a, cli.b), (1, 1));
        assert!(!cli.thread);
        assert_eq!(cli.format, Format::Text);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "qadd",
            "--only",
            "adder",
            "--a",
            "0",
            "--b",
            "1",
            "--shots",
            "10",
            "--seed",
            "7",
            "--timeout-ms",
            "500",
            "--parallel",
            "--format",
            "markdown",
        ])
        .unwrap();

        assert_eq!(cli.only, Only::Adder);
        assert_eq!((cli.a, cli.b), (0, 1));

        let config = build_config(&cli).unwrap();
        assert_eq!(config.shots, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.timeout_ms, Some(500));
        assert!(config.parallel);
        assert_eq!(ReportFormat::from(cli.format), ReportFormat::Markdown);
    }

    #[test]
    fn test_config_file_values_kept() {
        let path = std::env::temp_dir().join(format!("qadd_cli_config_{}.json", std::process::id()));
        VerifyConfig::default()
            .with_max_shots(1000)
            .with_shots(500)
            .with_verbose(true)
            .save(&path)
            .unwrap();
        let file = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["qadd", "--config", file]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.shots, 500);
        assert_eq!(config.max_shots, 1000);
        assert!(config.verbose);

        let cli = Cli::try_parse_from(["qadd", "--config", file, "--shots", "200"]).unwrap();
        assert_eq!(build_config(&cli).unwrap().shots, 200);

        let cli = Cli::try_parse_from(["qadd", "--config", file, "--shots", "2000"]).unwrap();
        assert!(build_config(&cli).is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_only_rejected() {
        assert!(Cli::try_parse_from(["qadd", "--only", "everything"]).is_err());
    }

    #[test]
    fn test_zero_shots_rejected() {
        let cli = Cli::try_parse_from(["qadd", "--shots", "0"]).unwrap();
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_only_includes() {
        assert!(Only::All.includes(Only::Hello));
        assert!(Only::Test.includes(Only::Test));
        assert!(!Only::Hello.includes(Only::Test));
    }

    #[test]
    fn test_run_parts_write_files() {
        let out = std::env::temp_dir().join(format!("qadd_cli_{}", std::process::id()));
        let config = VerifyConfig::reproducible(11).with_shots(64);

        run_hello(&config, &out).unwrap();
        run_adder(&config, 1, 1, &out).unwrap();
        assert!(run_test(&config, ReportFormat::Json, &out).unwrap());

        assert!(out.join("hello_circuit.qasm").exists());
        assert!(out.join("adder_A1_B1_circuit.qasm").exists());
        assert!(out.join("test_report.txt").exists());
        assert!(out.join("test_report.json").exists());

        let _ = std::fs::remove_dir_all(&out);
    }

    #[test]
    fn test_majority_line_follows_tie_policy() {
        let pair = InputPair::new(0, 1).unwrap();
        let tied: Counts = [("01".to_string(), 2), ("10".to_string(), 2)]
            .into_iter()
            .collect();

        let line = majority_line(pair, &tied, 4, TiePolicy::LexicographicSmallest).unwrap();
        assert_eq!(line, "majority=01 (2/4)  expected=01");

        let err = majority_line(pair, &tied, 4, TiePolicy::Reject).unwrap_err();
        assert!(err.to_string().contains("Ambiguous majority"));
    }

    #[test]
    fn test_adder_rejects_bad_input() {
        let out = std::env::temp_dir().join(format!("qadd_cli_bad_{}", std::process::id()));
        let config = VerifyConfig::default().with_shots(4);
        assert!(run_adder(&config, 2, 0, &out).is_err());
    }
}

use biodivine_algo_mv_attractors::attractor::{
    DEFAULT_SEED, DEFAULT_SETTLE_STEPS, SearchConfig, SearchMode,
};
use biodivine_algo_mv_attractors::export;
use biodivine_algo_mv_attractors::network::MvNetwork;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "biodivine_mv_attractors")]
#[command(about = "Enumerate attractors of a multi-valued network and write them as CSV files")]
struct Args {
    /// Path to a JSON network description
    #[arg(value_name = "FILE")]
    file: String,

    /// Update semantics: "sync" or "async"
    #[arg(long, default_value = "async", require_equals = true)]
    mode: Mode,

    /// Output files are named `{output}{n}.csv`
    #[arg(long, default_value = "attractor_", require_equals = true)]
    output: String,

    /// First line of every output file (default: `v0,v1,...`)
    #[arg(long, require_equals = true)]
    header: Option<String>,

    /// Seed of the random pivot selection
    #[arg(long, default_value_t = DEFAULT_SEED, require_equals = true)]
    seed: u64,

    /// Number of random transitions applied to each pivot before reachability
    #[arg(long, default_value_t = DEFAULT_SETTLE_STEPS, require_equals = true)]
    settle_steps: usize,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum Mode {
    Sync,
    Async,
}

impl From<Mode> for SearchMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Sync => SearchMode::Synchronous,
            Mode::Async => SearchMode::Asynchronous,
        }
    }
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let contents = std::fs::read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to read network file {}: {}", args.file, e);
        std::process::exit(1);
    });
    let network: MvNetwork = serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("Failed to parse network file {}: {}", args.file, e);
        std::process::exit(1);
    });

    println!("Loaded network with {} variables.", network.num_vars());

    let header = args.header.unwrap_or_else(|| {
        (0..network.num_vars())
            .map(|i| format!("v{}", i))
            .collect::<Vec<_>>()
            .join(",")
    });

    let mut config = SearchConfig::new(args.mode.into());
    config.seed = args.seed;
    config.settle_steps = args.settle_steps;

    match export::run(&network, &config, &args.output, &header) {
        Ok(written) => println!("Total attractors written: {}", written),
        Err(e) => {
            eprintln!("Error during attractor computation: {}", e);
            std::process::exit(1);
        }
    }
}

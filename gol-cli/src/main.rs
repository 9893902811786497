use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use life_sim_core::{CatalogClient, Grid, Reporter, SimulationConfig, WorkerPool};
use tracing_subscriber::EnvFilter;

/// Game of Life demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "gol")]
#[command(about = "Parallel Game of Life on a toroidal grid", long_about = None)]
struct Args {
    /// Echo the configuration and show every generation on the console
    #[arg(short, long)]
    verbose: bool,

    /// Local configuration file
    #[arg(short, long, conflicts_with = "fetch")]
    config: Option<PathBuf>,

    /// List the configurations available on the catalog server and exit
    #[arg(short, long)]
    list: bool,

    /// Fetch the named configuration from the catalog, save it to the
    /// working directory, and run it
    #[arg(short = 'n', long)]
    fetch: Option<String>,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Print each worker's row assignment after the run
    #[arg(short, long)]
    partition: bool,

    /// Catalog server address
    #[arg(long, default_value = "comp280.sandiego.edu:9181")]
    server: String,

    /// Pause between displayed generations in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

/// Width of the ruler printed under each day header
const DAY_RULE_WIDTH: usize = 18;

/// Terminal reporter: one banner per generation, `@` for live cells,
/// `-` for dead ones, with a pause so the evolution is watchable
struct ConsoleReporter {
    delay: Duration,
}

impl Reporter for ConsoleReporter {
    fn on_generation(&self, grid: &Grid, generation: usize) {
        println!("DAY {}", generation + 1);
        println!("{}", "=".repeat(DAY_RULE_WIDTH));
        for row in 0..grid.rows() {
            let mut line = String::with_capacity(grid.cols() * 2);
            for col in 0..grid.cols() {
                if col > 0 {
                    line.push(' ');
                }
                line.push(if grid.get(row, col).is_alive() { '@' } else { '-' });
            }
            println!("{line}");
        }
        println!();
        thread::sleep(self.delay);
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.list {
        let listing = CatalogClient::new(args.server.as_str()).list()?;
        print!("{listing}");
        return Ok(());
    }

    let config = load_config(&args)?;
    if args.verbose {
        println!(
            "{} x {} board, {} generations, {} live cells, {} threads",
            config.rows,
            config.cols,
            config.generations,
            config.live_cells.len(),
            args.threads
        );
    }

    let mut grid = Grid::from_config(&config)?;
    let pool = WorkerPool::new(args.threads).with_partition_log(args.partition);

    let reporter = ConsoleReporter {
        delay: Duration::from_millis(args.delay_ms),
    };
    let observer: Option<&dyn Reporter> = if args.verbose { Some(&reporter) } else { None };

    let start = Instant::now();
    pool.run(&mut grid, config.generations, observer)?;
    let elapsed = start.elapsed();

    println!(
        "Time for {} iterations: {:.6} seconds",
        config.generations,
        elapsed.as_secs_f64()
    );
    Ok(())
}

/// Resolve the configuration source, either a local file or the catalog
fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    if let Some(path) = &args.config {
        return Ok(SimulationConfig::from_path(path)?);
    }
    if let Some(name) = &args.fetch {
        let text = CatalogClient::new(args.server.as_str()).fetch(name)?;
        fs::write(name, &text)?;
        println!("Saved '{name}' from {}", args.server);
        return Ok(SimulationConfig::parse(&text)?);
    }
    Err("no configuration given, use --config FILE or --fetch NAME (see --help)".into())
}

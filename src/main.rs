use std::error::Error;
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;

use vecreduce::engine::reduce::{AVG_PARALLEL_NAME, AVG_SEQUENTIAL_NAME};
use vecreduce::{
    Element, EngineConfig, NumericBuffer, ReduceResult, Reduction, Timed, TimingObserver,
    XorShift64Star,
};

/// Sequential vs. multi-threaded reductions over a random buffer
#[derive(Parser, Debug)]
#[command(name = "vecreduce", version, about)]
struct Args {
    /// Number of elements per buffer
    #[arg(long, default_value_t = 1_000_000)]
    len: usize,

    /// Inclusive lower bound for the random fill
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    min: String,

    /// Exclusive upper bound for the random fill
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    max: String,

    /// Worker threads for the parallel suite (default: VECREDUCE_THREADS or
    /// the number of available cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for the random fills
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Element type
    #[arg(long, value_enum, default_value_t = DTypeArg::F64)]
    dtype: DTypeArg,

    /// Binary dump written and read back between the two phases
    #[arg(long, default_value = "numbers.dat")]
    data_file: PathBuf,

    /// Append timings to this file instead of the configured log
    #[arg(long, conflicts_with = "no_timing_log")]
    timing_log: Option<PathBuf>,

    /// Do not write a timing log
    #[arg(long)]
    no_timing_log: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DTypeArg {
    F64,
    F32,
    I64,
    I32,
    U64,
    U32,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = EngineConfig::from_env()?;
    if args.no_timing_log {
        cfg.timing_log = None;
    } else if let Some(path) = &args.timing_log {
        cfg.timing_log = Some(path.clone());
    }
    if let Some(threads) = args.threads {
        cfg.threads = threads;
    }

    match args.dtype {
        DTypeArg::F64 => run::<f64>(args, &cfg),
        DTypeArg::F32 => run::<f32>(args, &cfg),
        DTypeArg::I64 => run::<i64>(args, &cfg),
        DTypeArg::I32 => run::<i32>(args, &cfg),
        DTypeArg::U64 => run::<u64>(args, &cfg),
        DTypeArg::U32 => run::<u32>(args, &cfg),
    }
}

fn parse_bound<T>(name: &str, raw: &str) -> Result<T, Box<dyn Error>>
where
    T: Element + FromStr,
    T::Err: Display,
{
    raw.parse::<T>()
        .map_err(|e| format!("--{name} {raw:?} is not a valid {}: {e}", T::DTYPE).into())
}

fn report<V: Display>(label: &str, timed: Timed<ReduceResult<V>>) -> ReduceResult<()> {
    let timed = timed.transpose()?;
    println!("{label}: {} ({:.6} s)", timed.value, timed.secs());
    Ok(())
}

fn run<T>(args: &Args, cfg: &EngineConfig) -> Result<(), Box<dyn Error>>
where
    T: Element + FromStr,
    T::Err: Display,
{
    use Reduction::{Dot, Max, Min, Sum, SumOfAbs, SumOfSquares};

    let min: T = parse_bound("min", &args.min)?;
    let max: T = parse_bound("max", &args.max)?;
    let threads = cfg.threads;
    let observer = TimingObserver::from_config(cfg);
    let mut rng = XorShift64Star::seed_from_u64(args.seed);

    let mut source = NumericBuffer::<T>::with_config(args.len, cfg)?;
    source.fill_random_range(min, max, &mut rng)?;

    println!("Sequential ({} x {}):", source.len(), source.dtype());
    report("Minimum", observer.observe(Min.sequential_name(), || source.min()))?;
    report("Maximum", observer.observe(Max.sequential_name(), || source.max()))?;
    report("Average", observer.observe(AVG_SEQUENTIAL_NAME, || source.avg()))?;
    report("Sum", observer.observe(Sum.sequential_name(), || source.sum()))?;
    report(
        "Euclidean norm",
        observer.observe(SumOfSquares.sequential_name(), || source.euclidean_norm()),
    )?;
    report(
        "Manhattan norm",
        observer.observe(SumOfAbs.sequential_name(), || source.manhattan_norm()),
    )?;

    source.export_binary(&args.data_file)?;
    let mut loaded = NumericBuffer::<T>::with_config(args.len, cfg)?;
    loaded.import_binary(&args.data_file)?;

    println!("\nImported from {}:", args.data_file.display());
    report("Minimum", observer.observe(Min.sequential_name(), || loaded.min()))?;
    report("Maximum", observer.observe(Max.sequential_name(), || loaded.max()))?;
    report("Average", observer.observe(AVG_SEQUENTIAL_NAME, || loaded.avg()))?;

    let mut other = NumericBuffer::<T>::with_config(args.len, cfg)?;
    other.fill_random_range(min, max, &mut rng)?;
    report("Dot product", observer.observe(Dot.sequential_name(), || loaded.dot(&other)))?;

    println!("\nParallel ({threads} threads):");
    report("Minimum", observer.observe(Min.parallel_name(), || loaded.min_parallel(threads)))?;
    report("Maximum", observer.observe(Max.parallel_name(), || loaded.max_parallel(threads)))?;
    report("Sum", observer.observe(Sum.parallel_name(), || loaded.sum_parallel(threads)))?;
    report("Average", observer.observe(AVG_PARALLEL_NAME, || loaded.avg_parallel(threads)))?;
    report(
        "Euclidean norm",
        observer.observe(SumOfSquares.parallel_name(), || loaded.euclidean_norm_parallel(threads)),
    )?;
    report(
        "Manhattan norm",
        observer.observe(SumOfAbs.parallel_name(), || loaded.manhattan_norm_parallel(threads)),
    )?;
    report(
        "Dot product with itself",
        observer.observe(Dot.parallel_name(), || loaded.dot_parallel(&loaded, threads)),
    )?;

    Ok(())
}

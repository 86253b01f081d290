use argh::FromArgs;
use crossbeam::thread;
use cubesort::comm::{Endpoint, ProcessGroup};
use cubesort::{distributed_bitonic_sort, validate_global_order, SortTimings, ValidationError};
use log::{debug, error, info, LevelFilter};
use rand::prelude::*;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(FromArgs)]
/// Distributed bitonic merge sort across a hypercube of 2^p worker ranks,
/// each holding 2^q random integers exchanged in batches of 2^s.
struct Args {
    /// hypercube dimension; the group has 2^p ranks
    #[argh(positional)]
    p: u32,

    /// partition exponent; each rank holds 2^q elements
    #[argh(positional)]
    q: u32,

    /// batch exponent; each message carries 2^s elements
    #[argh(positional)]
    s: u32,

    /// log per-rank progress
    #[argh(switch)]
    verbose: bool,

    /// skip the post-sort global order validation
    #[argh(switch)]
    no_validation: bool,

    /// append a `p q s t_seed t_exchange t_elbow t_total` line to this file
    #[argh(option)]
    timing_file: Option<PathBuf>,

    /// recursion budget for the seed sort worker fan-out
    #[argh(option, default = "0")]
    depth: usize,
}

fn check_config(args: &Args) -> Result<(), String> {
    for &(name, value) in &[("p", args.p), ("q", args.q), ("s", args.s)] {
        if value > 31 {
            return Err(format!("{} must be in the range [0, 31]", name));
        }
    }

    if args.s > args.q {
        return Err("s must be less than or equal to q".to_string());
    }

    Ok(())
}

fn run_rank(
    endpoint: Endpoint<i32>,
    n: usize,
    batch_size: usize,
    depth: usize,
    validate: bool,
    seed: u64,
) -> Result<SortTimings, ValidationError> {
    let rank = endpoint.rank();

    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(rank as u64));
    let mut local: Vec<i32> = (0..n).map(|_| rng.gen()).collect();
    let mut recv = vec![0i32; n];

    let timings = distributed_bitonic_sort(&endpoint, &mut local, &mut recv, batch_size, depth);
    debug!("rank {}: partition sorted in {:.6}s", rank, timings.total);

    if validate {
        validate_global_order(&endpoint, &local)?;
        debug!("rank {}: global order validated", rank);
    }

    Ok(timings)
}

fn append_timing_line(path: &Path, args: &Args, timings: &SortTimings) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    writeln!(
        file,
        "{} {} {} {:.6} {:.6} {:.6} {:.6}",
        args.p,
        args.q,
        args.s,
        timings.seed_sort,
        timings.exchange,
        timings.elbow_merge,
        timings.total
    )
}

fn main() {
    let args: Args = argh::from_env();

    if let Err(message) = check_config(&args) {
        eprintln!("error: {}", message);
        process::exit(1);
    }

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let size = 1usize << args.p;
    let n = 1usize << args.q;
    let batch_size = 1usize << args.s;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    info!(
        "sorting {} ranks x {} elements, {} per batch",
        size, n, batch_size
    );

    let endpoints = ProcessGroup::new(size).into_endpoints();

    let results: Vec<Result<SortTimings, ValidationError>> = thread::scope(|s| {
        let handles: Vec<_> = endpoints
            .into_iter()
            .map(|endpoint| {
                s.spawn(move |_| {
                    run_rank(
                        endpoint,
                        n,
                        batch_size,
                        args.depth,
                        !args.no_validation,
                        seed,
                    )
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    let mut failed = false;
    for result in &results {
        if let Err(violation) = result {
            error!("{}", violation);
            failed = true;
        }
    }

    // Rank 0's ledger stands in for the run, as every phase boundary is
    // barrier-aligned across the group.
    if let Ok(timings) = &results[0] {
        info!("seed sort   {:.6}s", timings.seed_sort);
        info!("exchange    {:.6}s", timings.exchange);
        info!("elbow merge {:.6}s", timings.elbow_merge);
        info!("total       {:.6}s", timings.total);

        if let Some(path) = &args.timing_file {
            if let Err(e) = append_timing_line(path, &args, timings) {
                error!("failed to append to {}: {}", path.display(), e);
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

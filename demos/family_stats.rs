//! Demo harness: build a family, optionally prune it, then report moments
//! and the top-ranked members.
//!
//! ```bash
//! cargo run --example family-stats -- --power 12 --prune 0.2 --seed 42 --moment 3 --sort 5
//! ```

use clap::Parser;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use zdd_stats::prune::RandomPruning;
use zdd_stats::reference::ZddId;
use zdd_stats::types::Var;
use zdd_stats::weights::WeightTable;
use zdd_stats::zdd::ZddManager;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Universe size (elements 1..=n).
    #[arg(value_name = "INT", default_value = "12")]
    n: u32,

    /// Build a knapsack family (random element weights, bounded total)
    /// instead of the full power set.
    #[clap(long, value_name = "INT")]
    capacity: Option<i64>,

    /// Randomly prune each edge with this probability.
    #[clap(long, value_name = "FLOAT")]
    prune: Option<f64>,

    /// Seed for weights and pruning; defaults to a clock-derived seed.
    #[clap(long, value_name = "INT")]
    seed: Option<u64>,

    /// Compute raw moments up to this order.
    #[clap(long, value_name = "INT", default_value = "2")]
    moment: usize,

    /// List this many top members by value.
    #[clap(long, value_name = "INT", default_value = "5")]
    sort: usize,

    /// Dump the resulting diagram in DOT format.
    #[clap(long)]
    dot: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    log::info!("args = {:?}", args);

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64)
    });
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mgr = ZddManager::new();
    let n = args.n;

    // Element values ~ U{1,10}, like a toy knapsack instance
    let weights = WeightTable::from_weights((0..n).map(|_| rng.random_range(1..=10i64)));
    println!(
        "weights: {:?}",
        (1..=n).map(|i| weights.weight(Var::new(i))).collect::<Vec<_>>()
    );

    let mut family = match args.capacity {
        Some(capacity) => {
            log::info!("building knapsack family: n={}, capacity={}", n, capacity);
            mgr.ensure_var(Var::new(n));
            let mut memo = std::collections::HashMap::new();
            knapsack(&mgr, 1, n, capacity, &weights, &mut memo)
        }
        None => {
            log::info!("building power set: n={}", n);
            mgr.powerset(1..=n)
        }
    };

    if let Some(prob) = args.prune {
        let policy = RandomPruning::with_seed(n, prob, seed);
        println!("survival bound (1 run)  = {:.5}", policy.survival_bound(1));
        println!("survival bound (10 runs) = {:.5}", policy.survival_bound(10));
        family = mgr.prune(family, prob, Some(seed));
    }

    println!("members: {}", mgr.count(family));
    println!("nodes:   {}", mgr.node_count(family));

    let m = mgr.moments(family, &weights, args.moment);
    for k in 1..=args.moment {
        match m.normalized(k) {
            Some(value) => println!("{}{} moment = {:.5}", k, suffix(k), value),
            None => println!("{}{} moment undefined (empty family)", k, suffix(k)),
        }
    }

    println!("top {} members:", args.sort);
    for (i, solution) in mgr.iter_ranked(family, &weights).take(args.sort).enumerate() {
        let elements: Vec<u32> = solution.elements.iter().map(|v| v.id()).collect();
        println!("  #{:<3} value = {:<6} elements = {:?}", i + 1, solution.value, elements);
    }

    if args.dot {
        println!("{}", mgr.to_dot(family, Some(&weights)));
    }

    Ok(())
}

/// All subsets whose total weight stays within `remaining`, built directly
/// with a (element, remaining) memo.
fn knapsack(
    mgr: &ZddManager,
    i: u32,
    n: u32,
    remaining: i64,
    weights: &WeightTable,
    memo: &mut std::collections::HashMap<(u32, i64), ZddId>,
) -> ZddId {
    if remaining < 0 {
        return ZddId::ZERO;
    }
    if i > n {
        return ZddId::ONE;
    }
    if let Some(&cached) = memo.get(&(i, remaining)) {
        return cached;
    }

    let var = Var::new(i);
    let skip = knapsack(mgr, i + 1, n, remaining, weights, memo);
    let take = knapsack(mgr, i + 1, n, remaining - weights.weight(var), weights, memo);
    let result = mgr.get_node(var, skip, take);

    memo.insert((i, remaining), result);
    result
}

fn suffix(k: usize) -> &'static str {
    match k {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

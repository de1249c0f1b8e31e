//! Command implementations for the rbo CLI.

use log::{LevelFilter, debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::similarity::{RankingSimilarity, SimilarityConfig};

/// Execute a CLI command.
pub fn execute_command(args: RboArgs) -> Result<()> {
    match &args.command {
        Command::Rbo(rbo_args) => run_rbo(rbo_args, &args),
        Command::RboExt(ext_args) => run_rbo_ext(ext_args, &args),
        Command::TopWeightness(tw_args) => run_top_weightness(tw_args, &args),
        Command::Kendall(kendall_args) => run_kendall(kendall_args, &args),
        Command::Compare(compare_args) => run_compare(compare_args, &args),
    }
}

/// Build the similarity object for the lists given on the command line.
fn load_similarity(
    lists: &ListArgs,
    verbose: bool,
) -> Result<RankingSimilarity<String>> {
    let (s, t) = lists.parse_lists();
    debug!("Comparing lists of length {} and {}", s.len(), t.len());
    Ok(RankingSimilarity::new(s, t)?.with_verbose(verbose))
}

fn run_rbo(args: &RboCommandArgs, cli_args: &RboArgs) -> Result<()> {
    let sim = load_similarity(&args.lists, cli_args.progress_enabled())?;
    let value = sim.rbo(args.depth, args.p, args.extrapolate)?;

    output_result(
        "Rank-biased overlap",
        &MeasureResult {
            measure: "rbo".to_string(),
            value,
            p: args.p,
            depth: args.depth,
            extrapolate: args.extrapolate,
        },
        cli_args,
    )
}

fn run_rbo_ext(args: &RboExtArgs, cli_args: &RboArgs) -> Result<()> {
    let sim = load_similarity(&args.lists, cli_args.progress_enabled())?;
    let value = sim.rbo_ext(args.p)?;

    output_result(
        "Extrapolated rank-biased overlap",
        &MeasureResult {
            measure: "rbo_ext".to_string(),
            value,
            p: args.p,
            depth: None,
            extrapolate: true,
        },
        cli_args,
    )
}

fn run_top_weightness(args: &TopWeightnessArgs, cli_args: &RboArgs) -> Result<()> {
    let sim = load_similarity(&args.lists, cli_args.progress_enabled())?;
    let value = sim.top_weightness(args.p, args.depth)?;

    output_result(
        "Top-weightness",
        &MeasureResult {
            measure: "top_weightness".to_string(),
            value,
            p: args.p,
            depth: args.depth,
            extrapolate: false,
        },
        cli_args,
    )
}

fn run_kendall(args: &KendallArgs, cli_args: &RboArgs) -> Result<()> {
    let sim = load_similarity(&args.lists, cli_args.progress_enabled())?;
    let result = sim.kendall_tau();

    output_result("Kendall's tau-b over the common elements", &result, cli_args)
}

fn run_compare(args: &CompareArgs, cli_args: &RboArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            SimilarityConfig::from_file(path)?
        }
        None => SimilarityConfig::default(),
    };

    // Progress is logged at info level. Quiet mode still wins.
    if config.verbose && cli_args.verbosity() > 0 {
        raise_log_level(LevelFilter::Info);
    }

    let sim = load_similarity(&args.lists, config.verbose || cli_args.progress_enabled())?;
    let report = sim.report(&config)?;

    output_result("Similarity report", &report, cli_args)
}

/// Raise the global log level to at least `level`; never lowers it.
fn raise_log_level(level: LevelFilter) {
    if log::max_level() < level {
        log::set_max_level(level);
    }
}

use std::path::Path;

use clap::{value_parser, Arg, Command};
use tracing::{info, warn};

use filtered_knn::data_handling::knn_file::read_knn;
use filtered_knn::util::ground_truth::GroundTruth;
use filtered_knn::util::logging;
use filtered_knn::util::recall::{filtered_recall, write_recall_csv};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let matches = Command::new("Evaluate Recall")
        .version("0.1.0")
        .about("Scores a knn result file against filtered ground truth")
        .arg(
            Arg::new("results")
                .long("results")
                .short('r')
                .value_name("FILE")
                .help("Result file written by the baseline")
                .required(true),
        )
        .arg(
            Arg::new("ground_truth")
                .long("ground-truth")
                .short('g')
                .value_name("FILE")
                .help("Ground truth file")
                .required(true),
        )
        .arg(
            Arg::new("k")
                .long("k")
                .short('k')
                .value_name("COUNT")
                .help("Ids per result row")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .value_name("FILE")
                .help("Optional per-query recall export"),
        )
        .get_matches();

    let results_path = matches.get_one::<String>("results").unwrap();
    let gt_path = matches.get_one::<String>("ground_truth").unwrap();
    let k = *matches.get_one::<usize>("k").unwrap();

    let results = read_knn(Path::new(results_path), k)?;
    let gt = GroundTruth::read(Path::new(gt_path))?;
    info!(
        "{} result rows, {} ground truth rows of {} neighbors",
        results.n, gt.n, gt.k
    );
    if results.n != gt.n {
        warn!(
            "result and ground truth row counts differ, scoring the first {}",
            results.n.min(gt.n)
        );
    }

    let per_query: Vec<Option<f64>> = (0..results.n.min(gt.n))
        .map(|i| filtered_recall(results.get_neighbors(i), gt.get_neighbors(i)))
        .collect();

    let scored: Vec<f64> = per_query.iter().flatten().copied().collect();
    let skipped = per_query.len() - scored.len();
    if skipped > 0 {
        info!("{} queries have no qualifying points and are not scored", skipped);
    }
    let mean = if scored.is_empty() {
        0.0
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    };
    info!("recall@{}: {:.5}", k, mean);

    if let Some(csv_path) = matches.get_one::<String>("csv") {
        write_recall_csv(Path::new(csv_path), &per_query)?;
        info!("wrote per-query recall to {}", csv_path);
    }

    Ok(())
}

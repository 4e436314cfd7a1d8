use clap::{value_parser, Arg, Command};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use filtered_knn::config::EvaluatorConfig;
use filtered_knn::data_handling::bin_file::read_bin;
use filtered_knn::util::ground_truth::compute_ground_truth;
use filtered_knn::util::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let matches = Command::new("Compute Ground Truth")
        .version("0.1.0")
        .about("Computes exact filtered nearest neighbors by scanning the whole dataset")
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .short('d')
                .value_name("FILE")
                .help("Dataset file path")
                .required(true),
        )
        .arg(
            Arg::new("query_set")
                .long("query-set")
                .short('q')
                .value_name("FILE")
                .help("Query file path")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Output file path for ground truth")
                .required(true),
        )
        .arg(
            Arg::new("neighbors")
                .long("neighbors")
                .short('k')
                .value_name("COUNT")
                .help("Number of nearest neighbors to compute")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("dimensions")
                .long("dimensions")
                .value_name("COUNT")
                .help("Dimensions of a data point, attributes included")
                .value_parser(value_parser!(usize))
                .default_value("102"),
        )
        .get_matches();

    let dataset_path = matches.get_one::<String>("dataset").unwrap();
    let query_path = matches.get_one::<String>("query_set").unwrap();
    let output_path = matches.get_one::<String>("output").unwrap();
    let neighbors_count = *matches.get_one::<usize>("neighbors").unwrap();
    let config = EvaluatorConfig {
        data_dimensions: *matches.get_one::<usize>("dimensions").unwrap(),
        k: neighbors_count,
        ..Default::default()
    };
    config.validate()?;

    info!("Loading dataset from {}", dataset_path);
    let start = Instant::now();
    let dataset = read_bin(Path::new(dataset_path), config.data_dimensions)?;
    info!(
        "Dataset loaded in {:?}: {} points with {} dimensions",
        start.elapsed(),
        dataset.n,
        dataset.dim
    );

    info!("Loading query set from {}", query_path);
    let start = Instant::now();
    let queries = read_bin(Path::new(query_path), config.query_dimensions())?;
    info!("Query set loaded in {:?}: {} queries", start.elapsed(), queries.n);

    let compute_start = Instant::now();
    let ground_truth = compute_ground_truth(&dataset, &queries, neighbors_count)?;
    info!(
        "Ground truth computation completed in {:?}",
        compute_start.elapsed()
    );

    info!("Writing ground truth to {}", output_path);
    let write_start = Instant::now();
    ground_truth.write(Path::new(output_path))?;
    info!("Ground truth written in {:?}", write_start.elapsed());

    Ok(())
}

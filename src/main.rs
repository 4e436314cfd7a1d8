use std::path::Path;
use std::time::Instant;

use clap::{value_parser, Arg, ArgAction, Command};
use tracing::info;

use filtered_knn::config::{
    EvaluatorConfig, DEFAULT_DATA_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_QUERY_PATH,
};
use filtered_knn::data_handling::bin_file::read_bin;
use filtered_knn::distance::get_distance_comparison_count;
use filtered_knn::query::Baseline;
use filtered_knn::util::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let matches = Command::new("Sampling Baseline")
        .version("0.1.0")
        .about("Answers filtered 100-NN queries from a sampled prefix of the dataset")
        .arg(
            Arg::new("dataset")
                .value_name("FILE")
                .help("Dataset file path")
                .default_value(DEFAULT_DATA_PATH),
        )
        .arg(
            Arg::new("queries")
                .long("queries")
                .short('q')
                .value_name("FILE")
                .help("Query file path")
                .default_value(DEFAULT_QUERY_PATH),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Where to write the knn results")
                .default_value(DEFAULT_OUTPUT_PATH),
        )
        .arg(
            Arg::new("dimensions")
                .long("dimensions")
                .value_name("COUNT")
                .help("Dimensions of a data point, attributes included")
                .value_parser(value_parser!(usize))
                .default_value("102"),
        )
        .arg(
            Arg::new("k")
                .long("k")
                .short('k')
                .value_name("COUNT")
                .help("Neighbors returned per query")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("sample_proportion")
                .long("sample-proportion")
                .short('s')
                .value_name("FRACTION")
                .help("Fraction of the dataset prefix scanned per query")
                .value_parser(value_parser!(f64))
                .default_value("0.001"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .help("Answer queries on all cores")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show a progress bar")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let data_path = matches.get_one::<String>("dataset").unwrap();
    let query_path = matches.get_one::<String>("queries").unwrap();
    let output_path = matches.get_one::<String>("output").unwrap();

    let config = EvaluatorConfig {
        data_dimensions: *matches.get_one::<usize>("dimensions").unwrap(),
        k: *matches.get_one::<usize>("k").unwrap(),
        sample_proportion: *matches.get_one::<f64>("sample_proportion").unwrap(),
        parallel: matches.get_flag("parallel"),
        show_progress: matches.get_flag("progress"),
    };
    config.validate()?;

    let program_start = Instant::now();

    info!("Reading data: {}", data_path);
    let start = Instant::now();
    let dataset = read_bin(Path::new(data_path), config.data_dimensions)?;
    info!("read {} points in {:?}", dataset.n, start.elapsed());

    info!("Reading queries: {}", query_path);
    let start = Instant::now();
    let queries = read_bin(Path::new(query_path), config.query_dimensions())?;
    info!("read {} queries in {:?}", queries.n, start.elapsed());

    info!("# data points:  {}", dataset.n);
    info!("# data point dim:  {}", dataset.dim);
    info!("# queries:      {}", queries.n);

    let start = Instant::now();
    let baseline = Baseline::new(&dataset, &config)?;
    let (results, stats) = baseline.run(&queries)?;
    let elapsed = start.elapsed();
    info!(
        "ran {} queries in {}.{:03} seconds ({:.1} QPS)",
        queries.n,
        elapsed.as_secs(),
        elapsed.subsec_millis(),
        queries.n as f64 / elapsed.as_secs_f64()
    );
    stats.log();
    if cfg!(feature = "dcmp") {
        info!("distance comparisons: {}", get_distance_comparison_count());
    }

    let start = Instant::now();
    results.write(Path::new(output_path))?;
    info!("wrote results to {} in {:?}", output_path, start.elapsed());
    info!("total runtime was {:?}", program_start.elapsed());

    Ok(())
}

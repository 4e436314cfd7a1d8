use std::fs;
use std::path::Path;

use clap::{value_parser, Arg, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use filtered_knn::data_handling::bin_file::write_bin;
use filtered_knn::util::logging;
use filtered_knn::util::synthetic::{random_points, random_queries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let matches = Command::new("Generate Dataset")
        .version("0.1.0")
        .about("Writes random points and filtered queries in the baseline's binary layout")
        .arg(
            Arg::new("points")
                .long("points")
                .short('n')
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .default_value("100000"),
        )
        .arg(
            Arg::new("queries")
                .long("queries")
                .short('q')
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .default_value("1000"),
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
            Arg::new("categories")
                .long("categories")
                .value_name("COUNT")
                .value_parser(value_parser!(u32))
                .default_value("10"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .default_value("42"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("DIR")
                .help("Directory receiving data.bin and queries.bin")
                .required(true),
        )
        .get_matches();

    let n = *matches.get_one::<usize>("points").unwrap();
    let n_queries = *matches.get_one::<usize>("queries").unwrap();
    let dim = *matches.get_one::<usize>("dimensions").unwrap();
    let categories = *matches.get_one::<u32>("categories").unwrap();
    let seed = *matches.get_one::<u64>("seed").unwrap();
    let output_dir = Path::new(matches.get_one::<String>("output").unwrap());

    if dim < 2 || categories == 0 {
        return Err("need at least 2 dimensions and 1 category".into());
    }

    fs::create_dir_all(output_dir)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let points = random_points(&mut rng, n, dim, categories);
    let data_path = output_dir.join("data.bin");
    write_bin(&data_path, &points)?;
    info!("wrote {} points of {} dimensions to {}", n, dim, data_path.display());

    let queries = random_queries(&mut rng, n_queries, dim, categories);
    let query_path = output_dir.join("queries.bin");
    write_bin(&query_path, &queries)?;
    info!(
        "wrote {} queries of {} dimensions to {}",
        n_queries,
        queries.dim,
        query_path.display()
    );

    Ok(())
}

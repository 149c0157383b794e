use std::env;
use std::process;

use florapart::{api, report, ClusterConfig};

fn numeric_arg<T: std::str::FromStr>(value: Option<String>, name: &str, default: T) -> T {
    match value {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("{} must be a number, got {:?}", name, raw);
                process::exit(2);
            }
        },
    }
}

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: cluster <plants.data> [k] [seed]");
            process::exit(2);
        }
    };
    let k = numeric_arg(args.next(), "k", 10usize);
    let seed = numeric_arg(args.next(), "seed", 123u64);

    let clusters = match api::cluster(&path, k, seed, &ClusterConfig::default()) {
        Ok(clusters) => clusters,
        Err(err) => {
            eprintln!("clustering failed: {}", err);
            process::exit(1);
        }
    };

    match report::csv_string(clusters) {
        Ok(csv) => print!("{}", csv),
        Err(err) => {
            eprintln!("rendering failed: {}", err);
            process::exit(1);
        }
    }
}

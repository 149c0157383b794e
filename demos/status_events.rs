use florapart::{lloyd, report, sample, ClusterConfig, PresenceTable, RegionUniverse};

/// Presence table where each entity occupies a prefix of the region chain,
/// so the run takes several passes to settle.
fn chain_data() -> String {
    let mut data = String::new();
    for entity in 1..=20usize {
        data.push_str(&format!("e{:02}", entity));
        for (code, position) in [("r02", 2), ("r04", 4), ("r05", 5), ("r20", 20)] {
            if entity <= position {
                data.push(',');
                data.push_str(code);
            }
        }
        data.push('\n');
    }
    data
}

fn main() {
    env_logger::init();

    let universe = RegionUniverse::new(["r02", "r04", "r05", "r20"]);
    let data = chain_data();
    let table = PresenceTable::from_reader(data.as_bytes()).unwrap();
    let vectors = table.materialize(&universe);

    let labels = sample::sample_centroids(&universe, 2, 7).unwrap();
    println!("Seeded labels: {:?}", labels);

    let config = ClusterConfig::build()
        .universe(universe)
        .init_done(&|partition| {
            println!("Initial assignment:");
            for (label, members) in partition.entries() {
                println!("  {} <- {:?}", label, members);
            }
        })
        .iteration_done(&|partition, iteration, changed| {
            let occupied = partition
                .entries()
                .iter()
                .filter(|(_, members)| !members.is_empty())
                .count();
            println!(
                "Pass {:>2}: {} occupied clusters ({})",
                iteration,
                occupied,
                if changed { "moved" } else { "stable" }
            );
        })
        .build();

    let state = lloyd::calculate(&vectors, labels, &config).unwrap();

    println!("Converged after {} iterations", state.iterations);
    print!(
        "{}",
        report::csv_string(report::partition_rows(&state.partition)).unwrap()
    );
}

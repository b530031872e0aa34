/// Dialogue Report — summarizes a dialogue file and optionally draws lines.
///
/// Usage: dialogue_report <file.csv> [--draw <id> <mood>]... [--seed <n>] [--skip-malformed] [--save]
use npc_dialogue::core::loader::{DialogueLoader, MalformedRowPolicy};
use npc_dialogue::core::store::DialogueStore;
use npc_dialogue::schema::entity::{EntityId, EntityMoodKey};
use npc_dialogue::schema::mood::Mood;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "Usage: dialogue_report <file.csv> [--draw <id> <mood>]... [--seed <n>] [--skip-malformed] [--save]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("{}", USAGE);
        process::exit(0);
    }

    let path = &args[1];
    let mut draws = Vec::new();
    let mut seed = None;
    let mut policy = MalformedRowPolicy::Abort;
    let mut save = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--draw" if i + 2 < args.len() => {
                let id: i32 = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --draw id must be an integer");
                    process::exit(1);
                });
                let mood = Mood::from_label(&args[i + 2]);
                draws.push(EntityMoodKey::new(EntityId(id), mood));
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = Some(args[i].parse::<u64>().unwrap_or_else(|_| {
                    eprintln!("Error: --seed must be a non-negative integer");
                    process::exit(1);
                }));
            }
            "--skip-malformed" => policy = MalformedRowPolicy::Skip,
            "--save" => save = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut store = match DialogueStore::open(path, &DialogueLoader::new(policy)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for key in &draws {
        match store.get_dialogue(*key, &mut rng) {
            Ok(line) => println!("[{}] {}", key, line),
            Err(e) => eprintln!("WARNING: {}", e),
        }
    }

    print_report(&store);

    if save {
        if let Err(e) = store.save() {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
        println!("\nSaved view counts to {}", store.path().display());
    }
}

fn print_report(store: &DialogueStore) {
    let index = store.index();
    println!("\n=== Dialogue Report ===\n");
    println!(
        "{} rows, {} lines, {} buckets",
        store.rows().len(),
        index.len(),
        index.keys().len()
    );

    for key in index.keys() {
        let Some(bucket) = index.bucket(key) else {
            continue;
        };
        let total: u64 = bucket.iter().map(|e| u64::from(e.views)).sum();
        println!("\n{} ({} lines, {} views)", key, bucket.len(), total);
        for entry in bucket {
            println!("  {:>6}  {}", entry.views, entry.text);
        }
    }
}

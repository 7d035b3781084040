//! Walks a skip list through a short insert / remove / lookup session and
//! prints its levels.
//!
//! Run with: `RUST_LOG=strata_collections=trace cargo run --example demo`

use rand::SeedableRng;
use rand::rngs::SmallRng;
use strata_collections::{OrderedMap, OwnedSkipList, RedBlackTree};
use tracing_subscriber::EnvFilter;

fn session<M: OrderedMap<u32, String>>(map: &mut M) {
    map.remove(&10);
    for i in 1..=10 {
        map.insert(i, i.to_string());
    }
    map.remove(&12);

    match map.get(&12) {
        Some(value) => println!("{value}"),
        None => println!("not found!"),
    }
    println!("6 -> {:?}", map.get(&6));
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strata_collections=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2020);

    println!("== skip list (seed {seed})");
    let mut list = OwnedSkipList::new(SmallRng::seed_from_u64(seed));
    session(&mut list);
    print!("{list}");
    println!(
        "height {}, {} keys in {} nodes",
        list.height(),
        list.len(),
        list.node_count()
    );

    println!("== red-black tree");
    let mut tree = RedBlackTree::new();
    session(&mut tree);
    println!("{tree:?}");

    println!(
        "handle sizes: skip list {} bytes, tree {} bytes",
        size_of::<OwnedSkipList<u32, String, SmallRng>>(),
        size_of::<RedBlackTree<u32, String>>()
    );
}

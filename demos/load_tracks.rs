//! Load a directory of GeoJSON track files and print the resulting
//! statistics.
//!
//! Run with: cargo run --example load_tracks --features loader -- <dir> <count>

use std::env;
use std::sync::Arc;

use trail_atlas::{
    compute_stats_now, AtlasConfig, ProgressCallback, TrackRegistry, TrackSourceLoader,
};

#[tokio::main]
async fn main() {
    let mut args = env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| "geojson".to_string());
    let count: u32 = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(114);

    let config = AtlasConfig { track_count: count, ..AtlasConfig::default() };
    let mut registry = TrackRegistry::new(config.expected_track_count());
    let loader = TrackSourceLoader::new(&dir);

    let progress: ProgressCallback = Arc::new(|done, total| {
        if done % 10 == 0 || done == total {
            println!("  {done}/{total} tracks settled");
        }
    });

    println!("Loading tracks from {dir}...");
    let report = loader.load_all(&config, &mut registry, Some(progress)).await;
    println!(
        "Loaded {} tracks, {} failed, registry complete: {}",
        report.loaded, report.failed, report.completed
    );

    match compute_stats_now(&registry, config.yearly_goal_km) {
        Ok(stats) => {
            println!("Total distance: {}", stats.total_display());
            println!("Current year:   {}", stats.yearly_display());
            println!("Goal progress:  {}%", stats.progress_rounded());
        }
        Err(err) => println!("Statistics unavailable: {err}"),
    }
}

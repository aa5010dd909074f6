//! Build a small registry by hand and print the statistics and rendering
//! payloads derived from it.
//!
//! Run with: cargo run --example stats_report

use chrono::{Datelike, TimeZone, Utc};
use trail_atlas::{
    color_gradient, compute_stats, density_points, elevation_stops, track_layer, AtlasConfig,
    Track, TrackGeometry, TrackPoint, TrackRegistry,
};

fn ridge_walk(id: &str, month: u32, points: usize) -> Track {
    let year = Utc::now().year();
    let geometry = TrackGeometry::Path(
        (0..points)
            .map(|i| {
                TrackPoint::with_elevation(
                    22.37 + i as f64 * 0.0008,
                    114.15 + (i as f64 * 0.7).sin() * 0.0004,
                    100.0 + (i as f64 * 0.3).sin() * 80.0,
                )
            })
            .collect(),
    );
    Track::new(
        id,
        format!("Ridge walk {id}"),
        Utc.with_ymd_and_hms(year, month, 10, 8, 0, 0).unwrap(),
        geometry,
    )
}

fn main() {
    let config = AtlasConfig { track_count: 3, extra_track_ids: vec![], ..AtlasConfig::default() };

    let mut registry = TrackRegistry::new(config.expected_track_count());
    registry.register(ridge_walk("1", 1, 240));
    registry.register(ridge_walk("2", 3, 180));
    registry.register(ridge_walk("3", 6, 320));

    let stats = compute_stats(&registry, config.yearly_goal_km, Utc::now()).unwrap();
    println!("Total distance:  {}", stats.total_display());
    println!("Current year:    {}", stats.yearly_display());
    println!("Goal progress:   {}%", stats.progress_rounded());
    println!();

    println!("Monthly breakdown:");
    for (month, km) in stats.monthly_km.iter().enumerate() {
        if *km > 0.0 {
            println!("  month {:>2}: {:.2} km", month + 1, km);
        }
    }
    println!();

    let gradient = color_gradient(
        &config.elevation_low_color,
        &config.elevation_high_color,
        config.elevation_gradient_steps,
    )
    .unwrap();
    println!("Elevation gradient: {}", gradient.join(" "));

    let track = registry.get("1").unwrap();
    let stops = elevation_stops(
        track,
        config.elevation_gradient_steps,
        &config.elevation_low_color,
        &config.elevation_high_color,
    )
    .unwrap();
    println!("Elevation stops for track 1:");
    for stop in &stops {
        println!("  {:>7.1} m -> {}", stop.elevation, stop.color);
    }
    println!();

    let layer = track_layer(track, &config.default_style);
    println!(
        "Layer payload for track 1: {} ({} bytes of JSON)",
        layer.name,
        serde_json::to_string(&layer).unwrap().len()
    );

    let density = density_points(&registry, config.density_sample_interval).unwrap();
    println!("Density cloud: {} points", density.len());
}

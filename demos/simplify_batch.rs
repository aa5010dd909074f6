//! Simplify a batch of dense synthetic tracks in parallel and report the
//! point reduction at a few tolerances.
//!
//! Run with: cargo run --example simplify_batch --features parallel

use trail_atlas::simplify::simplify_batch;
use trail_atlas::{TrackGeometry, TrackPoint};

fn dense_track(seed: f64, points: usize) -> TrackGeometry {
    TrackGeometry::Path(
        (0..points)
            .map(|i| {
                TrackPoint::new(
                    22.30 + seed + i as f64 * 0.0001,
                    114.10 + ((i as f64 + seed * 100.0) * 0.5).sin() * 0.0003,
                )
            })
            .collect(),
    )
}

fn main() {
    let geometries: Vec<TrackGeometry> = (0..20).map(|i| dense_track(i as f64 * 0.01, 4000)).collect();
    let before: usize = geometries.iter().map(|g| g.point_count()).sum();
    println!("{} tracks, {} points before simplification", geometries.len(), before);

    for tolerance in [0.00005, 0.0001, 0.0005] {
        let simplified = simplify_batch(&geometries, tolerance);
        let after: usize = simplified.iter().map(|g| g.point_count()).sum();
        println!(
            "tolerance {:>7}: {:>7} points kept ({:.1}%)",
            tolerance,
            after,
            after as f64 / before as f64 * 100.0
        );
    }
}

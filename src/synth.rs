//! Seeded synthetic flight generator for demos, benchmarks and tests.
//! Produces a rough three-leg cross-country with a final glide back to
//! the start point, so closed rules have something to score.

use crate::geo::GeoPoint;

const KM_PER_DEG_LAT: f64 = 111.195;

#[derive(Debug, Clone)]
pub struct SynthOptions {
    pub seed: u64,
    pub points: usize,
    /// Start position, degrees.
    pub start: GeoPoint,
    /// Average ground speed, km/h.
    pub speed_kmh: f64,
    /// Seconds between fixes.
    pub fix_interval_secs: f64,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            points: 600,
            start: GeoPoint::new(46.8, 8.2),
            speed_kmh: 85.0,
            fix_interval_secs: 10.0,
        }
    }
}

pub fn generate_flight(opts: &SynthOptions) -> Vec<(GeoPoint, f64)> {
    let mut rng = fastrand::Rng::with_seed(opts.seed);
    let mut fixes = Vec::with_capacity(opts.points);

    let leg_headings = [30.0f64, 150.0, 270.0];
    // Last ~15% of the flight glides straight home.
    let outbound_points = (opts.points * 85 / 100).max(1);

    let mut pos = opts.start;
    let base_step_km = opts.speed_kmh * opts.fix_interval_secs / 3600.0;

    for i in 0..opts.points {
        fixes.push((pos, i as f64 * opts.fix_interval_secs));

        let heading = if i < outbound_points {
            let leg = (i * leg_headings.len()) / outbound_points;
            leg_headings[leg] + (rng.f64() - 0.5) * 50.0
        } else {
            bearing_deg(&pos, &opts.start)
        };

        let step_km = base_step_km * (0.7 + rng.f64() * 0.6);
        let rad = heading.to_radians();
        pos = GeoPoint::new(
            pos.lat + step_km * rad.cos() / KM_PER_DEG_LAT,
            pos.lon + step_km * rad.sin() / (KM_PER_DEG_LAT * pos.lat.to_radians().cos()),
        );
    }

    fixes
}

fn bearing_deg(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let dlat = (to.lat - from.lat) * KM_PER_DEG_LAT;
    let dlon = (to.lon - from.lon) * KM_PER_DEG_LAT * from.lat.to_radians().cos();
    dlon.atan2(dlat).to_degrees()
}

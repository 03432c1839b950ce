use zipscope::data::loader::DATASET_FILE;
use zipscope::data::model::Record;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Demo-only category thresholds. Real datasets arrive pre-labeled by the
/// upstream scoring pipeline; these exist only so the synthetic file is
/// self-consistent.
fn category_for(composite: f64) -> &'static str {
    if composite >= 80.0 {
        "Excellent"
    } else if composite >= 65.0 {
        "Good"
    } else if composite >= 50.0 {
        "Average"
    } else if composite >= 35.0 {
        "Below Average"
    } else {
        "Poor"
    }
}

fn clamp_score(v: f64) -> f64 {
    (v.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (city, base quality 0-1, count of zips, rough center)
    let cities: &[(&str, f64, usize, (f64, f64))] = &[
        ("Los Angeles", 0.45, 18, (34.05, -118.25)),
        ("Long Beach", 0.40, 8, (33.77, -118.19)),
        ("Santa Monica", 0.80, 4, (34.02, -118.49)),
        ("Beverly Hills", 0.90, 3, (34.07, -118.40)),
        ("Pasadena", 0.65, 5, (34.15, -118.14)),
        ("Torrance", 0.60, 5, (33.84, -118.34)),
        ("Glendale", 0.55, 5, (34.14, -118.25)),
        ("Pomona", 0.30, 4, (34.06, -117.75)),
        ("Palmdale", 0.25, 4, (34.58, -118.10)),
        ("Burbank", 0.60, 4, (34.18, -118.31)),
    ];

    let mut records = Vec::new();
    let mut zip = 90001u32;

    for &(city, quality, count, (lat, lon)) in cities {
        for _ in 0..count {
            let base = quality * 100.0;
            let density_score = clamp_score(rng.gauss(base, 18.0));
            let transit_score = clamp_score(rng.gauss(base * 0.8, 20.0));
            let income_score = clamp_score(rng.gauss(base, 12.0));
            let education_score = clamp_score(rng.gauss(base, 15.0));
            let housing_score = clamp_score(rng.gauss(base, 14.0));

            // Composite: weighted aggregate of the five components.
            let composite = 0.15 * density_score
                + 0.20 * transit_score
                + 0.25 * income_score
                + 0.20 * education_score
                + 0.20 * housing_score;
            let composite = (composite * 100.0).round() / 100.0;

            let median_income = (20_000.0 + 1_400.0 * income_score
                + rng.gauss(0.0, 6_000.0))
            .max(15_000.0)
            .round();
            let median_home_value = (150_000.0 + 28_000.0 * housing_score
                + rng.gauss(0.0, 90_000.0))
            .max(100_000.0)
            .round();
            let estimated_population =
                (8_000.0 + rng.next_f64() * 70_000.0).round() as u64;
            let population_density = ((1_000.0 + 120.0 * density_score
                + rng.gauss(0.0, 800.0))
            .max(50.0)
                * 10.0)
                .round()
                / 10.0;
            let public_transit_pct =
                ((transit_score * 0.35 + rng.gauss(0.0, 2.0)).clamp(0.0, 100.0) * 10.0).round()
                    / 10.0;
            let education_pct =
                ((education_score * 0.7 + rng.gauss(0.0, 4.0)).clamp(0.0, 100.0) * 10.0).round()
                    / 10.0;

            records.push(Record {
                zip_code: format!("{zip:05}"),
                primary_city: city.to_string(),
                composite_score: composite,
                score_category: category_for(composite).to_string(),
                density_score,
                transit_score,
                income_score,
                education_score,
                housing_score,
                median_income,
                median_home_value,
                estimated_population,
                population_density,
                public_transit_pct,
                education_pct,
                latitude: Some(((lat + rng.gauss(0.0, 0.03)) * 10_000.0).round() / 10_000.0),
                longitude: Some(((lon + rng.gauss(0.0, 0.03)) * 10_000.0).round() / 10_000.0),
            });
            zip += 1;
        }
    }

    let mut writer = csv::Writer::from_path(DATASET_FILE).expect("Failed to create output file");
    for record in &records {
        writer.serialize(record).expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {} zip codes to {DATASET_FILE}", records.len());
}

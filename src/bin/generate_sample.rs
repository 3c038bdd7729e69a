use std::fs::File;

use anyhow::{anyhow, Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Class letter for a B–V color index, roughly following the usual scale.
fn class_for(ci: f64) -> char {
    match ci {
        c if c < -0.3 => 'O',
        c if c < -0.02 => 'B',
        c if c < 0.3 => 'A',
        c if c < 0.58 => 'F',
        c if c < 0.81 => 'G',
        c if c < 1.4 => 'K',
        _ => 'M',
    }
}

/// (color index, absolute magnitude, luminosity class) for one synthetic star.
fn draw_star(rng: &mut SimpleRng) -> (f64, f64, &'static str) {
    let branch = rng.next_f64();
    if branch < 0.85 {
        // Main sequence: brighter as it gets bluer.
        let ci = rng.uniform(-0.33, 1.9);
        (ci, rng.gauss(1.0 + 5.5 * ci, 0.6), "V")
    } else if branch < 0.97 {
        let ci = rng.uniform(0.8, 1.7);
        (ci, rng.gauss(0.5, 0.8), "III")
    } else {
        let ci = rng.uniform(-0.3, 1.8);
        (ci, rng.uniform(-8.5, -5.0), "I")
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "hyg_v42.csv.gz";
    let n_stars = 20_000;

    let file = File::create(output_path).context("creating output file")?;
    let mut writer = csv::Writer::from_writer(GzEncoder::new(file, Compression::default()));
    writer.write_record(["id", "proper", "ci", "absmag", "spect"])?;
    writer.write_record(["0", "Sol", "0.656", "4.850", "G2V"])?;

    let oddities = ["DA2", "C5", "WC8", "L1", "sdB"];

    for id in 1..=n_stars {
        let (mut ci, absmag, lum_class) = draw_star(&mut rng);
        let mut spect = format!(
            "{}{}{}",
            class_for(ci),
            (rng.next_f64() * 10.0) as u32,
            lum_class
        );

        // Data-quality noise the cleaner has to cope with.
        let roll = rng.next_f64();
        let mut ci_text = format!("{ci:.3}");
        if roll < 0.03 {
            ci_text.clear();
        } else if roll < 0.04 {
            ci = if rng.next_f64() < 0.5 { -0.8 } else { 3.5 };
            ci_text = format!("{ci:.3}");
        } else if roll < 0.06 {
            spect = oddities[(rng.next_u64() % oddities.len() as u64) as usize].to_string();
        } else if roll < 0.08 {
            spect.clear();
        }

        writer.write_record([
            id.to_string(),
            String::new(),
            ci_text,
            format!("{absmag:.3}"),
            spect,
        ])?;
    }

    let encoder = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV writer: {}", e.error()))?;
    encoder.finish().context("finishing gzip stream")?;

    println!("Wrote {} stars to {output_path}", n_stars + 1);
    Ok(())
}

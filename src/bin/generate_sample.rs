use anyhow::{Context, Result};
use serde::Serialize;

const ROLES: [(&str, f64); 8] = [
    ("Data Scientist", 130_000.0),
    ("Data Engineer", 125_000.0),
    ("Data Analyst", 85_000.0),
    ("Machine Learning Engineer", 150_000.0),
    ("Analytics Engineer", 115_000.0),
    ("Research Scientist", 160_000.0),
    ("Data Architect", 145_000.0),
    ("Business Intelligence Analyst", 80_000.0),
];
const SENIORITY: [(&str, f64); 4] = [
    ("junior", 0.6),
    ("pleno", 0.85),
    ("senior", 1.1),
    ("executivo", 1.5),
];
const CONTRACTS: [&str; 4] = ["integral", "contrato", "parcial", "freelancer"];
const COMPANY_SIZES: [&str; 3] = ["pequena", "media", "grande"];
const REMOTE: [&str; 3] = ["presencial", "remoto", "hibrido"];
const COUNTRIES: [(&str, f64); 8] = [
    ("USA", 1.0),
    ("CAN", 0.85),
    ("GBR", 0.8),
    ("DEU", 0.8),
    ("ESP", 0.6),
    ("BRA", 0.45),
    ("IND", 0.35),
    ("AUS", 0.85),
];
const YEARS: [i64; 4] = [2022, 2023, 2024, 2025];

/// One output row, using the input column names the dashboard expects.
#[derive(Serialize)]
struct SampleRow<'a> {
    ano: i64,
    senioridade: &'a str,
    contrato: &'a str,
    tamanho_empresa: &'a str,
    cargo: &'a str,
    usd: f64,
    remoto: &'a str,
    residencia_iso3: &'a str,
}

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = 2_000;

    let output_path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for _ in 0..rows {
        let year = *rng.pick(&YEARS);
        let &(seniority, level) = rng.pick(&SENIORITY);
        let contract = *rng.pick(&CONTRACTS);
        let size = *rng.pick(&COMPANY_SIZES);
        let &(role, base) = rng.pick(&ROLES);
        let remote = *rng.pick(&REMOTE);
        let &(country, factor) = rng.pick(&COUNTRIES);

        let mean = base * level * factor;
        let salary = rng.gauss(mean, mean * 0.15).max(10_000.0).round();

        writer.serialize(SampleRow {
            ano: year,
            senioridade: seniority,
            contrato: contract,
            tamanho_empresa: size,
            cargo: role,
            usd: salary,
            remoto: remote,
            residencia_iso3: country,
        })?;
    }
    writer.flush().context("flushing sample CSV")?;

    println!("Wrote {rows} salary records to {output_path}");
    Ok(())
}

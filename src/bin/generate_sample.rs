use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use heart_eda::columns::{CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

/// Write a synthetic processed training set with the columns heart-eda expects.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of patient rows
    #[arg(long, default_value_t = 300)]
    rows: usize,
    /// Output CSV path
    #[arg(long, default_value = "data/processed/train_df.csv")]
    out: PathBuf,
    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// SplitMix64 stream with a cached Marsaglia polar normal.
struct PatientRng {
    state: u64,
    spare: Option<f64>,
}

impl PatientRng {
    fn new(seed: u64) -> Self {
        PatientRng {
            state: seed,
            spare: None,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        if let Some(z) = self.spare.take() {
            return mean + sd * z;
        }
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let k = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * k);
                return mean + sd * u * k;
            }
        }
    }

    fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        let idx = (self.uniform() * options.len() as f64) as usize;
        options[idx.min(options.len() - 1)]
    }
}

const CHEST_PAIN: [&str; 4] = [
    "typical angina",
    "atypical angina",
    "non-anginal pain",
    "asymptomatic",
];
const ECG: [&str; 3] = [
    "normal",
    "ST-T wave abnormality",
    "left ventricular hypertrophy",
];
const SLOPE: [&str; 3] = ["upsloping", "flat", "downsloping"];
const THAL: [&str; 3] = ["normal", "fixed defect", "reversable defect"];

/// Fraction of rows written without a Thalassemia value.
const MISSING_THAL_RATE: f64 = 0.02;

fn patient(rng: &mut PatientRng) -> Vec<String> {
    let diseased = rng.chance(0.45);
    let shift = if diseased { 1.0 } else { 0.0 };

    let age = rng.normal(54.0 + 3.0 * shift, 9.0).clamp(29.0, 77.0).round();
    let bp = rng.normal(131.0 + 4.0 * shift, 17.0).clamp(94.0, 200.0).round();
    let chol = rng.normal(246.0 + 6.0 * shift, 50.0).clamp(126.0, 564.0).round();
    // older patients reach lower peak heart rates
    let hr = (rng.normal(205.0 - 0.95 * age - 18.0 * shift, 12.0)).clamp(71.0, 202.0).round();
    let oldpeak = rng.normal(0.6 + 1.0 * shift, 0.9).clamp(0.0, 6.2);
    let vessels = (rng.normal(0.4 + 0.9 * shift, 0.8).round()).clamp(0.0, 3.0);

    let sex = if rng.chance(0.68) { "male" } else { "female" };
    let chest_pain = if diseased && rng.chance(0.6) {
        "asymptomatic"
    } else {
        rng.pick(&CHEST_PAIN)
    };
    let fbs = if rng.chance(0.15) { "true" } else { "false" };
    let ecg = rng.pick(&ECG);
    let angina = if rng.chance(0.2 + 0.35 * shift) { "yes" } else { "no" };
    let slope = rng.pick(&SLOPE);
    let thal = if rng.chance(MISSING_THAL_RATE) {
        ""
    } else if diseased && rng.chance(0.6) {
        "reversable defect"
    } else {
        rng.pick(&THAL)
    };

    vec![
        format!("{age}"),
        format!("{bp}"),
        format!("{chol}"),
        format!("{hr}"),
        format!("{oldpeak:.1}"),
        format!("{vessels}"),
        sex.to_string(),
        chest_pain.to_string(),
        fbs.to_string(),
        ecg.to_string(),
        angina.to_string(),
        slope.to_string(),
        thal.to_string(),
        if diseased { "1" } else { "0" }.to_string(),
    ]
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = PatientRng::new(args.seed);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let header = NUMERIC_COLUMNS
        .iter()
        .chain(CATEGORICAL_COLUMNS.iter())
        .chain(std::iter::once(&"Diagnosis"));
    writer.write_record(header)?;
    for _ in 0..args.rows {
        writer.write_record(patient(&mut rng))?;
    }
    writer.flush()?;

    println!("Wrote {} patients to {}", args.rows, args.out.display());
    Ok(())
}

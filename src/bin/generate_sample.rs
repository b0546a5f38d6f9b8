use anyhow::{Context, Result};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn clamp_scale(v: f64) -> f64 {
    (v.clamp(1.0, 10.0) * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let platforms = ["Instagram", "TikTok", "Facebook", "X", "YouTube", "Snapchat"];
    let genders = ["Female", "Male", "Other"];
    // Heavier-usage platforms get a higher screen-time baseline.
    let screen_base = |platform: &str| match platform {
        "TikTok" => 4.8,
        "Instagram" => 4.2,
        "YouTube" => 3.8,
        "Snapchat" => 3.2,
        "X" => 2.8,
        _ => 2.2,
    };

    let output_path = "Mental_Health_and_Social_Media_Balance_Dataset.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Age",
        "Gender",
        "Social_Media_Platform",
        "Daily_Screen_Time(hrs)",
        "Sleep_Quality(1-10)",
        "Stress_Level(1-10)",
        "Happiness_Index(1-10)",
        "Exercise_Frequency(week)",
    ])?;

    let n_rows = 500;
    for _ in 0..n_rows {
        let age = 13 + (rng.next_u64() % 52) as u32; // 13..=64
        let gender = *rng.pick(&genders);
        let platform = *rng.pick(&platforms);

        let screen_time = (rng.gauss(screen_base(platform), 1.2).clamp(0.3, 12.0) * 10.0).round() / 10.0;
        let exercise = rng.gauss(2.5, 1.5).clamp(0.0, 7.0).round();

        // Wellbeing scores drift down with screen time and up with exercise.
        let sleep = clamp_scale(rng.gauss(9.0 - 0.35 * screen_time, 1.0));
        let stress = clamp_scale(rng.gauss(2.8 + 0.55 * screen_time - 0.3 * exercise, 1.2));
        let happiness = clamp_scale(rng.gauss(8.2 - 0.45 * screen_time + 0.25 * exercise, 1.1));

        writer.write_record([
            age.to_string(),
            gender.to_string(),
            platform.to_string(),
            format!("{screen_time}"),
            format!("{sleep}"),
            format!("{stress}"),
            format!("{happiness}"),
            format!("{exercise}"),
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {n_rows} survey rows to {output_path}");
    Ok(())
}

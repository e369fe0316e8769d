//! Reference generators the CLI can feed into a suite.

use std::io::BufRead;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use randsuite_core::{GeneratorError, UniformSource};
use sha2::{Digest, Sha256};

/// 2^-53: maps the top 53 bits of a u64 onto [0, 1).
const UNIT: f64 = 1.0 / (1u64 << 53) as f64;

fn unit_from_bits(bits: u64) -> f64 {
    (bits >> 11) as f64 * UNIT
}

/// Generators selectable on the command line.
pub const GENERATORS: &[(&str, &str)] = &[
    ("std", "rand StdRng, seeded with --seed or from the OS"),
    ("thread", "rand thread-local generator"),
    ("os", "operating system randomness via getrandom"),
    ("sha256", "SHA-256 in counter mode over --seed"),
    ("constant", "always --value"),
    ("alternating", "0.0, --value, 0.0, --value, ..."),
    ("stdin", "one float per line on standard input"),
];

/// Build the named generator.
pub fn make_source(
    name: &str,
    seed: Option<u64>,
    value: f64,
) -> Result<Box<dyn UniformSource>, String> {
    let source: Box<dyn UniformSource> = match name {
        "std" => Box::new(StdSource::new(seed)),
        "thread" => Box::new(ThreadSource),
        "os" => Box::new(OsSource),
        "sha256" => Box::new(Sha256Source::new(seed.unwrap_or(0))),
        "constant" => Box::new(ConstantSource(value)),
        "alternating" => Box::new(AlternatingSource::new(value)),
        "stdin" => Box::new(LineSource::new(std::io::stdin().lock(), "stdin")),
        other => return Err(format!("unknown generator '{other}'")),
    };
    Ok(source)
}

pub struct StdSource {
    rng: StdRng,
}

impl StdSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl UniformSource for StdSource {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        Ok(self.rng.random::<f64>())
    }

    fn name(&self) -> &str {
        "std"
    }
}

pub struct ThreadSource;

impl UniformSource for ThreadSource {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        Ok(rand::rng().random::<f64>())
    }

    fn name(&self) -> &str {
        "thread"
    }
}

pub struct OsSource;

impl UniformSource for OsSource {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        let mut buf = [0u8; 8];
        getrandom::fill(&mut buf).map_err(|e| format!("getrandom: {e}"))?;
        Ok(unit_from_bits(u64::from_le_bytes(buf)))
    }

    fn name(&self) -> &str {
        "os"
    }
}

/// SHA-256(seed || counter), four values per digest.
pub struct Sha256Source {
    seed: u64,
    counter: u64,
    pending: Vec<f64>,
}

impl Sha256Source {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            counter: 0,
            pending: Vec::with_capacity(4),
        }
    }

    fn refill(&mut self) {
        let digest = Sha256::new()
            .chain_update(self.seed.to_le_bytes())
            .chain_update(self.counter.to_le_bytes())
            .finalize();
        self.counter = self.counter.wrapping_add(1);
        // Reverse so pop() yields the words in digest order.
        for chunk in digest.chunks_exact(8).rev() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.pending.push(unit_from_bits(u64::from_le_bytes(word)));
        }
    }
}

impl UniformSource for Sha256Source {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending
            .pop()
            .ok_or_else(|| "sha256 generator produced no output".into())
    }

    fn name(&self) -> &str {
        "sha256"
    }
}

pub struct ConstantSource(pub f64);

impl UniformSource for ConstantSource {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

pub struct AlternatingSource {
    value: f64,
    odd: bool,
}

impl AlternatingSource {
    pub fn new(value: f64) -> Self {
        Self { value, odd: false }
    }
}

impl UniformSource for AlternatingSource {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        let v = if self.odd { self.value } else { 0.0 };
        self.odd = !self.odd;
        Ok(v)
    }

    fn name(&self) -> &str {
        "alternating"
    }
}

/// Newline-separated floats from a reader. Blank lines are skipped.
pub struct LineSource<R> {
    reader: R,
    label: &'static str,
    line: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, label: &'static str) -> Self {
        Self {
            reader,
            label,
            line: String::new(),
        }
    }
}

impl<R: BufRead> UniformSource for LineSource<R> {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(format!("{}: input ended", self.label).into());
            }
            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            return text
                .parse::<f64>()
                .map_err(|e| format!("{}: '{text}' is not a number: {e}", self.label).into());
        }
    }

    fn name(&self) -> &str {
        self.label
    }
}

//! Arcfour keystream used as the generator's random source
//!
//! The seed *is* the initial 256-byte state permutation; there is no key
//! schedule. Identical seed files reproduce identical resource schedules.

use crate::core::error::{BotError, Result};

#[derive(Clone)]
pub struct Arcfour {
    i: u8,
    j: u8,
    s: [u8; 256],
}

impl std::fmt::Debug for Arcfour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arcfour")
            .field("i", &self.i)
            .field("j", &self.j)
            .finish_non_exhaustive()
    }
}

impl Arcfour {
    /// Seed must be exactly 256 bytes forming a permutation of 0..=255
    pub fn new(seed: &[u8]) -> Result<Self> {
        let s: [u8; 256] = seed.try_into().map_err(|_| {
            BotError::Generator(format!("seed must be 256 bytes, got {}", seed.len()))
        })?;

        let mut seen = [false; 256];
        for &b in &s {
            if seen[b as usize] {
                return Err(BotError::Generator(format!(
                    "seed is not a permutation: byte {} repeats",
                    b
                )));
            }
            seen[b as usize] = true;
        }

        Ok(Self { i: 0, j: 0, s })
    }

    /// Uniform-ish integer in `0..max` (little-endian u64 modulo `max`)
    pub fn next(&mut self, max: u64) -> Result<u64> {
        if max == 0 {
            return Err(BotError::Generator("random range is empty".into()));
        }
        let mut bytes = [0u8; 8];
        for b in bytes.iter_mut() {
            *b = self.next_byte();
        }
        Ok(u64::from_le_bytes(bytes) % max)
    }

    /// Integer in `min..max`
    pub fn next_range(&mut self, min: u64, max: u64) -> Result<u64> {
        let span = max
            .checked_sub(min)
            .ok_or_else(|| BotError::Generator(format!("invalid range {}..{}", min, max)))?;
        Ok(self.next(span)? + min)
    }

    /// Float in `[0, 1)` from 32 bits of keystream
    pub fn next_double(&mut self) -> f64 {
        let mut bytes = [0u8; 4];
        for b in bytes.iter_mut() {
            *b = self.next_byte();
        }
        u32::from_le_bytes(bytes) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Normal sample with mean `mu` and deviation `sigma` (Box-Muller)
    pub fn next_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let x = self.next_double();
        let y = self.next_double();
        mu + sigma * box_muller(x, y)
    }

    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.s[self.i as usize]);
        self.s.swap(self.i as usize, self.j as usize);
        let k = self.s[self.i as usize].wrapping_add(self.s[self.j as usize]);
        self.s[k as usize]
    }
}

/// Standard normal from two uniforms in `[0, 1)`; `x == 0` is clamped so the
/// sample stays finite
fn box_muller(x: f64, y: f64) -> f64 {
    let x = x.max(f64::MIN_POSITIVE);
    (-2.0 * x.ln()).sqrt() * (2.0 * std::f64::consts::PI * y).cos()
}

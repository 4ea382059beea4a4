mod construct;
mod query;

use criterion::{criterion_group, criterion_main};

criterion_main!(benches);
criterion_group!(benches, construct::bench, query::bench);

/// Linear-feedback shift register based PRNG.
///
/// Generates 65,535 unique values before cycling.
#[derive(Debug, Clone)]
pub struct Lfsr(u16);

impl Default for Lfsr {
    fn default() -> Self {
        Self(42)
    }
}

impl Lfsr {
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u16 {
        let lsb = self.0 & 1;
        self.0 >>= 1;
        if lsb == 1 {
            self.0 ^= 0xD008;
        }
        assert_ne!(self.0, 42, "LFSR rollover");
        self.0
    }

    /// Return a valid `(low, high)` interval with random bounds.
    pub fn next_interval(&mut self) -> (u16, u16) {
        let a = self.next();
        let b = self.next();
        (a.min(b), a.max(b))
    }
}

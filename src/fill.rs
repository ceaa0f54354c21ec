//! Fill pass over an acquired region: zero or pseudo-random words, either
//! one word per page or every word.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::region::{Region, WORD};
use crate::sys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Zero,
    Random,
}

/// Write `pattern` across the whole region.
///
/// Sparse stepping touches the first word of each page, which is enough to
/// force physical backing for the page without writing every byte. Dense
/// mode, or a host that will not reveal its page size, covers every word.
pub fn fill(region: &mut Region, pattern: Pattern, dense: bool) {
    let step = if dense {
        WORD
    } else {
        sys::page_size().unwrap_or(WORD)
    };

    match pattern {
        // One bulk memset beats a word loop when every word is covered anyway.
        Pattern::Zero if step == WORD => region.zero(),
        Pattern::Zero => write_words(region, step, || 0),
        Pattern::Random => {
            let mut lcg = Lcg::from_clock();
            write_words(region, step, move || lcg.next_word());
        }
    }
}

/// Stride over the region writing one word per step. A word is written only
/// if it fits entirely below the end boundary.
fn write_words(region: &mut Region, step: usize, mut word: impl FnMut() -> u32) {
    let end = region.len();
    let mut offset = 0;
    while offset + WORD <= end {
        region.write_word(offset, word());
        offset += step;
    }
}

/// The classic minimal-standard linear congruential generator. Quality does
/// not matter here, throughput does.
struct Lcg {
    state: u64,
}

impl Lcg {
    const MULTIPLIER: u64 = 1_103_515_245;
    const INCREMENT: u64 = 12_345;

    fn from_clock() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Lcg {
            state: u64::from(now.subsec_micros()).wrapping_mul(now.as_secs()),
        }
    }

    fn next_word(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        (self.state % u64::from(u32::MAX)) as u32
    }
}

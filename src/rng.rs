// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    SeedableRng,
};

/// Random draws the rain needs: a chance roll and a uniform pick.
pub trait Entropy {
    /// Uniform sample in `[0, 1)`.
    fn chance(&mut self) -> f32;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

pub struct StdEntropy {
    mt: StdRng,
    rand_chance: Uniform<f32>,
}

impl StdEntropy {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    fn with_rng(mt: StdRng) -> Self {
        Self {
            mt,
            rand_chance: Uniform::new(0.0, 1.0).expect("valid range"),
        }
    }
}

impl Entropy for StdEntropy {
    fn chance(&mut self) -> f32 {
        self.rand_chance.sample(&mut self.mt)
    }

    fn pick(&mut self, len: usize) -> usize {
        match Uniform::new(0usize, len.max(1)) {
            Ok(dist) => dist.sample(&mut self.mt),
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
pub mod scripted {
    use std::collections::VecDeque;

    use super::Entropy;

    /// Replays queued chance rolls, then falls back to a fixed value.
    /// Picks always return `pick_value % len`.
    pub struct ScriptedEntropy {
        chances: VecDeque<f32>,
        fallback: f32,
        pick_value: usize,
    }

    impl ScriptedEntropy {
        pub fn constant(fallback: f32) -> Self {
            Self {
                chances: VecDeque::new(),
                fallback,
                pick_value: 0,
            }
        }

        pub fn push(&mut self, v: f32) {
            self.chances.push_back(v);
        }
    }

    impl Entropy for ScriptedEntropy {
        fn chance(&mut self) -> f32 {
            self.chances.pop_front().unwrap_or(self.fallback)
        }

        fn pick(&mut self, len: usize) -> usize {
            self.pick_value % len.max(1)
        }
    }
}

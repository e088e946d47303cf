//! Cities and tours for the step visualizer.
//!
//! # Governing Equation
//!
//! ```text
//! Tour Length:  L(π) = Σᵢ d(π(i), π(i+1)) + d(π(n), π(1))
//! ```
//!
//! Distances are plain Euclidean on the `[0, 100)²` layout plane; there is no
//! geographic or weighted edge model.

use serde::{Deserialize, Serialize};

use crate::engine::rng::GalaxyRng;

/// Side length of the square cities are laid out in.
pub const LAYOUT_EXTENT: f64 = 100.0;

/// A city on the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Index of the city within its run.
    pub id: usize,
    /// Horizontal coordinate in `[0, 100)`.
    pub x: f64,
    /// Vertical coordinate in `[0, 100)`.
    pub y: f64,
}

impl City {
    /// Create a new city.
    #[must_use]
    pub const fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another city.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Generate `count` cities uniformly over the layout square.
#[must_use]
pub fn generate_cities(rng: &mut GalaxyRng, count: usize) -> Vec<City> {
    (0..count)
        .map(|id| {
            let x = rng.gen_range_f64(0.0, LAYOUT_EXTENT);
            let y = rng.gen_range_f64(0.0, LAYOUT_EXTENT);
            City::new(id, x, y)
        })
        .collect()
}

/// An ordered visiting sequence over city indices, implicitly closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wrap an existing visiting order.
    #[must_use]
    pub fn new(order: Vec<usize>) -> Self {
        Self(order)
    }

    /// The tour `0, 1, …, n-1`.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Uniformly random permutation of `[0, n)` (Fisher-Yates).
    #[must_use]
    pub fn random(rng: &mut GalaxyRng, n: usize) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = rng.gen_index(i + 1);
            order.swap(i, j);
        }
        Self(order)
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tour has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// City indices in visiting order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// City index visited at position `i`, wrapping around the tour.
    #[must_use]
    pub fn stop_at(&self, i: usize) -> Option<usize> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0[i % self.0.len()])
    }

    /// Whether every index in `[0, n)` is visited exactly once.
    #[must_use]
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &idx in &self.0 {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Cyclic Euclidean length, last stop wrapping back to the first.
    ///
    /// Tours shorter than two stops have length zero. Indices outside `cities`
    /// are skipped.
    #[must_use]
    pub fn distance(&self, cities: &[City]) -> f64 {
        let n = self.0.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .filter_map(|i| {
                let a = cities.get(self.0[i])?;
                let b = cities.get(self.0[(i + 1) % n])?;
                Some(a.distance_to(b))
            })
            .sum()
    }

    /// Same cycle started `k` stops later.
    #[must_use]
    pub fn rotated(&self, k: usize) -> Self {
        let mut order = self.0.clone();
        if !order.is_empty() {
            let len = order.len();
            order.rotate_left(k % len);
        }
        Self(order)
    }

    /// Same cycle walked in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self(order)
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every random tour visits each city exactly once.
        #[test]
        fn prop_random_tour_is_bijection(seed in 0u64..u64::MAX, n in 0usize..64) {
            let mut rng = GalaxyRng::new(seed);
            let tour = Tour::random(&mut rng, n);
            prop_assert!(tour.is_permutation_of(n));
        }

        /// Rotating the start does not change the cyclic length.
        #[test]
        fn prop_rotation_invariant(seed in 0u64..u64::MAX, n in 2usize..30, k in 0usize..60) {
            let mut rng = GalaxyRng::new(seed);
            let cities = generate_cities(&mut rng, n);
            let tour = Tour::random(&mut rng, n);
            let a = tour.distance(&cities);
            let b = tour.rotated(k).distance(&cities);
            prop_assert!((a - b).abs() < 1e-9 * a.max(1.0));
        }

        /// Walking the cycle backwards does not change its length.
        #[test]
        fn prop_reversal_invariant(seed in 0u64..u64::MAX, n in 2usize..30) {
            let mut rng = GalaxyRng::new(seed);
            let cities = generate_cities(&mut rng, n);
            let tour = Tour::random(&mut rng, n);
            let a = tour.distance(&cities);
            let b = tour.reversed().distance(&cities);
            prop_assert!((a - b).abs() < 1e-9 * a.max(1.0));
        }
    }
}

//! Seeded randomness helpers
//!
//! All randomness flows through a [`GameRng`] owned by the simulation, so a
//! seed reproduces a whole game.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Color, Coords, RaceType};

/// The simulation's deterministic RNG
pub type GameRng = ChaCha8Rng;

/// Uniform integer in `0..n`; `n` must be non-zero
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, n: usize) -> usize {
    rng.gen_range(0..n)
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

pub fn random_race_type<R: Rng + ?Sized>(rng: &mut R) -> RaceType {
    RaceType::ALL[random_int(rng, RaceType::ALL.len())]
}

/// Random cell inside part `part` of `parts` equal vertical strips.
///
/// The last strip absorbs the remainder columns. Strips never overlap, so
/// races placed with distinct `part` values never share a home cell.
pub fn random_cell_in_part<R: Rng + ?Sized>(
    rng: &mut R,
    part: u32,
    parts: u32,
    width: u32,
    height: u32,
) -> Coords {
    let strip = (width / parts.max(1)).max(1);
    let start = (part * strip).min(width.saturating_sub(1));
    let end = if part + 1 >= parts { width } else { (start + strip).min(width) };

    let x = rng.gen_range(start..end.max(start + 1));
    let y = rng.gen_range(0..height.max(1));
    Coords::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_cell_in_part_stays_in_strip() {
        let mut rng = GameRng::seed_from_u64(42);
        for _ in 0..200 {
            let c = random_cell_in_part(&mut rng, 1, 4, 12, 10);
            assert!((3..6).contains(&c.x), "x = {} outside strip", c.x);
            assert!(c.y < 10);
        }
    }

    #[test]
    fn test_last_part_takes_remainder() {
        let mut rng = GameRng::seed_from_u64(7);
        let mut saw_remainder = false;
        for _ in 0..500 {
            let c = random_cell_in_part(&mut rng, 2, 3, 11, 4);
            assert!((6..11).contains(&c.x));
            saw_remainder |= c.x == 10;
        }
        assert!(saw_remainder);
    }

    #[test]
    fn test_same_seed_same_colors() {
        let mut a = GameRng::seed_from_u64(99);
        let mut b = GameRng::seed_from_u64(99);
        assert_eq!(random_color(&mut a), random_color(&mut b));
    }
}

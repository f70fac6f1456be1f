//! Dice pool resolution
//!
//! A pool succeeds if ANY die lands on a success face. Dice are never summed.

use rand::Rng;

use crate::combat::constants::{DIE_SIDES, HIT_THRESHOLD};

/// Roll `count` independent dice
pub fn roll_pool<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<u8> {
    (0..count).map(|_| rng.gen_range(1..=DIE_SIDES)).collect()
}

/// Does a single face count as a success?
pub fn is_success(face: u8) -> bool {
    face >= HIT_THRESHOLD
}

/// Does the pool contain at least one success?
pub fn any_success(rolls: &[u8]) -> bool {
    rolls.iter().any(|&face| is_success(face))
}

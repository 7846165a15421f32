//! Seeded random streams for the game simulator.
use std::cell::{RefCell, RefMut};

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;

/// Deterministic bundle of RNG streams, one per simulation concern.
///
/// Each stream is seeded from the same user seed with its own domain tag, so
/// adding draws to one concern never shifts the others.
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    drive: RefCell<CountingRng<SmallRng>>,
    box_score: RefCell<CountingRng<SmallRng>>,
    players: RefCell<CountingRng<SmallRng>>,
}

impl SimRng {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            drive: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"drive"))),
            box_score: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"box_score"))),
            players: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"players"))),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Play-by-play stream: clock, possession, yardage and scoring.
    #[must_use]
    pub fn drive(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.drive.borrow_mut()
    }

    /// Team yardage and turnovers.
    #[must_use]
    pub fn box_score(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.box_score.borrow_mut()
    }

    /// Individual passing touchdowns and interceptions.
    #[must_use]
    pub fn players(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.players.borrow_mut()
    }

    /// Total draws across all streams.
    #[must_use]
    pub fn draws(&self) -> u64 {
        [&self.drive, &self.box_score, &self.players]
            .iter()
            .map(|stream| stream.borrow().draws())
            .sum()
    }
}

/// Counting wrapper recording how many draws a stream served.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// HMAC-SHA256 of the domain tag keyed by the seed, truncated to 64 bits.
fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length; the error arm is unreachable.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore};

    #[test]
    fn streams_use_domain_hmac() {
        let seed = 0x5EA5_0000_u64;
        let bundle = SimRng::from_user_seed(seed);

        let mut drive = bundle.drive();
        let mut expected = SmallRng::seed_from_u64(derive_stream_seed(seed, b"drive"));
        assert_eq!(drive.next_u32(), expected.next_u32());
        assert_eq!(drive.draws(), 1);
        drop(drive);

        assert_ne!(
            derive_stream_seed(seed, b"drive"),
            derive_stream_seed(seed, b"box_score"),
            "domain tags must derive distinct seeds"
        );
        assert_eq!(bundle.draws(), 1);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SimRng::from_user_seed(42);
        let b = SimRng::from_user_seed(42);
        let xs: Vec<u32> = (0..5).map(|_| a.players().gen_range(0..100)).collect();
        let ys: Vec<u32> = (0..5).map(|_| b.players().gen_range(0..100)).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), 42);
    }
}

//! Mission agent: fly a fixed route of regions on consecutive ticks.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use aloft_core::{Region, TickId, Value};
use aloft_market::{Agent, BidMarket};

/// Bids for a fixed route: leg `i` occupies `legs[i]` at `now + 1 + i`.
///
/// The agent waits until every leg of the route is simultaneously
/// available starting next tick, then bids the same randomized price on
/// all of them. It stops once the whole route is acquired, or when the
/// optional deadline passes without success.
///
/// Constructed via [`MissionAgent::builder`].
#[derive(Debug)]
pub struct MissionAgent<R: Region> {
    legs: Vec<R>,
    acquired: usize,
    price_base: Value,
    deadline: Option<TickId>,
}

/// Builder for [`MissionAgent`].
///
/// Required field: `legs` (at least one region).
pub struct MissionAgentBuilder<R: Region> {
    legs: Vec<R>,
    price_base: Value,
    deadline: Option<TickId>,
}

impl<R: Region> MissionAgent<R> {
    /// Create a new builder for configuring a `MissionAgent`.
    pub fn builder() -> MissionAgentBuilder<R> {
        MissionAgentBuilder {
            legs: Vec::new(),
            price_base: 1.0,
            deadline: None,
        }
    }

    /// Number of route legs acquired so far.
    pub fn acquired(&self) -> usize {
        self.acquired
    }

    /// Whether the whole route is held.
    pub fn complete(&self) -> bool {
        self.acquired == self.legs.len()
    }
}

impl<R: Region> MissionAgentBuilder<R> {
    /// Set the route: leg `i` is flown at `now + 1 + i`.
    pub fn legs(mut self, legs: impl IntoIterator<Item = R>) -> Self {
        self.legs = legs.into_iter().collect();
        self
    }

    /// Set the base price; each round's bid is `base + U(0, 1)`
    /// (default: 1.0).
    pub fn price_base(mut self, base: Value) -> Self {
        self.price_base = base;
        self
    }

    /// Abandon the mission once `deadline` is reached (default: never).
    pub fn deadline(mut self, deadline: TickId) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Build the agent, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty or `price_base` is negative or
    /// not finite.
    pub fn build(self) -> Result<MissionAgent<R>, String> {
        if self.legs.is_empty() {
            return Err("legs must contain at least one region".to_string());
        }
        if !self.price_base.is_finite() || self.price_base < 0.0 {
            return Err(format!(
                "price_base must be finite and >= 0, got {}",
                self.price_base
            ));
        }
        Ok(MissionAgent {
            legs: self.legs,
            acquired: 0,
            price_base: self.price_base,
            deadline: self.deadline,
        })
    }
}

impl<R: Region> Agent<R> for MissionAgent<R> {
    fn bid_phase(&mut self, now: TickId, market: &mut BidMarket<'_, R>, seed: u64) {
        if self.complete() {
            return;
        }
        let all_available = self
            .legs
            .iter()
            .enumerate()
            .all(|(i, leg)| market.status(leg, now.offset(1 + i as u64)).is_available());
        if !all_available {
            return;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let price = self.price_base + rng.gen::<Value>();
        for (i, leg) in self.legs.iter().enumerate() {
            market.bid(leg, now.offset(1 + i as u64), price);
        }
    }

    fn on_bought(&mut self, _location: &R, _time: TickId, _value: Value) {
        self.acquired += 1;
    }

    fn stop(&mut self, now: TickId, _seed: u64) -> bool {
        if self.complete() {
            return true;
        }
        match self.deadline {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}

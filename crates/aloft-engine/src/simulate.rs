//! The round driver: the per-tick bid → trade → ask → stop pipeline.
//!
//! [`simulate`] owns all run state — order-book, registry, and a single
//! seeded PRNG — inside its own call frame; there is no module-level
//! state, so concurrent runs never interfere. Each tick proceeds:
//!
//! 1. status callback (if installed);
//! 2. admission: the factory's new agents join the registry;
//! 3. bid phase: each active agent, ascending by ID, bids through a
//!    borrowed [`BidMarket`];
//! 4. trade clearing: queued keys clear in bid-insertion order —
//!    emit the trade event, notify buyer and (when still addressable)
//!    seller, then mark the permit in use and extend its history;
//! 5. ask phase: each active agent queues re-listings through a borrowed
//!    [`AskMarket`]; listings apply only after the whole phase;
//! 6. stop evaluation: retiring agents get [`on_finished`], survivors
//!    form the new active list, and the registry compacts;
//! 7. window advance;
//! 8. the stop criterion decides whether another round begins.
//!
//! # Determinism
//!
//! The PRNG is drawn exactly once per factory invocation and once per
//! agent `bid_phase`, `ask_phase`, and `stop` call, in pipeline order.
//! Two runs with the same seed, factory, and (deterministic) agents
//! produce identical trade sequences and stop at the same tick.
//!
//! [`on_finished`]: aloft_market::Agent::on_finished

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use aloft_core::{AgentId, Permit, PrivateStatus, Region, TradeInfo, TradeValue};
use aloft_market::{apply_asks, AskMarket, AskOrder, BidMarket, OrderBook};

use crate::opts::{SimulationOpts, StopCriterion};
use crate::registry::AgentRegistry;

/// Run a first-price sealed-bid permit auction to completion.
///
/// Consumes the options; all run state lives and dies within this call.
/// Returns when the configured [`StopCriterion`] is met. A panic from an
/// agent callback propagates out unmodified, aborting the run with no
/// rollback.
pub fn simulate<R: Region>(mut opts: SimulationOpts<R>) {
    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut registry: AgentRegistry<R> = AgentRegistry::new();
    let mut book: OrderBook<R> = OrderBook::new(opts.time_window);

    loop {
        let now = book.now();

        if let Some(callback) = opts.status_callback.as_mut() {
            callback(now, &registry, &book);
        }

        // Admission
        if let Some(factory) = opts.factory.as_mut() {
            let seed = rng.gen();
            for agent in factory(now, seed) {
                registry.insert(agent);
            }
        }

        // Bid phase: the roster is snapshotted before iteration, so every
        // agent admitted this tick participates and ordering is by ID.
        let mut bids: Vec<Permit<R>> = Vec::new();
        let roster: Vec<AgentId> = registry.active().to_vec();
        for &id in &roster {
            let seed = rng.gen();
            let mut market = BidMarket::new(id, &mut book, &mut bids);
            registry.get_mut(id).bid_phase(now, &mut market, seed);
        }

        // Trade clearing, in bid-insertion order.
        if !bids.is_empty() {
            let first_active = registry.first_active();
            for key in &bids {
                let sale = book
                    .entry(&key.location, key.time)
                    .expect("queued bids reference in-window permits")
                    .listing()
                    .cloned()
                    .expect("queued bids reference live listings");
                let winner = sale
                    .highest_bidder
                    .expect("queued listings carry a leading bidder");

                if let Some(callback) = opts.trade_callback.as_mut() {
                    callback(TradeInfo {
                        transaction_time: now,
                        from: sale.owner,
                        to: winner,
                        location: key.location.clone(),
                        time: key.time,
                        value: sale.highest_bid,
                    });
                }

                registry
                    .get_mut(winner)
                    .on_bought(&key.location, key.time, sale.highest_bid);
                // Sellers compacted out in an earlier tick are gone; the
                // first-active bound is exactly the addressability test.
                if let Some(seller) = sale.owner {
                    if first_active.is_some_and(|first| seller >= first) {
                        registry
                            .get_mut(seller)
                            .on_sold(&key.location, key.time, sale.highest_bid);
                    }
                }

                let entry = book
                    .entry(&key.location, key.time)
                    .expect("queued bids reference in-window permits");
                entry.current = PrivateStatus::InUse { owner: winner };
                entry.history.push(TradeValue {
                    min_value: sale.min_value,
                    highest_bid: sale.highest_bid,
                });
            }
        }

        // Ask phase; listings are deferred until every agent has run.
        let mut asks: Vec<AskOrder<R>> = Vec::new();
        let roster: Vec<AgentId> = registry.active().to_vec();
        for &id in &roster {
            let seed = rng.gen();
            let mut market = AskMarket::new(id, &mut book, &mut asks);
            registry.get_mut(id).ask_phase(now, &mut market, seed);
        }
        apply_asks(&mut book, asks);

        // Stop evaluation and compaction.
        let roster: Vec<AgentId> = registry.active().to_vec();
        let mut keep_active: Vec<AgentId> = Vec::with_capacity(roster.len());
        for &id in &roster {
            let seed = rng.gen();
            let agent = registry.get_mut(id);
            if agent.stop(now, seed) {
                agent.on_finished(id, now);
            } else {
                keep_active.push(id);
            }
        }
        registry.update_active(keep_active);

        book.advance();

        let done = match opts.stop_criterion {
            StopCriterion::NoAgents => registry.active_count() == 0,
            StopCriterion::TimeThreshold { t } => book.now() > t,
        };
        if done {
            break;
        }
    }
}

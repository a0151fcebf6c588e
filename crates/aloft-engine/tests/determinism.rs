//! Whole-run determinism: same seed, same trades, same stop tick.

use std::cell::RefCell;
use std::rc::Rc;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use aloft_agents::GoalAgent;
use aloft_core::{TickId, TradeInfo};
use aloft_engine::{simulate, SimulationOpts, StopCriterion};
use aloft_market::Agent;

/// Ten goal agents over a 3x3 grid, all admitted at tick 0, goals drawn
/// from the factory seed. Mirrors the shape of a small training run.
fn run(seed: u64) -> (Vec<TradeInfo<u32>>, u64) {
    let trades: Rc<RefCell<Vec<TradeInfo<u32>>>> = Rc::new(RefCell::new(Vec::new()));
    let last_tick: Rc<RefCell<u64>> = Rc::new(RefCell::new(0));

    let sink = Rc::clone(&trades);
    let tick_probe = Rc::clone(&last_tick);
    simulate(SimulationOpts::<u32> {
        factory: Some(Box::new(|now, seed| {
            if now != TickId(0) {
                return Vec::new();
            }
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..10)
                .map(|_| {
                    // Three distinct goal cells per agent.
                    let mut goals = Vec::new();
                    while goals.len() < 3 {
                        let cell = rng.gen_range(0..9u32);
                        if !goals.contains(&cell) {
                            goals.push(cell);
                        }
                    }
                    GoalAgent::builder()
                        .goals(goals)
                        .build()
                        .map(|agent| Box::new(agent) as Box<dyn Agent<u32>>)
                        .expect("three non-empty goals")
                })
                .collect()
        })),
        stop_criterion: StopCriterion::TimeThreshold { t: TickId(50) },
        trade_callback: Some(Box::new(move |trade| sink.borrow_mut().push(trade))),
        status_callback: Some(Box::new(move |now, _registry, _book| {
            *tick_probe.borrow_mut() = now.0;
        })),
        seed: Some(seed),
        ..SimulationOpts::default()
    });

    let trades = Rc::try_unwrap(trades).expect("run finished").into_inner();
    let last = *last_tick.borrow();
    (trades, last)
}

#[test]
fn identical_seeds_reproduce_the_run() {
    let (trades_a, last_a) = run(42);
    let (trades_b, last_b) = run(42);

    assert!(!trades_a.is_empty(), "contended grid must produce trades");
    assert_eq!(trades_a, trades_b);
    assert_eq!(last_a, last_b);
}

#[test]
fn different_seeds_diverge() {
    let (trades_a, _) = run(42);
    let (trades_b, _) = run(1337);
    // Ten agents bidding random values: byte-identical trade sequences
    // across different seeds would indicate the seed is being ignored.
    assert_ne!(trades_a, trades_b);
}

#[test]
fn trade_values_respect_first_price_rules() {
    let (trades, _) = run(42);
    for trade in &trades {
        assert!(
            trade.value > 0.0,
            "cleared price must exceed the exclusive floor"
        );
        assert!(trade.time >= trade.transaction_time);
    }
}

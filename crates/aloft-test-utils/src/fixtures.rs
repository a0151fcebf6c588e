//! Scripted agent fixtures with a shared, inspectable event log.
//!
//! [`ScriptAgent`] plays back a fixed list of bids and asks at chosen
//! ticks and records every engine callback it receives into an
//! [`EventLog`]. Tests keep a clone of the log handle, run the
//! simulation, and assert on the recorded sequence afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use aloft_core::{AgentId, Region, TickId, Value};
use aloft_market::{Agent, AskMarket, BidMarket};

/// One observed callback, tagged with the scripting test's agent label.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<R> {
    /// `bid` was called; `legal` is its return value.
    BidSubmitted {
        /// The bid's region.
        location: R,
        /// The bid's tick.
        time: TickId,
        /// The bid amount.
        value: Value,
        /// Whether the key was legally biddable.
        legal: bool,
    },
    /// `ask` was called; `accepted` is its return value.
    AskSubmitted {
        /// The ask's region.
        location: R,
        /// The ask's tick.
        time: TickId,
        /// The listing floor.
        value: Value,
        /// Whether the agent owned the permit.
        accepted: bool,
    },
    /// `on_bought` was delivered.
    Bought {
        /// The won permit's region.
        location: R,
        /// The won permit's tick.
        time: TickId,
        /// The price paid.
        value: Value,
    },
    /// `on_sold` was delivered.
    Sold {
        /// The sold permit's region.
        location: R,
        /// The sold permit's tick.
        time: TickId,
        /// The price received.
        value: Value,
    },
    /// `on_finished` was delivered with the agent's registry ID.
    Finished {
        /// The retiring agent's ID.
        id: AgentId,
        /// The final tick.
        now: TickId,
    },
}

/// Shared log of `(tag, event)` pairs in delivery order.
pub type EventLog<R> = Rc<RefCell<Vec<(usize, Event<R>)>>>;

/// Create an empty shared event log.
pub fn event_log<R>() -> EventLog<R> {
    Rc::new(RefCell::new(Vec::new()))
}

struct Planned<R> {
    when: TickId,
    location: R,
    time: TickId,
    value: Value,
}

/// An agent that plays a fixed script and records what happens to it.
///
/// Configure with the chained `bid_at`/`ask_at`/`retire_at`/
/// `stop_after_buying` methods. An agent with no stop rule never stops;
/// pair it with a time-threshold run or give it one.
pub struct ScriptAgent<R: Region> {
    tag: usize,
    log: EventLog<R>,
    bids: Vec<Planned<R>>,
    asks: Vec<Planned<R>>,
    retire_at: Option<TickId>,
    stop_after_buying: Option<usize>,
    bought: usize,
}

impl<R: Region> ScriptAgent<R> {
    /// A fixture tagged `tag`, recording into `log`.
    pub fn new(tag: usize, log: &EventLog<R>) -> Self {
        Self {
            tag,
            log: Rc::clone(log),
            bids: Vec::new(),
            asks: Vec::new(),
            retire_at: None,
            stop_after_buying: None,
            bought: 0,
        }
    }

    /// Bid `value` for `(location, time)` during tick `when`.
    #[must_use]
    pub fn bid_at(mut self, when: TickId, location: R, time: TickId, value: Value) -> Self {
        self.bids.push(Planned {
            when,
            location,
            time,
            value,
        });
        self
    }

    /// Ask `(location, time)` with floor `value` during tick `when`.
    #[must_use]
    pub fn ask_at(mut self, when: TickId, location: R, time: TickId, value: Value) -> Self {
        self.asks.push(Planned {
            when,
            location,
            time,
            value,
        });
        self
    }

    /// Stop at the end of tick `when`.
    #[must_use]
    pub fn retire_at(mut self, when: TickId) -> Self {
        self.retire_at = Some(when);
        self
    }

    /// Stop once `count` purchases have been delivered.
    #[must_use]
    pub fn stop_after_buying(mut self, count: usize) -> Self {
        self.stop_after_buying = Some(count);
        self
    }

    /// Box the fixture for admission through a factory.
    pub fn boxed(self) -> Box<dyn Agent<R>> {
        Box::new(self)
    }

    fn record(&self, event: Event<R>) {
        self.log.borrow_mut().push((self.tag, event));
    }
}

impl<R: Region> Agent<R> for ScriptAgent<R> {
    fn bid_phase(&mut self, now: TickId, market: &mut BidMarket<'_, R>, _seed: u64) {
        for planned in self.bids.iter().filter(|p| p.when == now) {
            let legal = market.bid(&planned.location, planned.time, planned.value);
            self.log.borrow_mut().push((
                self.tag,
                Event::BidSubmitted {
                    location: planned.location.clone(),
                    time: planned.time,
                    value: planned.value,
                    legal,
                },
            ));
        }
    }

    fn ask_phase(&mut self, now: TickId, market: &mut AskMarket<'_, R>, _seed: u64) {
        for planned in self.asks.iter().filter(|p| p.when == now) {
            let accepted = market.ask(&planned.location, planned.time, planned.value);
            self.log.borrow_mut().push((
                self.tag,
                Event::AskSubmitted {
                    location: planned.location.clone(),
                    time: planned.time,
                    value: planned.value,
                    accepted,
                },
            ));
        }
    }

    fn on_bought(&mut self, location: &R, time: TickId, value: Value) {
        self.bought += 1;
        self.record(Event::Bought {
            location: location.clone(),
            time,
            value,
        });
    }

    fn on_sold(&mut self, location: &R, time: TickId, value: Value) {
        self.record(Event::Sold {
            location: location.clone(),
            time,
            value,
        });
    }

    fn on_finished(&mut self, id: AgentId, now: TickId) {
        self.record(Event::Finished { id, now });
    }

    fn stop(&mut self, now: TickId, _seed: u64) -> bool {
        if let Some(when) = self.retire_at {
            if now >= when {
                return true;
            }
        }
        if let Some(count) = self.stop_after_buying {
            if self.bought >= count {
                return true;
            }
        }
        false
    }
}

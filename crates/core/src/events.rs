use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    PlayerRegistered {
        name: String,
        remaining: usize,
    },
    PlayersGenerated {
        count: usize,
        remaining: usize,
    },
    PlayersCleared { count: usize },
    PrizeUpdated { amount: f64 },
    DrawCompleted {
        numbers: Vec<u8>,
        stars: Vec<u8>,
    },
    GainsDistributed { winners: usize, prize: f64 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}

//! Serves recorded interactions back in order.

use std::collections::HashMap;

use thiserror::Error;

use super::format::{Cassette, Interaction};

/// Why a replayer has nothing to serve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The cassette never recorded this port/method pair.
    #[error("Cassette has no interactions for {port}::{method}. Available: [{available}]")]
    NotRecorded {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Comma-separated `port::method` pairs the cassette does contain.
        available: String,
    },

    /// Every recorded interaction for this pair has already been served.
    #[error("Cassette exhausted: all {count} interactions for {port}::{method} were consumed")]
    Exhausted {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// How many interactions were recorded for the pair.
        count: usize,
    },
}

/// Replays a cassette, keeping a separate cursor per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), Vec<Interaction>>,
    cursors: HashMap<(String, String), usize>,
}

impl CassetteReplayer {
    /// Index the interactions of `cassette` by port and method.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push(interaction.clone());
        }
        for queue in queues.values_mut() {
            queue.sort_by_key(|i| i.seq);
        }
        Self { queues, cursors: HashMap::new() }
    }

    /// The next unserved interaction for `port`/`method`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair was never recorded or is used up.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction, ReplayError> {
        let key = (port.to_string(), method.to_string());

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            return Err(ReplayError::NotRecorded {
                port: key.0,
                method: key.1,
                available: available.join(", "),
            });
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        let Some(interaction) = queue.get(*cursor) else {
            return Err(ReplayError::Exhausted {
                port: port.to_string(),
                method: method.to_string(),
                count: queue.len(),
            });
        };
        *cursor += 1;
        Ok(interaction)
    }
}

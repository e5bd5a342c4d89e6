// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Fans events out to any number of independent subscribers.
///
/// Each [`subscribe`](Self::subscribe) call opens its own unbounded `flume`
/// channel, so every subscriber observes every event published after it
/// subscribed. The bus keeps only the sending halves: with no subscribers a
/// published event is dropped on the spot, and a subscriber whose receiver
/// was dropped is pruned on the next publish.
///
/// Clones share the same subscriber list.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + 'static> {
    subscribers: Arc<Mutex<Vec<flume::Sender<T>>>>,
}

impl<T: Clone + Send + 'static> EventBus<T> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        log::debug!("Streaming EventBus initialized.");
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Opens a new subscription. Earlier events are not replayed.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        let mut subscribers = self.subscribers();
        subscribers.push(sender);
        log::debug!("EventBus subscriber added ({} total).", subscribers.len());
        receiver
    }

    /// Delivers a copy of `event` to every live subscriber.
    pub fn publish(&self, event: T) {
        let mut subscribers = self.subscribers();
        if subscribers.is_empty() {
            log::trace!("No subscribers, dropping event.");
            return;
        }

        log::trace!("Publishing an event to {} subscriber(s).", subscribers.len());
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
    }

    /// Number of subscribers still attached as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers().len()
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<flume::Sender<T>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone + Send + 'static> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Clone + Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

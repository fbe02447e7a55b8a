//! Bounded in-memory message buffer.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::store::message::{now_ms, Draft, Message};

/// Default number of messages retained.
pub const MAX_MESSAGES: usize = 500;

/// Result of a [`MessageStore::query`].
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub messages: Vec<Message>,
    /// Timestamp a polling client should send as `since` next time.
    pub next_cursor: Option<i64>,
}

/// A thread-safe ring buffer of messages in receipt order.
///
/// Appending past capacity evicts from the head. Every operation takes
/// the same lock, so readers never observe a half-trimmed buffer.
#[derive(Debug)]
pub struct MessageStore {
    inner: Mutex<VecDeque<Message>>,
    capacity: usize,
}

impl MessageStore {
    /// Create an empty store holding at most `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Finalize a draft and append it. Returns the stored record.
    pub fn append(&self, draft: Draft) -> Message {
        let message = draft.finalize(now_ms());
        let mut messages = self.inner.lock().expect("message store mutex poisoned");
        self.push(&mut messages, message.clone());
        message
    }

    /// Append a batch under one lock so the items stay contiguous.
    pub fn append_all(&self, drafts: Vec<Draft>) -> Vec<Message> {
        if drafts.is_empty() {
            return Vec::new();
        }
        let now = now_ms();
        let mut messages = self.inner.lock().expect("message store mutex poisoned");
        drafts
            .into_iter()
            .map(|draft| {
                let message = draft.finalize(now);
                self.push(&mut messages, message.clone());
                message
            })
            .collect()
    }

    fn push(&self, messages: &mut VecDeque<Message>, message: Message) {
        messages.push_back(message);
        while messages.len() > self.capacity {
            messages.pop_front();
        }
    }

    /// Messages newer than `since` (all of them when `None`), in stored order.
    pub fn query(&self, since: Option<i64>) -> Page {
        let stored = self.inner.lock().expect("message store mutex poisoned");
        let messages: Vec<Message> = match since {
            Some(since) => stored.iter().filter(|m| m.ts > since).cloned().collect(),
            None => stored.iter().cloned().collect(),
        };
        let next_cursor = messages
            .last()
            .or_else(|| stored.back())
            .map(|m| m.ts);
        Page {
            messages,
            next_cursor,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("message store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new(MAX_MESSAGES)
    }
}

//! Deferred queue: buffers messages whose consumer is not ready yet.
//!
//! Buckets are keyed by (message class, channel id) and are strict FIFO
//! within one bucket; buckets are independent of each other. Entries leave
//! only by explicit consumption. The queue never expires or caps entries —
//! a channel that never activates grows without bound, which is accepted and
//! made observable via a configurable warn threshold.

use std::collections::VecDeque;

use dashmap::DashMap;

use framelink_core::channel::{resolve, ChannelId, ChannelSource};
use framelink_core::error::{FramelinkError, Result};
use framelink_core::protocol::{Message, MessageClass};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BucketKey {
    class: MessageClass,
    channel: ChannelId,
}

/// Dual-purpose buffer for pending events and pending commands.
#[derive(Default, Debug)]
pub struct DeferredQueue {
    buckets: DashMap<BucketKey, VecDeque<Message>>,
    warn_threshold: usize,
}

impl DeferredQueue {
    /// `warn_threshold` is the per-bucket depth at which `add` starts logging
    /// a warning; 0 disables the diagnostic.
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            buckets: DashMap::new(),
            warn_threshold,
        }
    }

    /// Append a message to the tail of its (class, channel) bucket, creating
    /// the bucket if absent. A message without a derivable channel identity
    /// is dropped with a diagnostic; this is a silent no-op by contract.
    pub fn add(&self, message: Message) {
        let Some(channel) = resolve(&message) else {
            tracing::warn!("discarding message with no channel identity");
            return;
        };
        let class = message.class();
        let mut bucket = self
            .buckets
            .entry(BucketKey {
                class,
                channel: channel.clone(),
            })
            .or_default();
        bucket.push_back(message);

        let depth = bucket.len();
        if self.warn_threshold > 0 && depth >= self.warn_threshold {
            tracing::warn!(
                channel = %channel,
                class = class.as_str(),
                depth,
                "deferred bucket keeps growing; channel may never activate"
            );
        } else {
            tracing::debug!(channel = %channel, class = class.as_str(), depth, "message deferred");
        }
    }

    /// Snapshot of the live bucket for (class, source's channel), oldest
    /// first. Read-only; an absent bucket is an empty sequence.
    pub fn list<S>(&self, source: &S, class: MessageClass) -> Vec<Message>
    where
        S: ChannelSource + ?Sized,
    {
        let Some(channel) = resolve(source) else {
            return Vec::new();
        };
        self.buckets
            .get(&BucketKey { class, channel })
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count<S>(&self, source: &S, class: MessageClass) -> usize
    where
        S: ChannelSource + ?Sized,
    {
        self.list(source, class).len()
    }

    pub fn is_empty<S>(&self, source: &S, class: MessageClass) -> bool
    where
        S: ChannelSource + ?Sized,
    {
        self.count(source, class) == 0
    }

    /// Remove and return the oldest message in the bucket.
    ///
    /// Precondition-style contract: callers must check [`is_empty`] first;
    /// an absent or empty bucket is an [`FramelinkError::EmptyBucket`] error.
    ///
    /// [`is_empty`]: Self::is_empty
    pub fn fetch_head<S>(&self, source: &S, class: MessageClass) -> Result<Message>
    where
        S: ChannelSource + ?Sized,
    {
        let channel = resolve(source)
            .ok_or_else(|| FramelinkError::Malformed("no channel identity".into()))?;
        let key = BucketKey {
            class,
            channel: channel.clone(),
        };
        self.buckets
            .get_mut(&key)
            .and_then(|mut bucket| bucket.pop_front())
            .ok_or_else(|| {
                FramelinkError::EmptyBucket(format!("{}/{channel}", class.as_str()))
            })
    }

    /// Pop the head of the bucket and invoke `handler` until the bucket is
    /// empty. Each pop holds the bucket only long enough to remove one
    /// element, and `handler` runs with no lock held, so it may freely
    /// enqueue onto other channels mid-drain. A re-entrant enqueue onto the
    /// bucket being drained is picked up by the same pass: never losing a
    /// message wins over snapshot isolation here.
    pub fn consume<S, F>(&self, source: &S, class: MessageClass, mut handler: F)
    where
        S: ChannelSource + ?Sized,
        F: FnMut(Message),
    {
        let Some(channel) = resolve(source) else {
            tracing::warn!("consume with no channel identity");
            return;
        };
        let key = BucketKey { class, channel };
        loop {
            let next = self
                .buckets
                .get_mut(&key)
                .and_then(|mut bucket| bucket.pop_front());
            match next {
                Some(message) => handler(message),
                None => {
                    self.buckets.remove_if(&key, |_, bucket| bucket.is_empty());
                    break;
                }
            }
        }
    }
}

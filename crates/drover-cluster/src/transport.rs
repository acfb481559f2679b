// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Point-to-point message transport.
//!
//! `Transport` is the only way participants talk to each other. A rank
//! sends tagged integer payloads and blocks on its own inbox. Tags that the
//! receiver does not expect are logged and dropped by `Transport::receive`.
//!
//! `ChannelNetwork` realises the transport for participants running as
//! threads of one process: one unbounded `crossbeam-channel` inbox per rank,
//! wired as a star around the manager. Every worker can reach the manager and
//! the manager can reach every worker, so when one side goes away the other
//! observes a disconnected inbox instead of blocking forever.

use crate::{error::TransportError, message::Tag};
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Rank of the manager.
pub const MANAGER: usize = 0;

/// A message as it travels through the network, with its raw tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    pub source: usize,
    pub tag: i32,
    pub payload: Vec<i64>,
}

/// A received message whose tag passed the receive filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub source: usize,
    pub tag: Tag,
    pub payload: Vec<i64>,
}

/// Which tags a receive accepts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TagFilter {
    Any,
    Only(Tag),
}

impl TagFilter {
    #[inline]
    pub fn accepts(self, tag: Tag) -> bool {
        match self {
            TagFilter::Any => true,
            TagFilter::Only(expected) => expected == tag,
        }
    }
}

impl std::fmt::Display for TagFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagFilter::Any => write!(f, "any"),
            TagFilter::Only(tag) => write!(f, "{}", tag),
        }
    }
}

/// A participant's endpoint of the message network.
pub trait Transport {
    /// This participant's rank.
    fn rank(&self) -> usize;

    /// Number of ranks in the network, manager included.
    fn size(&self) -> usize;

    /// Sends a raw packet to `to`.
    fn send_raw(&self, to: usize, tag: i32, payload: Vec<i64>) -> Result<(), TransportError>;

    /// Blocks until the next packet arrives, whatever its tag.
    fn receive_raw(&self) -> Result<Packet, TransportError>;

    /// Sends `payload` to `to` under `tag`.
    #[inline]
    fn send(&self, to: usize, tag: Tag, payload: Vec<i64>) -> Result<(), TransportError> {
        self.send_raw(to, tag.code(), payload)
    }

    /// Blocks until a message passing `filter` arrives. Messages with an
    /// unknown tag, or a tag `filter` rejects, are logged and discarded.
    fn receive(&self, filter: TagFilter) -> Result<Envelope, TransportError> {
        loop {
            let packet = self.receive_raw()?;
            match Tag::try_from(packet.tag) {
                Ok(tag) if filter.accepts(tag) => {
                    return Ok(Envelope {
                        source: packet.source,
                        tag,
                        payload: packet.payload,
                    });
                }
                Ok(tag) => log::warn!(
                    "T{}: discarding {} from T{} while waiting for {}",
                    self.rank(),
                    tag,
                    packet.source,
                    filter
                ),
                Err(_) => log::warn!(
                    "T{}: discarding message with unknown tag {} from T{}",
                    self.rank(),
                    packet.tag,
                    packet.source
                ),
            }
        }
    }
}

/// Builder of an in-process network.
#[derive(Debug)]
pub struct ChannelNetwork {
    manager: ChannelEndpoint,
    workers: Vec<ChannelEndpoint>,
}

impl ChannelNetwork {
    /// Creates a manager (rank `0`) and `num_workers` workers (ranks
    /// `1..=num_workers`).
    pub fn star(num_workers: usize) -> Self {
        let size = num_workers + 1;
        let (manager_tx, manager_rx) = unbounded();

        let mut manager_peers = vec![None; size];
        let workers = (1..size)
            .map(|rank| {
                let (tx, rx) = unbounded();
                manager_peers[rank] = Some(tx);
                let mut peers = vec![None; size];
                peers[MANAGER] = Some(manager_tx.clone());
                ChannelEndpoint {
                    rank,
                    inbox: rx,
                    peers,
                }
            })
            .collect();

        let manager = ChannelEndpoint {
            rank: MANAGER,
            inbox: manager_rx,
            peers: manager_peers,
        };

        Self { manager, workers }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.workers.len() + 1
    }

    /// Hands out the endpoints: the manager's first, then the workers' in
    /// rank order.
    #[inline]
    pub fn into_endpoints(self) -> (ChannelEndpoint, Vec<ChannelEndpoint>) {
        (self.manager, self.workers)
    }
}

/// One rank's view of a `ChannelNetwork`.
#[derive(Debug)]
pub struct ChannelEndpoint {
    rank: usize,
    inbox: Receiver<Packet>,
    peers: Vec<Option<Sender<Packet>>>,
}

impl Transport for ChannelEndpoint {
    #[inline]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    fn size(&self) -> usize {
        self.peers.len()
    }

    fn send_raw(&self, to: usize, tag: i32, payload: Vec<i64>) -> Result<(), TransportError> {
        let Some(Some(peer)) = self.peers.get(to) else {
            return Err(TransportError::UnknownRank {
                rank: self.rank,
                to,
                size: self.size(),
            });
        };
        peer.send(Packet {
            source: self.rank,
            tag,
            payload,
        })
        .map_err(|_| TransportError::Disconnected { rank: self.rank })
    }

    fn receive_raw(&self) -> Result<Packet, TransportError> {
        self.inbox
            .recv()
            .map_err(|_| TransportError::Disconnected { rank: self.rank })
    }
}

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

//! Protocol messages and their wire form.
//!
//! A `Message` travels between the manager and a worker as a fixed-size
//! array of `N + 5` integers:
//!
//! | offset   | field                                      |
//! |----------|--------------------------------------------|
//! | `0..=N`  | node sequence (slots past `len` are `0`)   |
//! | `N + 1`  | length (`0` when the message has no tour)  |
//! | `N + 2`  | distance                                   |
//! | `N + 3`  | best distance (`i64::MAX` means no tour)   |
//! | `N + 4`  | done flag (`0` or `1`)                     |
//!
//! Raw offsets never leave this module.

use crate::error::ProtocolError;
use drover_model::{error::TourError, index::NodeIndex, num::Weight, tour::PartialTour};

/// Message tags. A terminate notice is a `RequestPath` reply with the done
/// flag set.
#[repr(i32)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tag {
    /// Worker asks for work; the manager answers with the same tag.
    RequestPath = 99,
    /// Worker reports an improved closed tour.
    ReportBest = 100,
    /// Manager acknowledges a report with the authoritative best distance.
    AckBest = 101,
}

impl Tag {
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Tag {
    type Error = ProtocolError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            99 => Ok(Tag::RequestPath),
            100 => Ok(Tag::ReportBest),
            101 => Ok(Tag::AckBest),
            other => Err(ProtocolError::UnknownTag(other)),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::RequestPath => write!(f, "REQUEST_PATH"),
            Tag::ReportBest => write!(f, "REPORT_BEST"),
            Tag::AckBest => write!(f, "ACK_BEST"),
        }
    }
}

/// Returns the payload length for a graph of `num_nodes` nodes.
#[inline]
pub const fn payload_len(num_nodes: usize) -> usize {
    num_nodes + 5
}

/// A protocol record: an optional tour, the sender's best distance and the
/// done flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message<T> {
    pub tour: Option<PartialTour<T>>,
    pub best: T,
    pub done: bool,
}

impl<T> Message<T>
where
    T: Weight,
{
    /// A worker's request for work, carrying its current bound.
    #[inline]
    pub fn request(best: T) -> Self {
        Self {
            tour: None,
            best,
            done: false,
        }
    }

    /// The manager's answer handing `tour` to a worker.
    #[inline]
    pub fn assign(tour: PartialTour<T>, best: T) -> Self {
        Self {
            tour: Some(tour),
            best,
            done: false,
        }
    }

    /// The manager's answer telling a worker to stop.
    #[inline]
    pub fn terminate(best: T) -> Self {
        Self {
            tour: None,
            best,
            done: true,
        }
    }

    /// A worker's report of an improved closed tour.
    #[inline]
    pub fn report(tour: PartialTour<T>) -> Self {
        let best = tour.dist();
        Self {
            tour: Some(tour),
            best,
            done: false,
        }
    }

    /// The manager's acknowledgment of a report.
    #[inline]
    pub fn ack(best: T) -> Self {
        Self::request(best)
    }

    /// Serializes the message for a graph of `num_nodes` nodes.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ValueOutOfRange` if a distance does not fit
    /// into an `i64`.
    pub fn encode(&self, num_nodes: usize) -> Result<Vec<i64>, ProtocolError> {
        let mut payload = vec![0i64; payload_len(num_nodes)];
        if let Some(tour) = &self.tour {
            debug_assert_eq!(
                tour.num_nodes(),
                num_nodes,
                "called `Message::encode` for {} nodes with a tour of {} nodes",
                num_nodes,
                tour.num_nodes()
            );
            for (slot, node) in payload.iter_mut().zip(tour.nodes()) {
                *slot = node.get() as i64;
            }
            payload[num_nodes + 1] = tour.len() as i64;
            payload[num_nodes + 2] = encode_weight("distance", tour.dist())?;
        }
        payload[num_nodes + 3] = encode_weight("best", self.best)?;
        payload[num_nodes + 4] = i64::from(self.done);
        Ok(payload)
    }

    /// Parses a payload for a graph of `num_nodes` nodes.
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError` if the payload has the wrong length, a value
    /// does not fit `T` or `usize`, or the node sequence is not a valid tour.
    pub fn decode(payload: &[i64], num_nodes: usize) -> Result<Self, ProtocolError> {
        let expected = payload_len(num_nodes);
        if payload.len() != expected {
            return Err(ProtocolError::PayloadLength {
                expected,
                actual: payload.len(),
            });
        }

        let len = decode_usize("length", payload[num_nodes + 1])?;
        let tour = if len == 0 {
            None
        } else {
            if len > num_nodes + 1 {
                return Err(TourError::Length {
                    len,
                    max: num_nodes + 1,
                }
                .into());
            }
            let nodes = payload[..len]
                .iter()
                .map(|&raw| decode_usize("node", raw).map(NodeIndex::new))
                .collect::<Result<Vec<_>, _>>()?;
            let dist = decode_weight("distance", payload[num_nodes + 2])?;
            Some(PartialTour::from_parts(num_nodes, &nodes, dist)?)
        };

        let best = decode_weight("best", payload[num_nodes + 3])?;
        let done = match payload[num_nodes + 4] {
            0 => false,
            1 => true,
            value => {
                return Err(ProtocolError::ValueOutOfRange {
                    field: "done",
                    value,
                });
            }
        };

        Ok(Self { tour, best, done })
    }
}

impl<T> std::fmt::Display for Message<T>
where
    T: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tour {
            Some(tour) => write!(f, "Message(tour: {}", tour)?,
            None => write!(f, "Message(tour: none")?,
        }
        if self.best.is_infinite() {
            write!(f, ", best: none, done: {})", self.done)
        } else {
            write!(f, ", best: {}, done: {})", self.best, self.done)
        }
    }
}

#[inline]
fn encode_weight<T>(field: &'static str, value: T) -> Result<i64, ProtocolError>
where
    T: Weight,
{
    if value.is_infinite() {
        return Ok(i64::MAX);
    }
    match value.to_i64() {
        Some(raw) if raw != i64::MAX => Ok(raw),
        _ => Err(ProtocolError::ValueOutOfRange {
            field,
            value: i64::MAX,
        }),
    }
}

#[inline]
fn decode_weight<T>(field: &'static str, raw: i64) -> Result<T, ProtocolError>
where
    T: Weight,
{
    if raw == i64::MAX {
        return Ok(T::infinity());
    }
    num_traits::cast::<i64, T>(raw)
        .filter(|value| !value.is_infinite())
        .ok_or(ProtocolError::ValueOutOfRange { field, value: raw })
}

#[inline]
fn decode_usize(field: &'static str, raw: i64) -> Result<usize, ProtocolError> {
    usize::try_from(raw).map_err(|_| ProtocolError::ValueOutOfRange { field, value: raw })
}

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

use drover_bnb::error::{SearchError, WorkStackFull};
use drover_model::error::TourError;
use thiserror::Error;

/// Failures of the message transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("rank {rank} cannot reach rank {to} (network of {size} ranks)")]
    UnknownRank { rank: usize, to: usize, size: usize },
    #[error("rank {rank} lost its peers")]
    Disconnected { rank: usize },
}

/// Payloads that do not follow the manager/worker protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("payload has {actual} integers, expected {expected}")]
    PayloadLength { expected: usize, actual: usize },
    #[error("unknown message tag {0}")]
    UnknownTag(i32),
    #[error("{field} value {value} cannot be represented")]
    ValueOutOfRange { field: &'static str, value: i64 },
    #[error("invalid tour: {0}")]
    InvalidTour(#[from] TourError),
    #[error("reported tour {0} is not a closed tour of this graph")]
    InconsistentTour(String),
    #[error("assignment without a tour")]
    MissingTour,
    #[error("message from unknown worker rank {0}")]
    UnknownWorker(usize),
}

/// Errors that end a cluster run.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    WorkStackFull(#[from] WorkStackFull),
    #[error("a cluster needs at least one worker")]
    NoWorkers,
    #[error("participant T{rank} panicked")]
    ParticipantPanicked { rank: usize },
}

pub type Result<T> = std::result::Result<T, ClusterError>;

impl From<SearchError<ClusterError>> for ClusterError {
    fn from(error: SearchError<ClusterError>) -> Self {
        match error {
            SearchError::WorkStackFull(full) => ClusterError::WorkStackFull(full),
            SearchError::Report(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_flattens() {
        let full = SearchError::<ClusterError>::WorkStackFull(WorkStackFull { capacity: 3 });
        assert!(matches!(
            ClusterError::from(full),
            ClusterError::WorkStackFull(WorkStackFull { capacity: 3 })
        ));

        let report = SearchError::Report(ClusterError::from(TransportError::Disconnected {
            rank: 2,
        }));
        assert!(matches!(
            ClusterError::from(report),
            ClusterError::Transport(TransportError::Disconnected { rank: 2 })
        ));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ProtocolError::PayloadLength {
                expected: 9,
                actual: 3
            }
            .to_string(),
            "payload has 3 integers, expected 9"
        );
        assert_eq!(
            ClusterError::ParticipantPanicked { rank: 2 }.to_string(),
            "participant T2 panicked"
        );
    }
}

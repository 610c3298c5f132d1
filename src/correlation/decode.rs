//! Per-record event decoding with an explicit skip outcome.

use alloy::sol_types::SolEvent;

use crate::blockchain::types::LogRecord;
use crate::correlation::CorrelationError;

/// The EVM emits at most four topics per log.
pub const MAX_TOPICS: usize = 4;

/// Why a record was not decoded as the requested event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// topic0 is absent or belongs to another event.
    SignatureMismatch,
    /// Same signature but a different indexed/unindexed split.
    TopicCount { expected: usize, actual: usize },
    /// Shape matched but the payload did not decode.
    Undecodable(String),
}

/// Outcome of decoding one record as event `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome<E> {
    Decoded(E),
    Skipped(SkipReason),
}

impl<E> LogOutcome<E> {
    pub fn decoded(self) -> Option<E> {
        match self {
            LogOutcome::Decoded(event) => Some(event),
            LogOutcome::Skipped(_) => None,
        }
    }
}

/// Decode `log` as `E`, which must carry exactly `topic_count` topics.
pub fn decode_event<E: SolEvent>(log: &LogRecord, topic_count: usize) -> LogOutcome<E> {
    match log.topics.first() {
        Some(topic0) if *topic0 == E::SIGNATURE_HASH => {}
        _ => return LogOutcome::Skipped(SkipReason::SignatureMismatch),
    }

    if log.topics.len() != topic_count {
        return LogOutcome::Skipped(SkipReason::TopicCount {
            expected: topic_count,
            actual: log.topics.len(),
        });
    }

    match E::decode_raw_log(log.topics.iter().copied(), &log.data) {
        Ok(event) => LogOutcome::Decoded(event),
        Err(e) => LogOutcome::Skipped(SkipReason::Undecodable(e.to_string())),
    }
}

/// Reject records that no EVM could have produced.
pub fn check_structure(logs: &[LogRecord]) -> Result<(), CorrelationError> {
    for (index, log) in logs.iter().enumerate() {
        if log.topics.len() > MAX_TOPICS {
            return Err(CorrelationError::MalformedLog {
                index,
                reason: format!("{} topics, at most {} allowed", log.topics.len(), MAX_TOPICS),
            });
        }
    }
    Ok(())
}

use thiserror::Error;

/// Broad category of a terminal stream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The planner reported an `error` event.
    Remote,
    /// A `complete` event carried a missing or undecodable plan.
    MalformedPlan,
    /// The stream broke or ended without a terminal event.
    StreamIntegrity,
    /// The operator cancelled.
    Cancelled,
}

impl ErrorClass {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Remote => 1,
            Self::MalformedPlan => 2,
            Self::StreamIntegrity => 3,
            Self::Cancelled => 130,
        }
    }
}

/// Every way a plan stream can end without a plan.
#[derive(Error, Debug)]
pub enum PlanStreamError {
    #[error("planning error: {0}")]
    Remote(String),

    #[error("complete event received but plan data is missing")]
    PlanMissing,

    #[error("complete event received but plan data is in unexpected format: {0}")]
    PlanMalformed(String),

    #[error("event stream closed unexpectedly without sending complete event")]
    StreamClosed,

    #[error("stream ended without plan data")]
    StreamEnded,

    #[error("stream transport error: {0}")]
    Transport(anyhow::Error),

    #[error("cancelled by user")]
    Cancelled,
}

impl PlanStreamError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Remote(_) => ErrorClass::Remote,
            Self::PlanMissing | Self::PlanMalformed(_) => ErrorClass::MalformedPlan,
            Self::StreamClosed | Self::StreamEnded | Self::Transport(_) => {
                ErrorClass::StreamIntegrity
            }
            Self::Cancelled => ErrorClass::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_distinct_per_failure_kind() {
        assert_eq!(PlanStreamError::Remote("x".into()).class(), ErrorClass::Remote);
        assert_eq!(PlanStreamError::PlanMissing.class(), ErrorClass::MalformedPlan);
        assert_eq!(
            PlanStreamError::Transport(anyhow::anyhow!("reset")).class(),
            ErrorClass::StreamIntegrity
        );
        assert_eq!(PlanStreamError::Cancelled.class(), ErrorClass::Cancelled);
    }

    #[test]
    fn missing_and_malformed_messages_differ() {
        let missing = PlanStreamError::PlanMissing.to_string();
        let malformed = PlanStreamError::PlanMalformed("expected an object, got string".into())
            .to_string();
        assert!(missing.contains("missing"));
        assert!(malformed.contains("unexpected format"));
        assert_ne!(missing, malformed);
    }

    #[test]
    fn exit_codes_are_non_zero() {
        for class in [
            ErrorClass::Remote,
            ErrorClass::MalformedPlan,
            ErrorClass::StreamIntegrity,
            ErrorClass::Cancelled,
        ] {
            assert_ne!(class.exit_code(), 0);
        }
    }
}

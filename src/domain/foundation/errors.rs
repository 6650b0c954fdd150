//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors raised by the outranking, ranking and sorting services.
///
/// Every variant means the input is malformed; nothing is retried and no
/// partial result is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McdaError {
    #[error("Incomplete input: {reason}")]
    IncompleteInput { reason: String },

    #[error("Threshold order violated on criterion '{criterion}': {reason}")]
    ThresholdOrderViolation { criterion: String, reason: String },

    #[error("Unknown criterion '{criterion}' in {context}")]
    UnknownCriterion { criterion: String, context: String },

    #[error("Missing {relation} entry at ({row}, {column})")]
    MissingRelationEntry {
        relation: String,
        row: String,
        column: String,
    },

    #[error("Non binary outranking value {value} at ({row}, {column})")]
    InvalidOutrankingValue {
        row: String,
        column: String,
        value: f64,
    },

    #[error("Numeric inconsistency: {reason}")]
    NumericInconsistency { reason: String },

    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

impl McdaError {
    /// Creates an incomplete input error.
    pub fn incomplete(reason: impl Into<String>) -> Self {
        McdaError::IncompleteInput {
            reason: reason.into(),
        }
    }

    /// Creates a threshold order violation error.
    pub fn threshold_order(criterion: impl fmt::Display, reason: impl Into<String>) -> Self {
        McdaError::ThresholdOrderViolation {
            criterion: criterion.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown criterion error.
    pub fn unknown_criterion(criterion: impl fmt::Display, context: impl Into<String>) -> Self {
        McdaError::UnknownCriterion {
            criterion: criterion.to_string(),
            context: context.into(),
        }
    }

    /// Creates a missing relation entry error.
    pub fn missing_entry(
        relation: impl Into<String>,
        row: impl fmt::Display,
        column: impl fmt::Display,
    ) -> Self {
        McdaError::MissingRelationEntry {
            relation: relation.into(),
            row: row.to_string(),
            column: column.to_string(),
        }
    }

    /// Creates an invalid outranking value error.
    pub fn non_binary(row: impl fmt::Display, column: impl fmt::Display, value: f64) -> Self {
        McdaError::InvalidOutrankingValue {
            row: row.to_string(),
            column: column.to_string(),
            value,
        }
    }

    /// Creates a numeric inconsistency error.
    pub fn numeric(reason: impl Into<String>) -> Self {
        McdaError::NumericInconsistency {
            reason: reason.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        McdaError::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            McdaError::IncompleteInput { .. } => ErrorCode::IncompleteInput,
            McdaError::ThresholdOrderViolation { .. } => ErrorCode::ThresholdOrderViolation,
            McdaError::UnknownCriterion { .. } => ErrorCode::UnknownCriterion,
            McdaError::MissingRelationEntry { .. } => ErrorCode::MissingRelationEntry,
            McdaError::InvalidOutrankingValue { .. } => ErrorCode::InvalidOutrankingValue,
            McdaError::NumericInconsistency { .. } => ErrorCode::NumericInconsistency,
            McdaError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        }
    }
}

/// Error codes, one per error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    IncompleteInput,
    ThresholdOrderViolation,
    UnknownCriterion,
    MissingRelationEntry,
    InvalidOutrankingValue,
    NumericInconsistency,
    InvalidParameter,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::IncompleteInput => "INCOMPLETE_INPUT",
            ErrorCode::ThresholdOrderViolation => "THRESHOLD_ORDER_VIOLATION",
            ErrorCode::UnknownCriterion => "UNKNOWN_CRITERION",
            ErrorCode::MissingRelationEntry => "MISSING_RELATION_ENTRY",
            ErrorCode::InvalidOutrankingValue => "INVALID_OUTRANKING_VALUE",
            ErrorCode::NumericInconsistency => "NUMERIC_INCONSISTENCY",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
        };
        write!(f, "{}", s)
    }
}

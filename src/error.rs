//! This module contains the error type shared by every fallible operation.

use thiserror::Error;

/// The machine-readable tag of a [`FloatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSyntax,
    MalformedEncoding,
    OutOfRange,
    Overflow,
    DivisionByZero,
    PrecisionLoss,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidSyntax => "InvalidSyntax",
            ErrorKind::MalformedEncoding => "MalformedEncoding",
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::Overflow => "Overflow",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::PrecisionLoss => "PrecisionLoss",
        }
    }
}

/// Errors reported by parsing, decoding, arithmetic and conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FloatError {
    /// The text is not a decimal literal.
    #[error("invalid decimal syntax: {input:?}")]
    InvalidSyntax { input: String },

    /// The packed word has the wrong length or is not hexadecimal.
    #[error("malformed packed encoding: {reason}")]
    MalformedEncoding { reason: String },

    /// The mantissa or exponent does not fit the packed fields.
    #[error("value out of range: mantissa or exponent exceeds the packed width")]
    OutOfRange,

    /// The exact result of an arithmetic operation is not representable.
    #[error("arithmetic overflow: result is not representable")]
    Overflow,

    /// The divisor is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An exact conversion would drop a non-zero remainder.
    #[error("precision loss: conversion would drop a non-zero remainder")]
    PrecisionLoss,
}

impl FloatError {
    pub(crate) fn invalid_syntax(input: &str) -> Self {
        FloatError::InvalidSyntax {
            input: input.to_string(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FloatError::MalformedEncoding {
            reason: reason.into(),
        }
    }

    /// Returns the machine-readable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FloatError::InvalidSyntax { .. } => ErrorKind::InvalidSyntax,
            FloatError::MalformedEncoding { .. } => {
                ErrorKind::MalformedEncoding
            }
            FloatError::OutOfRange => ErrorKind::OutOfRange,
            FloatError::Overflow => ErrorKind::Overflow,
            FloatError::DivisionByZero => ErrorKind::DivisionByZero,
            FloatError::PrecisionLoss => ErrorKind::PrecisionLoss,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, FloatError>;

#[test]
fn test_error_kind_and_message() {
    let err = FloatError::invalid_syntax("1.2.3");
    assert_eq!(err.kind(), ErrorKind::InvalidSyntax);
    assert_eq!(err.kind().as_str(), "InvalidSyntax");
    assert_eq!(err.to_string(), "invalid decimal syntax: \"1.2.3\"");

    let err = FloatError::malformed("expected 64 hex digits, found 3");
    assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    assert!(err.to_string().contains("64 hex digits"));

    assert_eq!(FloatError::DivisionByZero.to_string(), "division by zero");
    assert_eq!(FloatError::Overflow.kind().as_str(), "Overflow");
    assert_ne!(FloatError::Overflow, FloatError::OutOfRange);
}

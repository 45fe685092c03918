//! Error types for the hyperpath core library.
//!
//! Validation failures are raised at the call boundary before any state is
//! touched. "Nothing found" outcomes (no path, no qualifying rich-club
//! threshold, too few points for a power-law fit) are ordinary return values
//! and never appear here.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Reason a hyperedge was refused at the insertion boundary.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HyperedgeDefect {
    /// The hyperedge references fewer than two distinct entities.
    #[error("a hyperedge must connect at least 2 distinct entities (found {found})")]
    TooFewEntities {
        /// Number of distinct entities found in the participant list.
        found: usize,
    },
    /// The hyperedge identifier is empty.
    #[error("hyperedge id must not be empty")]
    EmptyId,
    /// A participant carries an empty entity reference.
    #[error("participant entity references must not be empty")]
    EmptyEntity,
    /// Another hyperedge with the same identifier is already stored.
    #[error("a hyperedge with this id is already stored")]
    DuplicateId,
}

/// Error type produced by the hyperpath engine.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HyperpathError {
    /// A hyperedge failed validation; the store and index are unchanged.
    #[error("hyperedge `{id}` rejected: {defect}")]
    InvalidHyperedge {
        /// Identifier of the rejected hyperedge.
        id: Arc<str>,
        /// Why the hyperedge was rejected.
        #[source]
        defect: HyperedgeDefect,
    },
    /// A query parameter was outside its accepted range.
    #[error("invalid parameter `{parameter}` = {value}: expected {expected}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        value: usize,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
    /// A position does not refer to a stored hyperedge.
    #[error("position {position} is out of bounds for a store of {len} hyperedges")]
    UnknownPosition {
        /// The requested position.
        position: usize,
        /// Number of hyperedges in the store.
        len: usize,
    },
    /// A synchronisation primitive became poisoned after a panic.
    #[error("lock for {resource} is poisoned")]
    LockPoisoned {
        /// Name of the locked resource that was poisoned.
        resource: &'static str,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("invariant violated: {invariant} ({detail})")]
    InvariantViolation {
        /// Name of the violated invariant.
        invariant: &'static str,
        /// Context describing the violation.
        detail: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`HyperpathError`] variants.
    enum HyperpathErrorCode for HyperpathError {
        /// A hyperedge failed validation.
        InvalidHyperedge => InvalidHyperedge { .. } => "HYPERPATH_INVALID_HYPEREDGE",
        /// A query parameter was outside its accepted range.
        InvalidParameter => InvalidParameter { .. } => "HYPERPATH_INVALID_PARAMETER",
        /// A position does not refer to a stored hyperedge.
        UnknownPosition => UnknownPosition { .. } => "HYPERPATH_UNKNOWN_POSITION",
        /// A synchronisation primitive became poisoned.
        LockPoisoned => LockPoisoned { .. } => "HYPERPATH_LOCK_POISONED",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "HYPERPATH_INVARIANT_VIOLATION",
    }
}

impl HyperpathError {
    /// Retrieve the [`HyperedgeDefect`] when the error is a rejected hyperedge.
    #[must_use]
    pub const fn defect(&self) -> Option<&HyperedgeDefect> {
        match self {
            Self::InvalidHyperedge { defect, .. } => Some(defect),
            _ => None,
        }
    }

    pub(crate) fn invalid_hyperedge(id: &str, defect: HyperedgeDefect) -> Self {
        Self::InvalidHyperedge {
            id: Arc::from(id),
            defect,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, HyperpathError>;

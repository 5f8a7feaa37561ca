//! Identifier newtypes for curriculum entities.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! raw_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from its raw integer representation.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw integer representation of the identifier.
            pub const fn as_raw(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

raw_id!(
    /// Identifier of a concept within the curriculum.
    ConceptId,
    "concept#"
);
raw_id!(
    /// Identifier of an answer option shared across a question's pathways.
    OptionId,
    "option#"
);
raw_id!(
    /// Identifier of a candidate reasoning pathway.
    PathwayId,
    "pathway#"
);
raw_id!(
    /// Identifier of a step-solve step.
    StepId,
    "step#"
);

//! Identity types for concurrent evaluation.
//!
//! A `UnitId` names one unit of concurrent work inside a group evaluation and
//! maps to the flat result slot that unit owns, so aggregation is a direct
//! array write.

use std::fmt;

/// One unit of concurrent work: an element, optionally paired with the index
/// of the external argument it was broadcast with.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId {
    pub argument: Option<u32>,
    pub element: u32,
}

impl UnitId {
    /// Unit for an element evaluated without external arguments.
    pub fn element(element: usize) -> Self {
        Self {
            argument: None,
            element: element as u32,
        }
    }

    /// Unit for an element evaluated against external argument `argument`.
    pub fn with_argument(argument: usize, element: usize) -> Self {
        Self {
            argument: Some(argument as u32),
            element: element as u32,
        }
    }

    /// Recover the unit that owns `slot` in a group of `width` elements.
    ///
    /// `has_arguments` tells whether the evaluation was argument-major.
    pub fn from_slot(slot: usize, width: usize, has_arguments: bool) -> Self {
        debug_assert!(width > 0);
        if has_arguments {
            Self::with_argument(slot / width, slot % width)
        } else {
            Self::element(slot)
        }
    }

    /// Flat result slot: argument-major, element-minor.
    #[inline]
    pub fn slot(self, width: usize) -> usize {
        match self.argument {
            Some(arg) => arg as usize * width + self.element as usize,
            None => self.element as usize,
        }
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument {
            Some(arg) => write!(f, "UnitId(arg {}, element {})", arg, self.element),
            None => write!(f, "UnitId(element {})", self.element),
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

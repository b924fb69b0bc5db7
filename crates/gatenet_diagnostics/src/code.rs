//! Diagnostic codes with category prefixes for structured error identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Net connectivity (sources, destinations, endpoints), prefixed with `C`.
    Connectivity,
    /// Identifier allocation and entity lookup, prefixed with `I`.
    Identity,
    /// Module hierarchy, prefixed with `H`.
    Hierarchy,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Connectivity => 'C',
            Category::Identity => 'I',
            Category::Hierarchy => 'H',
        }
    }

    /// Maps a prefix character back to its category.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'C' => Some(Category::Connectivity),
            'I' => Some(Category::Identity),
            'H' => Some(Category::Hierarchy),
            _ => None,
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit number,
/// e.g., `C103`, `I101`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// Invalid argument: absent gate, unknown pin, empty required name.
    pub const INVALID_ARGUMENT: Self = Self::new(Category::Connectivity, 101);
    /// Pin direction incompatible with the requested role.
    pub const DIRECTION_MISMATCH: Self = Self::new(Category::Connectivity, 102);
    /// Pin already driven or received elsewhere.
    pub const ALREADY_OCCUPIED: Self = Self::new(Category::Connectivity, 103);
    /// Endpoint not present on the net.
    pub const ENDPOINT_NOT_FOUND: Self = Self::new(Category::Connectivity, 104);
    /// Entity belongs to a different netlist.
    pub const FOREIGN_ENTITY: Self = Self::new(Category::Connectivity, 105);
    /// Identical endpoint added twice to the same net.
    pub const DUPLICATE_ENDPOINT: Self = Self::new(Category::Connectivity, 201);
    /// Single source requested from a net with several sources.
    pub const AMBIGUOUS_SOURCE: Self = Self::new(Category::Connectivity, 202);
    /// Explicit ID collides with a taken or below-minimum ID.
    pub const ID_CONFLICT: Self = Self::new(Category::Identity, 101);
    /// No identifiers left in the numeric range.
    pub const ID_EXHAUSTED: Self = Self::new(Category::Identity, 102);
    /// Referenced gate, net, or module does not exist.
    pub const ENTITY_NOT_FOUND: Self = Self::new(Category::Identity, 103);
    /// Required name was empty.
    pub const EMPTY_NAME: Self = Self::new(Category::Identity, 104);
    /// Module belongs to a different netlist.
    pub const FOREIGN_MODULE: Self = Self::new(Category::Hierarchy, 101);
    /// Operation would introduce a cycle into the module tree.
    pub const HIERARCHY_CYCLE: Self = Self::new(Category::Hierarchy, 102);
    /// Top module cannot be removed or reparented.
    pub const TOP_MODULE_FIXED: Self = Self::new(Category::Hierarchy, 103);
    /// Referenced module does not exist.
    pub const MODULE_NOT_FOUND: Self = Self::new(Category::Hierarchy, 104);
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// Error returned when a string is not a well-formed diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed diagnostic code '{0}'")]
pub struct ParseCodeError(pub String);

impl FromStr for DiagnosticCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseCodeError(s.to_string());
        let mut chars = s.chars();
        let category = chars
            .next()
            .and_then(Category::from_prefix)
            .ok_or_else(malformed)?;
        let digits = chars.as_str();
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let number = digits.parse().map_err(|_| malformed())?;
        Ok(Self::new(category, number))
    }
}

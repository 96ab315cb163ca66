//! Action model.
//!
//! Actions are immutable values. Their `Display` output is the canonical text
//! form consumed by plan verification and run reports, so it must never change
//! for a given action value.

use std::fmt;

/// An action a [`crate::SearchProblem`] can generate.
///
/// `Display` must render the canonical, stable text form
/// (`Action[name==<name>, <attr>==<value>, ...]` for the built-in types).
pub trait ActionV1: Clone + fmt::Debug + fmt::Display {
    /// The action's name (e.g., `"placeQueenAt"`).
    fn name(&self) -> &str;
}

/// A named action with an ordered attribute list.
///
/// Attribute values are stored pre-rendered; the attribute order given at
/// construction is the order they are rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedActionV1 {
    name: String,
    attributes: Vec<(String, String)>,
}

impl NamedActionV1 {
    /// An action with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Look up a rendered attribute value by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl ActionV1 for NamedActionV1 {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NamedActionV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action[name=={}", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, ", {key}=={value}")?;
        }
        f.write_str("]")
    }
}

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for passenger data that prints as `********` in Debug and Display,
/// so it can be passed to `tracing` fields without leaking. Serialization
/// still writes the real value.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Masked(value)
    }
}

impl<T> Masked<T> {
    /// Borrow the real value, for rendering to the passenger themselves.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

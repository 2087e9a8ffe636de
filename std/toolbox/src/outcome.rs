//! Three-way result of a tool handler.

/// Result of a handler that degrades to an empty response instead of failing.
///
/// The MCP surface maps both [`Outcome::Empty`] and [`Outcome::Rejected`] to
/// the same empty payload. Keeping them apart here lets callers inside the
/// crate tell "nothing there" from "not allowed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The handler produced a value.
    Success(T),
    /// The input was valid but there was nothing to return.
    Empty,
    /// The input was refused, with the reason.
    Rejected(String),
}

impl<T: Default> Outcome<T> {
    /// Collapse into the wire value, using `T::default()` for empty and
    /// rejected outcomes.
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Empty | Outcome::Rejected(_) => T::default(),
        }
    }
}

impl<T> Outcome<T> {
    /// Whether the input was refused rather than merely empty.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use crate::outcome::Outcome;

    #[test]
    fn rejected_collapses_to_default() {
        let out: Outcome<String> = Outcome::Rejected("outside root".into());
        assert!(out.is_rejected());
        assert_eq!(out.into_inner(), "");
        assert_eq!(Outcome::<Vec<String>>::Empty.into_inner(), Vec::<String>::new());
        assert_eq!(Outcome::Success(vec![1]).into_inner(), vec![1]);
    }
}

use std::fmt;

/// Top-level view the presentation layer is showing.
///
/// A session-only state machine: the initial state is [`View::Collection`],
/// transitions happen only through explicit user navigation
/// ([`crate::App::navigate`]), and there is no terminal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// The active collection's item grid.
    #[default]
    Collection,
    /// Aggregate dashboard.
    Overview,
    /// Value breakdown per collection.
    Analysis,
    /// Settings and data management.
    Settings,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Overview => write!(f, "overview"),
            Self::Analysis => write!(f, "analysis"),
            Self::Settings => write!(f, "settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_view_is_collection() {
        assert_eq!(View::default(), View::Collection);
    }

    #[test]
    fn display_names() {
        assert_eq!(View::Analysis.to_string(), "analysis");
    }
}

/// Errors from foundation type construction and parsing.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A collection name was empty or all whitespace.
    #[error("collection name is empty")]
    EmptyName,

    /// An item id string was not a valid UUID.
    #[error("invalid item id: {0}")]
    InvalidItemId(String),
}

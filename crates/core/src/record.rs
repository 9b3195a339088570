use std::fmt::{Debug, Display};

/// A domain entity tracked by a record store.
///
/// The identity is assigned by the store and stays absent until the write that
/// created the record resolves. Every other field is opaque to the
/// reconciliation layer.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Store-assigned identifier.
    type Id: Clone + Eq + Debug + Display + Send + Sync + 'static;

    /// Returns the store-assigned identity, if any.
    fn id(&self) -> Option<&Self::Id>;

    /// Produces an independent copy with the same fields and identity state.
    fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Returns true once the store has assigned an identity.
    fn has_id(&self) -> bool {
        self.id().is_some()
    }
}

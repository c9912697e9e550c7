use crate::parts::RequestParts;

/// Trait providing response-shape modifiers for query builders.
pub trait Modifiable: Sized {
    /// Get a mutable reference to the request parts.
    fn modifiers_mut(&mut self) -> &mut RequestParts;

    /// Expect exactly one row back, as an object rather than an array.
    ///
    /// PostgREST answers zero or several rows with a `PGRST116` error.
    fn single(mut self) -> Self {
        self.modifiers_mut().single = true;
        self
    }
}

//! ID generation utilities.

use ulid::Ulid;

/// ID generator for stored rows.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs sort by creation time, which keeps the natural order of
    /// rows close to the `created_at` order the pages render.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ulid() {
        let id_gen = IdGenerator::new();
        let id1 = id_gen.generate();
        let id2 = id_gen.generate();

        assert_eq!(id1.len(), 26);
        assert_eq!(id2.len(), 26);
        assert_ne!(id1, id2);
        assert_eq!(id1, id1.to_lowercase());
    }
}

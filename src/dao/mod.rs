/// Persistence interface consumed by the coordination layer.
pub mod directory;
/// In-memory directory backing the binary and the test suites.
pub mod memory;
/// Entity definitions read from the persistence tier.
pub mod models;

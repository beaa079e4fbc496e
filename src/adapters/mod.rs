// Adapters layer: concrete implementations for external systems (files, tables).

pub mod storage;
pub mod table;

pub use storage::LocalStorage;

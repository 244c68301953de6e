//! Storage implementations for the order table

pub mod csv_file;
pub mod in_memory;

pub use csv_file::CsvTableStore;
pub use in_memory::InMemoryTableStore;

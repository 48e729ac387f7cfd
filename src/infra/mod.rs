// Adapters behind the application ports

pub mod csv_adapter;
pub mod in_memory;
pub mod workbook_adapter;

pub use csv_adapter::{CsvExportAdapter, CsvLocationAdapter};
pub use in_memory::{InMemoryExport, InMemoryRegistry};
pub use workbook_adapter::WorkbookAdapter;

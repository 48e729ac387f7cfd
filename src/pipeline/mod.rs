pub mod processing;
pub mod table;

pub use table::{Row, Table};

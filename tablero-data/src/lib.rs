pub mod cache;
pub mod error;
pub mod schema;
pub mod table;
pub mod value;
pub mod workbook;

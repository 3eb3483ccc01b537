pub mod error;
pub mod marks;

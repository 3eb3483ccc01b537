pub mod error;
pub mod output;
pub mod pages;
pub mod schemas;

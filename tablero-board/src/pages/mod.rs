pub mod growth;
pub mod institutions;
pub mod marketshare;
pub mod matrix;
pub mod participation;

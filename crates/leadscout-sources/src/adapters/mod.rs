//! Reference source adapters.

pub mod clay;
pub mod common;
pub mod internal_db;

pub use clay::ClayAdapter;
pub use internal_db::InternalDbAdapter;

//! In-memory persistence for users, tax records and employees.
//!
//! Tables live behind `parking_lot` locks with auto-increment ids. The
//! [`TaxStore`] handle is shared by all request handlers.

mod repository;
mod table;

pub use repository::TaxStore;
pub use table::{Rows, Table};

//! Command implementations

mod check;
mod list;
mod nrpe;

pub use check::{check_all, check_one};
pub use list::list;
pub use nrpe::nrpe;

pub mod book;
pub mod record;

pub use book::*;
pub use record::*;

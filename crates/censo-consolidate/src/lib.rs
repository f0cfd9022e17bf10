pub mod aggregate;
pub mod numeric;

pub use aggregate::{aggregate, default_cutoff, filter_by_dates};
pub use numeric::read_leading_f64;

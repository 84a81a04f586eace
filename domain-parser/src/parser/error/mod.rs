pub mod kind;

pub use domain_error::Error;

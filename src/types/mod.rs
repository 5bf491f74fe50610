pub mod errors;
pub mod hours;

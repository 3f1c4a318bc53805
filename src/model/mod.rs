pub mod price;
pub mod signal;
pub mod trade;

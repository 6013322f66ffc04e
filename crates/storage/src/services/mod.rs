pub mod currency;
pub mod search;

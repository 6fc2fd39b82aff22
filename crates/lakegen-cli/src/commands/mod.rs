pub mod consume;
pub mod generate;

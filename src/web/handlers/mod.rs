pub mod proximity;
pub mod similarity;

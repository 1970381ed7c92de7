pub mod parse;
pub mod serve;

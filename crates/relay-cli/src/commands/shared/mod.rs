pub mod parse;
pub mod payload;
pub mod rows;
pub mod window;

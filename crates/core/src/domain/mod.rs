pub mod overview;
pub mod table;

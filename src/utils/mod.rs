pub mod date;
pub mod fields;
pub mod table;

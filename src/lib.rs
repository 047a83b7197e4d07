pub mod adapter;
pub mod domain;
pub mod shell;
pub mod utils;

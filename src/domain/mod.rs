pub mod engine;
pub mod entity;
pub mod outbound;
pub mod repository;
pub mod worker;

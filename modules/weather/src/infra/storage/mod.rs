pub mod entity;
pub mod migrations;
pub mod repos;

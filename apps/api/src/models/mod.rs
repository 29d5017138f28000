pub mod account;
pub mod application;
pub mod branch;
pub mod company;
pub mod drive;
pub mod posting;
pub mod student;

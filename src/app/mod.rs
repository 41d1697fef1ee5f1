pub mod steps;
pub mod tasks;

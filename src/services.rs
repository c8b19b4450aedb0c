pub mod backends;
pub mod base;
pub mod controller;
pub mod observability;

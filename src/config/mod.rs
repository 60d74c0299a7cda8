pub mod app;
pub mod csrf;
pub mod env;
pub mod web;

pub mod api;
pub mod blog;
pub mod cli;
pub mod db;
pub mod paths;

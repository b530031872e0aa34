pub mod controller;
pub mod index;
pub mod loader;
pub mod random;
pub mod settings;
pub mod store;
pub mod table;

pub mod dialogue;
pub mod entity;
pub mod mood;

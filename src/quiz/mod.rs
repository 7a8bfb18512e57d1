// src/quiz/mod.rs

pub mod registry;
pub mod scoring;
pub mod validate;

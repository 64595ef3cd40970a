//! Skill matcher library: CV skill extraction and job requirement matching

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod vocabulary;

pub use config::Config;
pub use error::{Result, SkillMatchError};
pub use processing::engine::SkillMatchEngine;

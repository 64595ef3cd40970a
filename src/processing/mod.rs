//! Skill extraction, matching and ranking

pub mod aggregator;
pub mod canonical;
pub mod engine;
pub mod matcher;
pub mod ranker;
pub mod skill_extractor;

//! Input processing module
//! Handles format detection, document fetching and text extraction

pub mod fetcher;
pub mod file_detector;
pub mod text_extractor;

//! API clients for external services
//!
//! - YouTube: video search and mix playlist pagination
//! - Converter: direct audio links via the RapidAPI conversion service

pub mod converter;
pub mod youtube;

pub use converter::ConverterClient;
pub use youtube::YoutubeClient;

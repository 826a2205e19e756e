pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod gateway;
pub mod gemini;
pub mod i18n;
pub mod orchestrator;
pub mod preferences;
pub mod translation;
pub mod voice;

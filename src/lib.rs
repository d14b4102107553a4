//! AskAI Library
//!
//! Core modules for the AskAI selection-to-answer overlay assistant.

pub mod config;
pub mod error;
pub mod gui;
pub mod hotkey;
pub mod input;
pub mod llm;
pub mod models;
pub mod overlay;
pub mod query;
pub mod selection;

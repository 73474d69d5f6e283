//! Gemini REST client for the timeloom pipeline.
//!
//! Wraps the three generative-media endpoint families the pipeline
//! consumes (Imagen text-to-image via `:predict`, Gemini multimodal
//! image edit via `:generateContent`, and Veo video synthesis via
//! `:predictLongRunning` plus operation polling) and implements the
//! [`timeloom_core::MediaProvider`] trait on top of them.

pub mod client;
pub mod provider;
pub mod wire;

pub use client::{GeminiApiError, GeminiClient};

pub mod catalog;
pub mod gemini;

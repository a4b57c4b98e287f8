//! Adhikar - digitization of Forest Rights Act claim forms.
//!
//! Turns photographed or scanned FRA claim forms (Form A/B/C) into structured,
//! validated claim data:
//!
//! 1. [`ocr`] recognizes text page by page through a lifecycle-managed engine.
//! 2. [`pipeline`] drives the engine across an upload batch and combines text.
//! 3. [`forms`] classifies the form and extracts named fields.
//! 4. [`validation`] checks the extracted claim against statutory rules.

#![allow(clippy::should_implement_trait)]

pub mod cli;
pub mod config;
pub mod forms;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod validation;

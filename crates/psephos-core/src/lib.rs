//! Core types and trait definitions for the psephos word catalog.
//!
//! Scoring, filtering and the store trait. No HTTP or database code lives
//! here.

// `CatalogStore` spells out `Send` on its futures where it matters.
#![allow(async_fn_in_trait)]

pub mod filter;
pub mod scoring;
pub mod store;
pub mod word;

pub use scoring::{Scores, calculate, normalize_word, reduce_number};
pub use word::{NewWord, WordRecord, WordScores};

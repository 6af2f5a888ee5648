//! # Plainwiki Architecture
//!
//! Plainwiki is a personal wiki where every page is a plain text file. There
//! is no database and no markup: a page is a title and the bytes stored
//! under it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Binary (main.rs, args.rs)                                  │
//! │  - Parses arguments, loads config, sets up logging          │
//! │  - Binds the listener; the ONLY place that exits            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (web/)                                          │
//! │  - Routes, request guards, request logging                  │
//! │  - Maps errors to status codes                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Application Context (app.rs)                               │
//! │  - Store + templates + index handle, built once at startup  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/) and Page Index (index.rs)           │
//! │  - PageStore trait: FileStore (production), InMemoryStore   │
//! │  - Index snapshots rebuilt by a background worker           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Titles
//!
//! A title is both the page key and its file name, so it is validated once,
//! at the edge, into a [`model::Title`]. Letters, digits and whitespace only.
//!
//! ## Module Overview
//!
//! - [`app`]: The application context handed to every request
//! - [`web`]: Router, handlers, extractors and middleware
//! - [`store`]: Storage abstraction and implementations
//! - [`index`]: Page index snapshots and the indexing worker
//! - [`model`]: Core data types (`Page`, `Title`)
//! - [`render`]: HTML templates
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod app;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod render;
pub mod store;
pub mod web;

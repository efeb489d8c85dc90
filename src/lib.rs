//! Quillsync Core Library
//!
//! This crate reconciles a local note-taking application's in-memory note
//! model with a remote revisioned document store. It translates between the
//! local note schema and the remote document schema, tracks per-note revision
//! tokens to detect concurrent remote changes, resolves write conflicts by
//! retry, and batches identifier allocation for new documents.
//!
//! # Quick Start
//!
//! ```text
//! let mut engine = SyncEngine::new(store_client)?;
//!
//! // Create a note
//! let (note, status) = engine.add_note("hello".into())?;
//!
//! // List notes (metadata only, no content)
//! let (notes, _) = engine.get_note_list(None)?;
//! ```
//!
//! # Modules
//!
//! - `engine`: Sync orchestration (main entry point)
//! - `translate`: Note ⇄ remote document schema mapping
//! - `ledger`: Per-key revision tracking and syncnum derivation
//! - `idpool`: Batched identifier allocation
//! - `remote`: Remote store abstraction consumed by the engine
//! - `models`: Data structures for notes and documents
//! - `config`: Engine configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod idpool;
pub mod ledger;
pub mod models;
pub mod remote;
pub mod translate;

pub use config::Config;
pub use engine::SyncEngine;
pub use error::{SyncError, SyncResult};
pub use idpool::IdPool;
pub use ledger::RevisionLedger;
pub use models::{NewNote, Note, RemoteDocument, Status};
pub use remote::{DocumentRow, RemoteStore, RemoteStoreError, SaveReceipt};

//! ffdash-core - Ingestion, storage and aggregation for fantasy league results
//!
//! Spreadsheet workbooks are read sheet by sheet, each row is normalized onto
//! a canonical record shape, and the records replace the contents of an
//! in-memory SQLite store that serves the league aggregates.
//!
//! # Usage
//!
//! ```ignore
//! use ffdash_core::{ingest, Store, YearFilter};
//!
//! let store = Store::open_in_memory()?;
//! ingest::ingest_file(&store, "fantasy_results.xlsx")?;
//! let standings = store.standings(&YearFilter::All)?;
//! ```

pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod queries;
pub mod store;
pub mod workbook;

pub use error::{FilterError, IngestError, IngestResult, StoreError, StoreResult};
pub use ingest::IngestSummary;
pub use models::*;
pub use store::Store;
pub use workbook::Workbook;

// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statement ingestion for the Domo assistant.
//!
//! The extract/confirm/commit pipeline: a statement document is turned
//! into candidate records by [`StatementExtractor`], the batch waits in
//! [`ExtractionCache`] under a TTL, and a later commit turn drains it.

pub mod cache;
pub mod extractor;
pub mod types;

pub use cache::{ExtractionCache, EXTRACTION_TTL_MINUTES};
pub use extractor::{parse_records_response, StatementExtractor};
pub use types::{CachedExtraction, ExtractedRecord};

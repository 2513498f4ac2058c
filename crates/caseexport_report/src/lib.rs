//! `caseexport_report` v1:
//! Case report assembly on top of the `caseexport_io_xlsx` layout engine.
//!
//! Modules:
//! - `spec`     : options/errors
//! - `document` : document model, filters, value conversion
//! - `store`    : document store trait and in-memory/JSON-dump store
//! - `provider` : related-collection lookups by case id
//! - `section`  : per-entity field mappings
//! - `assemble` : section sequencing and cursor threading
//! - `export`   : case lookup, unique file naming and persistence
//! - `report`   : run-time report model

pub mod assemble;
pub mod document;
pub mod export;
pub mod provider;
pub mod report;
pub mod section;
pub mod spec;
pub mod store;

pub use assemble::assemble_report;
pub use document::{Document, SpecDocumentFilter};
pub use export::{
    derive_report_file_name, derive_unique_report_path, export_case_report, find_case_document,
    preview_case_report,
};
pub use provider::{CaseDataProvider, StoreCaseDataProvider};
pub use report::{ReportCase, ReportCaseBuilder, SpecSectionSlice};
pub use spec::{ReportError, SpecCollectionNames, SpecReportOptions, StoreError};
pub use store::{DocumentStore, MemoryDocumentStore};

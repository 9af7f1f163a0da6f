//! mtrack report: printable inspection reports
//!
//! ```text
//! history ──→ plan_periods ──→ catalogue fetch ──┐
//!                                                 ├─→ assemble ──→ PrintableReport ──→ ReportRenderer
//!                       attachments fetch ───────┘
//! ```
//!
//! # Example
//!
//! ```
//! use mtrack_core::{MachineRecord, RowStatus};
//! use mtrack_report::{build_report, AttachmentSet, Catalogue};
//! use serde_json::json;
//!
//! let catalogue = Catalogue::from_value(json!({
//!     "groups": [{ "group": { "name": "Hydraulics" }, "items": [{ "id": 7, "item_name": "1.1 Oil level" }] }]
//! })).unwrap();
//! let attachments = AttachmentSet::from_payload(&json!([{ "model_checklist_item_id": "7", "description": "leak" }]));
//!
//! let rows = build_report(&catalogue, &attachments, &MachineRecord::with_status("running"));
//! assert_eq!(rows[0].status, RowStatus::Fail);
//! assert_eq!(rows[0].name, "Oil level");
//! ```

pub mod assembler;
pub mod attachments;
pub mod catalogue;
pub mod periods;
pub mod printable;
pub mod renderer;
pub mod templates;

pub use assembler::{
    assemble, build_report, plan_periods, strip_numbering, PeriodPlan, ReportOutcome,
    ReportSummary,
};
pub use attachments::{normalize, AttachmentSet};
pub use catalogue::{Catalogue, CatalogueGroup, CatalogueItem};
pub use periods::{select_periods, Period, PeriodSelection};
pub use printable::{PrintableGroup, PrintableReport};
pub use renderer::{ReportRenderer, BUILTIN_TEMPLATES, HTML_TEMPLATE, TEXT_TEMPLATE};
pub use templates::TemplatesFile;

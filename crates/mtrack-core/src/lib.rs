//! mtrack core: inspection data model, shift buckets and errors
//!
//! Every type here is transient. Values are built per request from
//! already-fetched backend data or operator input and are never stored
//! by the engine itself.

pub mod clock;
pub mod data_model;
pub mod envelope;
pub mod error;
pub mod field;
pub mod shift;

pub use clock::{Clock, FixedClock, OffsetClock, SystemClock};
pub use data_model::{
    ChecklistItem, FailureAttachment, InspectionHistoryFlags, ItemId, ItemStatus, MachineRecord,
    Measurement, ParameterItem, ReportGroup, ReportRow, RowStatus,
};
pub use envelope::unwrap_envelope;
pub use error::MtrackError;
pub use field::FieldValue;
pub use shift::{resolve, Shift, ShiftResolver, ShiftWindow};

/// Engine version reported by the API
pub const MTRACK_VERSION: &str = "1.0.0";

pub mod entry;
pub mod export_record;
pub mod pay_code;

pub use entry::TimeEntry;
pub use export_record::{ExportRecord, ExportStatus};
pub use pay_code::{PayCodeKind, PayCodeMap};

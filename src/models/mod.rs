pub mod bucket;
pub mod cell_date;
pub mod priority;
pub mod status;
pub mod ticket_summary;
pub mod work_item;

pub use bucket::Bucket;
pub use cell_date::CellDate;
pub use priority::Priority;
pub use status::Status;
pub use ticket_summary::{BreakdownEntry, SourceFormat, TicketSummary};
pub use work_item::{WorkItem, WorkSession};

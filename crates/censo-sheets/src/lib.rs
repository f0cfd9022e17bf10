//! Destination workbook access and row placement.
//!
//! The workbook side of the census pipeline: reading the bed roster,
//! resolving which worksheet each consolidated record belongs to, and
//! appending rows at the next free offset. All workbook access goes through
//! [`WorksheetAccessor`], with [`MemoryWorkbook`] as the JSON-file-backed
//! implementation.

pub mod accessor;
pub mod error;
pub mod placement;
pub mod roster;

pub use accessor::{MemoryWorkbook, WorksheetAccessor};
pub use error::{Result, SheetError};
pub use placement::{DEFAULT_IGNORED_SHEETS, PlacementOptions, SLOT_COUNT, place};
pub use roster::{DEFAULT_ROSTER_SHEET, ROSTER_DATA_ROWS, read_roster};

//! Weekly class schedule: recurring classes, week navigation and the
//! projection of classes onto a Mon..Fri time grid.

pub mod event;
pub mod projector;
pub mod store;
pub mod time_grid;
pub mod week;

pub use event::{ClassEvent, ClassId};
pub use projector::{Placement, WeekView, project, week_view};
pub use store::{ClassStore, StoreError};
pub use week::{Week, WeekCursor, WeekOutOfRange, monday_of};

pub mod profile;
pub mod tasks;

use chrono::NaiveDate;
use tracing::debug;

use crate::schedule::{ClassStore, Week, WeekCursor, WeekOutOfRange, WeekView, week_view};
use crate::storage::KeyValueStorage;

pub use profile::Profile;
pub use tasks::{Task, TaskList};

/// All dashboard state, owned by whoever serves it.
pub struct Dashboard<S> {
    pub classes: ClassStore<S>,
    pub cursor: WeekCursor,
    pub tasks: TaskList<S>,
    pub profile: Profile<S>,
}

impl<S: KeyValueStorage + Clone> Dashboard<S> {
    /// Loads every section from `storage` and points the cursor at the week
    /// containing `today`.
    pub fn open(storage: S, today: NaiveDate) -> Result<Self, WeekOutOfRange> {
        let cursor = WeekCursor::new(today)?;
        let mut classes = ClassStore::new(storage.clone());
        classes.load_all();
        Ok(Self {
            classes,
            cursor,
            tasks: TaskList::load(storage.clone()),
            profile: Profile::load(storage),
        })
    }
}

impl<S: KeyValueStorage> Dashboard<S> {
    /// The week under the cursor.
    pub fn current_week(&self) -> WeekView {
        self.project(&self.cursor.week())
    }

    /// The week containing `date`, leaving the cursor where it is.
    pub fn week_of(&self, date: NaiveDate) -> Result<WeekView, WeekOutOfRange> {
        Ok(self.project(&Week::containing(date)?))
    }

    fn project(&self, week: &Week) -> WeekView {
        debug!(monday = %week.monday(), "projecting week");
        week_view(week, self.classes.list())
    }
}

use chrono::NaiveDate;

use crate::storage::{KeyValueStorage, NOTES_KEY, USER_NAME_KEY, read_json_or_default, write_json};

pub const DEFAULT_USER_NAME: &str = "User";

/// The user's name and free-form notes.
pub struct Profile<S> {
    storage: S,
    user_name: Option<String>,
    notes: String,
}

impl<S: KeyValueStorage> Profile<S> {
    pub fn load(storage: S) -> Self {
        let user_name: Option<String> = read_json_or_default(&storage, USER_NAME_KEY);
        let notes = read_json_or_default(&storage, NOTES_KEY);
        Self {
            storage,
            user_name: user_name.filter(|n| !n.trim().is_empty()),
            notes,
        }
    }

    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(DEFAULT_USER_NAME)
    }

    /// Returns `false` and keeps the current name when `name` is blank.
    pub fn set_user_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.user_name = Some(name.to_string());
        write_json(&self.storage, USER_NAME_KEY, name);
        true
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: String) {
        write_json(&self.storage, NOTES_KEY, &notes);
        self.notes = notes;
    }

    pub fn greeting(&self, hour: u32) -> String {
        format!("{}, {}", greeting_for_hour(hour), self.user_name())
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..12 => "Good Morning",
        12..18 => "Good Afternoon",
        _ => "Good Evening",
    }
}

/// e.g. `Sunday, October 18, 2026`.
pub fn today_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_greeting_for_hour() {
        assert_eq!(greeting_for_hour(0), "Good Morning");
        assert_eq!(greeting_for_hour(11), "Good Morning");
        assert_eq!(greeting_for_hour(12), "Good Afternoon");
        assert_eq!(greeting_for_hour(17), "Good Afternoon");
        assert_eq!(greeting_for_hour(18), "Good Evening");
        assert_eq!(greeting_for_hour(23), "Good Evening");
    }

    #[test]
    fn test_default_and_changed_name() {
        let storage = MemoryStorage::new();
        let mut profile = Profile::load(storage.clone());
        assert_eq!(profile.greeting(9), "Good Morning, User");

        assert!(!profile.set_user_name("   "));
        assert_eq!(profile.user_name(), "User");

        assert!(profile.set_user_name(" Ada "));
        assert_eq!(Profile::load(storage).greeting(20), "Good Evening, Ada");
    }

    #[test]
    fn test_notes_round_trip() {
        let storage = MemoryStorage::new();
        let mut profile = Profile::load(storage.clone());
        assert_eq!(profile.notes(), "");
        profile.set_notes("exam on friday\n  bring calculator".to_string());
        assert_eq!(
            Profile::load(storage).notes(),
            "exam on friday\n  bring calculator"
        );
    }

    #[test]
    fn test_today_label() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(today_label(date), "Sunday, October 18, 2026");
    }
}

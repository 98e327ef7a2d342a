use crate::util::time;
use serde::{Deserialize, Serialize};

/// Storage key for [`AppSettings`] inside eframe persistence.
pub const SETTINGS_KEY: &str = "photo_editor_settings";

/// Delay between a save request and the actual write to storage, in seconds.
pub const SAVE_DELAY_SECS: f64 = 1.0;

/// Application-wide settings the photo editor reads and writes.
pub trait SettingsStore {
    fn photo_editor_brush(&self) -> Vec<u8>;

    fn set_photo_editor_brush(&mut self, bytes: Vec<u8>);

    /// Schedule a write of all settings; returns immediately.
    fn save_settings_delayed(&mut self);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    /// Serialized [`crate::brush::Brush`] last used in the photo editor
    photo_editor_brush: Vec<u8>,

    #[serde(skip)]
    save_due_at: Option<f64>,
}

impl AppSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`SettingsStore::save_settings_delayed`] with an explicit clock.
    ///
    /// An already scheduled save keeps its deadline, so a stream of requests
    /// cannot postpone the write forever.
    pub fn schedule_save(&mut self, now: f64) {
        if self.save_due_at.is_none() {
            self.save_due_at = Some(now + SAVE_DELAY_SECS);
        }
    }

    pub fn is_save_pending(&self) -> bool {
        self.save_due_at.is_some()
    }

    /// Seconds left until the pending save, if any.
    pub fn save_due_in(&self, now: f64) -> Option<f64> {
        self.save_due_at.map(|due| (due - now).max(0.0))
    }

    /// Returns true exactly once per scheduled save, when its deadline passed.
    pub fn take_due_save(&mut self, now: f64) -> bool {
        match self.save_due_at {
            Some(due) if now >= due => {
                self.save_due_at = None;
                true
            }
            _ => false,
        }
    }
}

impl SettingsStore for AppSettings {
    fn photo_editor_brush(&self) -> Vec<u8> {
        self.photo_editor_brush.clone()
    }

    fn set_photo_editor_brush(&mut self, bytes: Vec<u8>) {
        self.photo_editor_brush = bytes;
    }

    fn save_settings_delayed(&mut self) {
        self.schedule_save(time::current_time_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_save_fires_once() {
        let mut settings = AppSettings::new();
        assert!(!settings.take_due_save(100.0));

        settings.schedule_save(10.0);
        assert!(settings.is_save_pending());
        assert!(!settings.take_due_save(10.5));
        assert!(settings.take_due_save(11.0));
        assert!(!settings.take_due_save(12.0));
        assert!(!settings.is_save_pending());
    }

    #[test]
    fn test_repeated_schedule_keeps_deadline() {
        let mut settings = AppSettings::new();
        settings.schedule_save(10.0);
        settings.schedule_save(10.9);

        assert_eq!(settings.save_due_in(10.5), Some(0.5));
        assert!(settings.take_due_save(11.0));
    }

    #[test]
    fn test_brush_bytes_are_stored() {
        let mut settings = AppSettings::new();
        assert!(settings.photo_editor_brush().is_empty());

        settings.set_photo_editor_brush(vec![1, 2, 3]);
        assert_eq!(settings.photo_editor_brush(), vec![1, 2, 3]);
    }
}

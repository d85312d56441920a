/// Test utilities for driving a picker through event sequences
///
/// ## Usage Examples
///
/// ```ignore
/// use crate::infrastructure::test_utils::test_harness::{Driver, date};
///
/// #[test]
/// fn my_test() {
///     let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 3, 15)), None);
///     driver.send(Msg::InputFocused);
///     assert!(driver.picker.is_open());
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::application::{DatePicker, Msg, Settings, default_settings};
    use crate::domain::DateEvent;
    use chrono::{Datelike, NaiveDate, Weekday};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    /// Default settings with Saturdays and Sundays disabled
    pub fn weekend_settings() -> Settings {
        default_settings().with_disabled(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
    }

    /// Plays the host's role: owns the selected date and threads every
    /// transition's output into the next one
    pub struct Driver {
        pub settings: Settings,
        pub picker: DatePicker,
        pub selected: Option<NaiveDate>,
        pub events: Vec<DateEvent>,
    }

    impl Driver {
        pub fn new(picker: DatePicker, selected: Option<NaiveDate>) -> Self {
            Self::with_settings(default_settings(), picker, selected)
        }

        pub fn with_settings(
            settings: Settings,
            picker: DatePicker,
            selected: Option<NaiveDate>,
        ) -> Self {
            Self {
                settings,
                picker,
                selected,
                events: Vec::new(),
            }
        }

        pub fn send(&mut self, msg: Msg) -> &mut Self {
            let update = self.picker.clone().update(&self.settings, msg, self.selected);
            self.picker = update.picker;
            self.selected = update.selected;
            self.events.push(update.event);
            self
        }

        pub fn send_all(&mut self, msgs: impl IntoIterator<Item = Msg>) -> &mut Self {
            for msg in msgs {
                self.send(msg);
            }
            self
        }

        pub fn last_event(&self) -> Option<&DateEvent> {
            self.events.last()
        }
    }

    #[test]
    fn test_driver_threads_selection() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 3, 15)), None);
        driver.send_all([
            Msg::InputFocused,
            Msg::TextEdited("2024/03/20".to_string()),
            Msg::TextCommitted,
        ]);

        assert_eq!(driver.selected, Some(date(2024, 3, 20)));
        assert_eq!(driver.events.len(), 3);
        assert_eq!(driver.last_event(), Some(&DateEvent::Picked(date(2024, 3, 20))));
    }

    #[test]
    fn test_weekend_settings() {
        let settings = weekend_settings();
        assert!(settings.disabled(date(2024, 3, 16)));
        assert!(settings.disabled(date(2024, 3, 17)));
        assert!(!settings.disabled(date(2024, 3, 18)));
    }
}

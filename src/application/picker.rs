use crate::application::Settings;
use crate::domain::{DateEvent, InputError, date_tuple};
use crate::infrastructure::Clock;
use chrono::NaiveDate;
use serde::Serialize;

/// Events a host feeds into the picker. Each one maps to a single binding in
/// the rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    TodayResolved(NaiveDate),
    FocusChanged(NaiveDate),
    Picked(Option<NaiveDate>),
    TextEdited(String),
    TextCommitted,
    InputFocused,
    InputBlurred,
    PointerDown,
    PointerUp,
}

/// Build the event a host sends to select (or clear) a date programmatically.
pub fn pick(date: Option<NaiveDate>) -> Msg {
    Msg::Picked(date)
}

/// Side effects the host has to run on the picker's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ResolveToday,
}

impl Effect {
    /// Run the effect and return the event that reports its completion.
    pub fn perform(self, clock: &dyn Clock) -> Option<Msg> {
        match self {
            Effect::None => None,
            Effect::ResolveToday => Some(Msg::TodayResolved(clock.today())),
        }
    }
}

/// Transient interaction state of one picker instance.
///
/// The selected date is not in here: the host owns it and hands it to every
/// `update` and `render` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatePicker {
    open: bool,
    force_open: bool,
    focused: Option<NaiveDate>,
    input_text: Option<String>,
    today: NaiveDate,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub picker: DatePicker,
    pub effect: Effect,
    pub selected: Option<NaiveDate>,
    pub event: DateEvent,
}

impl DatePicker {
    fn with_dates(today: NaiveDate, focused: Option<NaiveDate>) -> Self {
        Self {
            open: false,
            force_open: false,
            focused,
            input_text: None,
            today,
        }
    }

    /// A closed picker focused on the epoch until today's date arrives
    /// through [`Effect::ResolveToday`].
    pub fn init() -> (Self, Effect) {
        let placeholder = NaiveDate::default();
        (Self::with_dates(placeholder, Some(placeholder)), Effect::ResolveToday)
    }

    pub fn init_from_date(date: NaiveDate) -> Self {
        Self::with_dates(date, Some(date))
    }

    pub fn init_from_dates(today: NaiveDate, selected: Option<NaiveDate>) -> Self {
        Self::with_dates(today, selected)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focused_date(&self) -> Option<NaiveDate> {
        self.focused
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.today
    }

    pub(crate) fn input_text(&self) -> Option<&str> {
        self.input_text.as_deref()
    }

    /// The date the calendar is built around: focus first, then the
    /// selection, then today.
    pub fn current_date(&self, selected: Option<NaiveDate>) -> NaiveDate {
        self.focused.or(selected).unwrap_or(self.today)
    }

    pub fn update(mut self, settings: &Settings, msg: Msg, selected: Option<NaiveDate>) -> Update {
        log::debug!("datepicker event: {:?}", msg);

        let mut new_selected = selected;
        let mut event = DateEvent::None;

        match msg {
            Msg::TodayResolved(date) => {
                self.focused = Some(date);
                self.today = date;
            }
            Msg::FocusChanged(date) => {
                self.focused = Some(date);
            }
            Msg::Picked(date) => {
                self.open = false;
                self.input_text = None;
                self.focused = None;
                new_selected = date;
                event = match date {
                    Some(date) => DateEvent::Picked(date),
                    None => DateEvent::Cleared,
                };
            }
            Msg::TextEdited(text) => {
                self.input_text = Some(text);
            }
            Msg::TextCommitted => {
                let (candidate, outcome) = self.parse_input(settings);
                event = outcome;

                if let Some(candidate) = candidate {
                    if !same_day(candidate, selected) {
                        self.input_text = None;
                        self.focused = candidate;
                        new_selected = candidate;
                        if let Some(date) = candidate {
                            log::info!("datepicker committed {}", date);
                        }
                    } else if matches!(event, DateEvent::Picked(_)) {
                        event = DateEvent::None;
                    }
                }
            }
            Msg::InputFocused => {
                self.open = true;
                self.force_open = false;
            }
            Msg::InputBlurred => {
                self.open = self.force_open;
            }
            Msg::PointerDown => {
                self.force_open = true;
            }
            Msg::PointerUp => {
                self.force_open = false;
            }
        }

        Update {
            picker: self,
            effect: Effect::None,
            selected: new_selected,
            event,
        }
    }

    /// Turn the pending text into a candidate selection. The outer `None`
    /// means there was nothing to commit.
    fn parse_input(&self, settings: &Settings) -> (Option<Option<NaiveDate>>, DateEvent) {
        let text = self.input_text.as_deref().unwrap_or("").trim();
        if text.is_empty() {
            return (None, DateEvent::FailedInput(InputError::EmptyString));
        }

        match settings.parse(text) {
            Ok(date) if settings.disabled(date) => {
                log::debug!("datepicker rejected disabled date {}", date);
                (Some(None), DateEvent::FailedInput(InputError::Disabled(date)))
            }
            Ok(date) => (Some(Some(date)), DateEvent::Picked(date)),
            Err(reason) => {
                log::debug!("datepicker could not parse {:?}: {}", text, reason);
                (
                    Some(None),
                    DateEvent::FailedInput(InputError::Invalid(text.to_string())),
                )
            }
        }
    }
}

fn same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    a.map(date_tuple) == b.map(date_tuple)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::FixedClock;
    use crate::infrastructure::test_utils::test_harness::{Driver, date, weekend_settings};

    #[test]
    fn test_init_is_closed_and_asks_for_today() {
        let (picker, effect) = DatePicker::init();
        assert!(!picker.is_open());
        assert_eq!(effect, Effect::ResolveToday);
        assert_eq!(picker.focused_date(), Some(NaiveDate::default()));
        assert_eq!(picker.input_text(), None);
    }

    #[test]
    fn test_resolve_today_effect() {
        let clock = FixedClock::new(date(2024, 3, 15));
        assert_eq!(
            Effect::ResolveToday.perform(&clock),
            Some(Msg::TodayResolved(date(2024, 3, 15)))
        );
        assert_eq!(Effect::None.perform(&clock), None);
    }

    #[test]
    fn test_today_resolved_sets_focus_and_today() {
        let mut driver = Driver::new(DatePicker::init().0, None);
        driver.send(Msg::TodayResolved(date(2024, 3, 15)));
        assert_eq!(driver.picker.focused_date(), Some(date(2024, 3, 15)));
        assert_eq!(driver.picker.today(), date(2024, 3, 15));
        assert_eq!(driver.selected, None);
    }

    #[test]
    fn test_init_from_dates() {
        let picker = DatePicker::init_from_dates(date(2024, 3, 15), Some(date(2020, 1, 1)));
        assert_eq!(picker.today(), date(2024, 3, 15));
        assert_eq!(picker.focused_date(), Some(date(2020, 1, 1)));

        let picker = DatePicker::init_from_date(date(2021, 5, 5));
        assert_eq!(picker.today(), date(2021, 5, 5));
        assert_eq!(picker.focused_date(), Some(date(2021, 5, 5)));
    }

    #[test]
    fn test_focus_changed_leaves_selection() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 3, 15)), None);
        driver.send(Msg::FocusChanged(date(2024, 4, 1)));
        assert_eq!(driver.picker.focused_date(), Some(date(2024, 4, 1)));
        assert_eq!(driver.selected, None);
    }

    #[test]
    fn test_pick_closes_and_resets() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 1, 1)), None);
        driver.send(Msg::InputFocused);
        driver.send(Msg::TextEdited("garbage".to_string()));
        driver.send(pick(Some(date(2024, 3, 15))));

        assert!(!driver.picker.is_open());
        assert_eq!(driver.picker.input_text(), None);
        assert_eq!(driver.picker.focused_date(), None);
        assert_eq!(driver.selected, Some(date(2024, 3, 15)));
        assert_eq!(driver.last_event(), Some(&DateEvent::Picked(date(2024, 3, 15))));
    }

    #[test]
    fn test_pick_none_clears_selection() {
        let mut driver = Driver::new(
            DatePicker::init_from_date(date(2024, 1, 1)),
            Some(date(2024, 1, 5)),
        );
        driver.send(pick(None));
        assert_eq!(driver.selected, None);
        assert_eq!(driver.last_event(), Some(&DateEvent::Cleared));
    }

    #[test]
    fn test_text_edited_only_stores_text() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 1, 1)), None);
        driver.send(Msg::TextEdited("2024/0".to_string()));
        assert_eq!(driver.picker.input_text(), Some("2024/0"));
        assert_eq!(driver.selected, None);
    }

    #[test]
    fn test_commit_blank_text_changes_nothing() {
        for text in ["", "   "] {
            let mut driver = Driver::new(
                DatePicker::init_from_date(date(2024, 1, 1)),
                Some(date(2024, 1, 5)),
            );
            driver.send(Msg::TextEdited(text.to_string()));
            let before = driver.picker.clone();
            driver.send(Msg::TextCommitted);

            assert_eq!(driver.picker, before);
            assert_eq!(driver.selected, Some(date(2024, 1, 5)));
            assert_eq!(
                driver.last_event(),
                Some(&DateEvent::FailedInput(InputError::EmptyString))
            );
        }
    }

    #[test]
    fn test_commit_without_any_text_changes_nothing() {
        let picker = DatePicker::init_from_date(date(2024, 1, 1));
        let mut driver = Driver::new(picker.clone(), None);
        driver.send(Msg::TextCommitted);
        assert_eq!(driver.picker, picker);
        assert_eq!(driver.selected, None);
    }

    #[test]
    fn test_commit_valid_text_selects_and_focuses() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 1, 1)), None);
        driver.send(Msg::TextEdited(" 2024-03-15 ".to_string()));
        driver.send(Msg::TextCommitted);

        assert_eq!(driver.selected, Some(date(2024, 3, 15)));
        assert_eq!(driver.picker.input_text(), None);
        assert_eq!(driver.picker.focused_date(), Some(date(2024, 3, 15)));
        assert_eq!(driver.last_event(), Some(&DateEvent::Picked(date(2024, 3, 15))));
    }

    #[test]
    fn test_commit_invalid_text_clears_selection() {
        let mut driver = Driver::new(
            DatePicker::init_from_date(date(2024, 1, 1)),
            Some(date(2024, 1, 5)),
        );
        driver.send(Msg::TextEdited("not a date".to_string()));
        driver.send(Msg::TextCommitted);

        assert_eq!(driver.selected, None);
        assert_eq!(driver.picker.input_text(), None);
        assert_eq!(driver.picker.focused_date(), None);
        assert_eq!(
            driver.last_event(),
            Some(&DateEvent::FailedInput(InputError::Invalid("not a date".to_string())))
        );
    }

    #[test]
    fn test_commit_invalid_text_without_selection_keeps_text() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 1, 1)), None);
        driver.send(Msg::TextEdited("nope".to_string()));
        driver.send(Msg::TextCommitted);

        assert_eq!(driver.selected, None);
        assert_eq!(driver.picker.input_text(), Some("nope"));
        assert_eq!(driver.picker.focused_date(), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_commit_disabled_date_is_rejected() {
        // 2024-03-16 is a Saturday
        let mut driver = Driver::with_settings(
            weekend_settings(),
            DatePicker::init_from_date(date(2024, 1, 1)),
            Some(date(2024, 3, 15)),
        );
        driver.send(Msg::TextEdited("2024/03/16".to_string()));
        driver.send(Msg::TextCommitted);

        assert_eq!(driver.selected, None);
        assert_eq!(
            driver.last_event(),
            Some(&DateEvent::FailedInput(InputError::Disabled(date(2024, 3, 16))))
        );
    }

    #[test]
    fn test_committing_selected_date_twice_is_idempotent() {
        let mut driver = Driver::new(
            DatePicker::init_from_date(date(2024, 1, 1)),
            Some(date(2024, 3, 15)),
        );
        driver.send(Msg::TextEdited("2024/03/15".to_string()));
        driver.send(Msg::TextCommitted);
        let after_first = driver.picker.clone();
        driver.send(Msg::TextCommitted);

        assert_eq!(driver.picker, after_first);
        assert_eq!(driver.picker.input_text(), Some("2024/03/15"));
        assert_eq!(driver.picker.focused_date(), Some(date(2024, 1, 1)));
        assert_eq!(driver.selected, Some(date(2024, 3, 15)));
        assert_eq!(driver.last_event(), Some(&DateEvent::None));
    }

    #[test]
    fn test_focus_then_blur_closes() {
        let mut driver = Driver::new(DatePicker::init().0, None);
        assert!(!driver.picker.is_open());

        driver.send(Msg::InputFocused);
        assert!(driver.picker.is_open());
        assert!(!driver.picker.force_open);

        driver.send(Msg::InputBlurred);
        assert!(!driver.picker.is_open());
    }

    #[test]
    fn test_pointer_down_keeps_popup_open_through_blur() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 3, 15)), None);
        driver.send(Msg::InputFocused);

        driver.send(Msg::PointerDown);
        driver.send(Msg::InputBlurred);
        assert!(driver.picker.is_open());

        driver.send(Msg::PointerUp);
        assert!(driver.picker.is_open());

        driver.send(Msg::InputBlurred);
        assert!(!driver.picker.is_open());
    }

    #[test]
    fn test_focus_resets_force_open() {
        let mut driver = Driver::new(DatePicker::init_from_date(date(2024, 3, 15)), None);
        driver.send(Msg::PointerDown);
        driver.send(Msg::InputFocused);
        driver.send(Msg::InputBlurred);
        assert!(!driver.picker.is_open());
    }

    #[test]
    fn test_update_never_requests_effects() {
        let picker = DatePicker::init_from_date(date(2024, 3, 15));
        let update = picker.update(&Settings::default(), Msg::InputFocused, None);
        assert_eq!(update.effect, Effect::None);
    }

    #[test]
    fn test_current_date_fallbacks() {
        let picker = DatePicker::init_from_dates(date(2024, 3, 15), None);
        assert_eq!(picker.current_date(Some(date(2020, 1, 1))), date(2020, 1, 1));
        assert_eq!(picker.current_date(None), date(2024, 3, 15));

        let picker = DatePicker::init_from_dates(date(2024, 3, 15), Some(date(2022, 2, 2)));
        assert_eq!(picker.current_date(Some(date(2020, 1, 1))), date(2022, 2, 2));
    }

    #[test]
    fn test_state_serializes_without_settings() {
        let picker = DatePicker::init_from_date(date(2024, 3, 15));
        let json = serde_json::to_value(&picker).unwrap();
        assert_eq!(json["open"], false);
        assert_eq!(json["today"], "2024-03-15");
    }
}

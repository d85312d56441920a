use crate::application::{Node, PickerConfig};
use crate::domain::YearRange;
use chrono::{Month, NaiveDate, Weekday};
use std::fmt::{self, Write};
use std::sync::Arc;

pub type DatePredicate = Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>;
pub type DateParser = Arc<dyn Fn(&str) -> Result<NaiveDate, String> + Send + Sync>;
pub type DateFormatter = Arc<dyn Fn(NaiveDate) -> String + Send + Sync>;
pub type DayFormatter = Arc<dyn Fn(Weekday) -> String + Send + Sync>;
pub type MonthFormatter = Arc<dyn Fn(Month) -> String + Send + Sync>;
pub type YearFormatter = Arc<dyn Fn(i32) -> String + Send + Sync>;
pub type CellFormatter = Arc<dyn Fn(&str) -> Node + Send + Sync>;

pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d";
pub const DEFAULT_CLASS_NAMESPACE: &str = "datepicker--";
pub const DEFAULT_PLACEHOLDER: &str = "Please pick a date...";

/// Everything the host decides about how the picker looks and behaves.
///
/// Settings are passed into every `update` and `render` call and are never
/// kept inside the picker state. Override fields with struct update syntax
/// or the `with_*` methods:
///
/// ```
/// use chrono::Weekday;
/// use datepicker::{Settings, default_settings};
///
/// let settings = Settings {
///     first_day_of_week: Weekday::Mon,
///     ..default_settings()
/// };
/// assert_eq!(settings.first_day_of_week, Weekday::Mon);
/// ```
#[derive(Clone)]
pub struct Settings {
    pub placeholder: String,
    pub class_namespace: String,
    pub container_class_list: Vec<(String, bool)>,
    pub input_class_list: Vec<(String, bool)>,
    pub input_name: Option<String>,
    pub input_id: Option<String>,
    pub input_attributes: Vec<(String, String)>,
    pub is_disabled: DatePredicate,
    pub parser: DateParser,
    pub date_formatter: DateFormatter,
    pub day_formatter: DayFormatter,
    pub month_formatter: MonthFormatter,
    pub year_formatter: YearFormatter,
    pub cell_formatter: CellFormatter,
    pub first_day_of_week: Weekday,
    pub change_year: YearRange,
}

pub fn default_settings() -> Settings {
    Settings {
        placeholder: DEFAULT_PLACEHOLDER.to_string(),
        class_namespace: DEFAULT_CLASS_NAMESPACE.to_string(),
        container_class_list: Vec::new(),
        input_class_list: Vec::new(),
        input_name: None,
        input_id: None,
        input_attributes: vec![("required".to_string(), "false".to_string())],
        is_disabled: Arc::new(|_| false),
        parser: parser_for(DEFAULT_DATE_FORMAT),
        date_formatter: formatter_for(DEFAULT_DATE_FORMAT),
        day_formatter: Arc::new(format_day),
        month_formatter: Arc::new(|month: Month| month.name().to_string()),
        year_formatter: Arc::new(|year: i32| year.to_string()),
        cell_formatter: Arc::new(|text: &str| Node::text(text)),
        first_day_of_week: Weekday::Sun,
        change_year: YearRange::Off,
    }
}

impl Default for Settings {
    fn default() -> Self {
        default_settings()
    }
}

impl Settings {
    /// Overlay a loaded configuration onto the defaults.
    pub fn from_config(config: &PickerConfig) -> Self {
        let defaults = default_settings();
        let date_format = config.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);

        Self {
            placeholder: config.placeholder.clone().unwrap_or(defaults.placeholder),
            class_namespace: config
                .class_namespace
                .clone()
                .unwrap_or(defaults.class_namespace),
            container_class_list: enabled_classes(&config.container_classes),
            input_class_list: enabled_classes(&config.input_classes),
            input_name: config.input_name.clone(),
            input_id: config.input_id.clone(),
            input_attributes: if config.input_attributes.is_empty() {
                defaults.input_attributes
            } else {
                config.input_attributes.clone().into_iter().collect()
            },
            parser: parser_for(date_format),
            date_formatter: formatter_for(date_format),
            first_day_of_week: config.first_day_of_week.unwrap_or(defaults.first_day_of_week),
            change_year: config.year_range.normalized(),
            ..defaults
        }
    }

    /// Prefix a bare class name with the configured namespace.
    pub fn class(&self, name: &str) -> String {
        format!("{}{}", self.class_namespace, name)
    }

    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    pub fn with_year_range(mut self, range: YearRange) -> Self {
        self.change_year = range.normalized();
        self
    }

    pub fn with_disabled<F>(mut self, predicate: F) -> Self
    where
        F: Fn(NaiveDate) -> bool + Send + Sync + 'static,
    {
        self.is_disabled = Arc::new(predicate);
        self
    }

    pub fn with_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str) -> Result<NaiveDate, String> + Send + Sync + 'static,
    {
        self.parser = Arc::new(parser);
        self
    }

    pub fn with_date_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(NaiveDate) -> String + Send + Sync + 'static,
    {
        self.date_formatter = Arc::new(formatter);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn disabled(&self, date: NaiveDate) -> bool {
        (self.is_disabled)(date)
    }

    pub fn parse(&self, text: &str) -> Result<NaiveDate, String> {
        (self.parser)(text)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        (self.date_formatter)(date)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("placeholder", &self.placeholder)
            .field("class_namespace", &self.class_namespace)
            .field("container_class_list", &self.container_class_list)
            .field("input_class_list", &self.input_class_list)
            .field("input_name", &self.input_name)
            .field("input_id", &self.input_id)
            .field("input_attributes", &self.input_attributes)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("change_year", &self.change_year)
            .finish_non_exhaustive()
    }
}

fn enabled_classes(classes: &[String]) -> Vec<(String, bool)> {
    classes.iter().map(|class| (class.clone(), true)).collect()
}

/// Accepts `format` first, then ISO dates with either separator.
pub fn parser_for(format: &str) -> DateParser {
    let format = format.to_string();
    Arc::new(move |text: &str| {
        let text = text.trim();
        [format.as_str(), "%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .find_map(|candidate| NaiveDate::parse_from_str(text, candidate).ok())
            .ok_or_else(|| format!("'{}' does not look like a date", text))
    })
}

/// Format `date` with a strftime pattern. `None` when the pattern asks for
/// something a date doesn't have (`%H`) or isn't a specifier at all (`%Q`).
pub fn try_format(date: NaiveDate, format: &str) -> Option<String> {
    let mut output = String::new();
    write!(output, "{}", date.format(format)).ok()?;
    Some(output)
}

/// Formatter for `format`, falling back to [`DEFAULT_DATE_FORMAT`] for
/// patterns a date can't satisfy.
pub fn formatter_for(format: &str) -> DateFormatter {
    let format = format.to_string();
    Arc::new(move |date: NaiveDate| {
        try_format(date, &format).unwrap_or_else(|| {
            log::warn!("date format {:?} failed, using {:?}", format, DEFAULT_DATE_FORMAT);
            date.format(DEFAULT_DATE_FORMAT).to_string()
        })
    })
}

pub fn format_day(day: Weekday) -> String {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
    .to_string()
}

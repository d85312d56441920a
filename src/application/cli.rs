use crate::application::{
    DatePicker, Msg, PickerConfig, PickerHost, PickerView, Settings, Theme, render,
};
use crate::domain::{YearContext, YearRange, add_dows, date_tuple, prepare_dates, year_range};
use crate::infrastructure::{Clock, EventLogHook, HookRegistry, LogHook, SystemClock};
use anyhow::anyhow;
use chrono::{Datelike, Month, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datepicker")]
#[command(about = "A calendar date picker for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a date interactively and print it
    Pick {
        /// Initially selected date (in the configured format, or YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// First day of the week, e.g. mon or sunday
        #[arg(short, long)]
        first_day: Option<Weekday>,
        /// Year list policy: off, between:A:B, more-or-less:N, from:Y or to:Y
        #[arg(short, long)]
        years: Option<YearRange>,
        /// Color theme (dark, light, minimal)
        #[arg(short, long, default_value = "dark")]
        theme: String,
        /// Append every date event to this file
        #[arg(long)]
        event_log: Option<PathBuf>,
    },
    /// Print the calendar grid around a date
    Grid {
        /// Date to build the grid around (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        first_day: Option<Weekday>,
    },
    /// Print the years a year policy offers
    Years {
        /// off, between:A:B, more-or-less:N, from:Y or to:Y
        #[arg(short, long)]
        policy: YearRange,
        /// Reference date used as today (defaults to today)
        #[arg(short, long)]
        today: Option<String>,
    },
    /// Print the picker markup as HTML
    Render {
        /// Selected date
        #[arg(short, long)]
        date: Option<String>,
        /// Render the picker popup as well as the input
        #[arg(short, long)]
        open: bool,
    },
}

fn parse_date(settings: &Settings, text: &str) -> anyhow::Result<NaiveDate> {
    settings
        .parse(text)
        .map_err(|reason| anyhow!("invalid date '{}': {}", text, reason))
}

fn parse_optional_date(settings: &Settings, text: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    text.map(|text| parse_date(settings, text)).transpose()
}

/// Plain-text month grid, one week per line. Colors are only applied when a
/// theme is given.
pub fn format_grid(
    settings: &Settings,
    focus: NaiveDate,
    today: NaiveDate,
    theme: Option<&Theme>,
) -> String {
    let grid = prepare_dates(focus, settings.first_day_of_week);
    let mut output = String::new();

    let month = Month::try_from(focus.month() as u8)
        .map(|month| (settings.month_formatter)(month))
        .unwrap_or_default();
    output.push_str(&format!("{} {}\n", month, (settings.year_formatter)(focus.year())));

    let header: Vec<String> = (0..7)
        .map(|offset| format!("{:>3}", (settings.day_formatter)(add_dows(offset, settings.first_day_of_week))))
        .collect();
    output.push_str(header.join(" ").trim_end());
    output.push('\n');

    for week in &grid.weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|&date| {
                let text = format!("{:>3}", date.day());
                let Some(theme) = theme else {
                    return text;
                };
                let colors = &theme.colors;
                if date_tuple(date) == date_tuple(today) {
                    colors.today.paint(&text, true)
                } else if settings.disabled(date) {
                    colors.disabled.paint(&text, false)
                } else if !grid.is_current_month(date) {
                    colors.other_month.paint(&text, false)
                } else {
                    colors.normal_text.paint(&text, false)
                }
            })
            .collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }

    output
}

fn theme_for(name: &str) -> anyhow::Result<Theme> {
    Theme::by_name(name).ok_or_else(|| {
        anyhow!(
            "unknown theme '{}' (available: {})",
            name,
            Theme::available_themes().join(", ")
        )
    })
}

fn hooks_for(event_log: Option<PathBuf>) -> HookRegistry {
    let mut hooks = HookRegistry::new();
    hooks.register(LogHook);
    if let Some(path) = event_log {
        hooks.register(EventLogHook::new(path));
    }
    log::debug!("registered hooks: {:?}", hooks.list_hooks());
    hooks
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        Self::parse().execute()
    }

    pub fn execute(self) -> anyhow::Result<()> {
        let config = PickerConfig::from_env()?;
        let settings = Settings::from_config(&config);
        let clock = SystemClock;

        match self.command {
            Some(Commands::Pick {
                date,
                first_day,
                years,
                theme,
                event_log,
            }) => pick(settings, &clock, date, first_day, years, &theme, event_log)?,
            Some(Commands::Grid { date, first_day }) => {
                let settings = match first_day {
                    Some(day) => settings.with_first_day_of_week(day),
                    None => settings,
                };
                let today = clock.today();
                let focus = parse_optional_date(&settings, date.as_deref())?.unwrap_or(today);
                let theme = Theme::default();
                let colored = IsTty::is_tty(&std::io::stdout());
                print!("{}", format_grid(&settings, focus, today, colored.then_some(&theme)));
            }
            Some(Commands::Years { policy, today }) => {
                let today = parse_optional_date(&settings, today.as_deref())?
                    .unwrap_or_else(|| clock.today());
                let context = YearContext {
                    current_month: today,
                    today,
                };
                let years: Vec<String> = year_range(context, policy)
                    .iter()
                    .map(|year| (settings.year_formatter)(*year))
                    .collect();
                println!("{}", years.join("\n"));
            }
            Some(Commands::Render { date, open }) => {
                let selected = parse_optional_date(&settings, date.as_deref())?;
                let mut picker = DatePicker::init_from_dates(clock.today(), selected);
                if open {
                    picker = picker.update(&settings, Msg::InputFocused, selected).picker;
                }
                println!("{}", render(selected, &settings, &picker));
            }
            None => pick(settings, &clock, None, None, None, "dark", None)?,
        }

        Ok(())
    }
}

fn pick(
    settings: Settings,
    clock: &dyn Clock,
    date: Option<String>,
    first_day: Option<Weekday>,
    years: Option<YearRange>,
    theme: &str,
    event_log: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut settings = settings;
    if let Some(day) = first_day {
        settings = settings.with_first_day_of_week(day);
    }
    if let Some(years) = years {
        settings = settings.with_year_range(years);
    }

    let selected = parse_optional_date(&settings, date.as_deref())?;
    let host = PickerHost::new(settings.clone(), selected, hooks_for(event_log), clock);
    let picked = PickerView::new(host, theme_for(theme)?)?.run()?;

    match picked {
        Some(date) => println!("{}", settings.format_date(date)),
        None => log::info!("no date picked"),
    }
    Ok(())
}

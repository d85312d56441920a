use super::theme::Theme;
use crate::application::{DatePicker, Msg, Settings, input_value};
use crate::domain::{
    DateEvent, YearContext, add_days, add_dows, date_tuple, new_year, next_month, prepare_dates,
    prev_month, year_range,
};
use crate::infrastructure::{Clock, EventContext, HookRegistry};
use chrono::{Datelike, Month, NaiveDate};
use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind, poll,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Flex, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::collections::VecDeque;
use std::io::{self, Stdout, stdout};

const CELL_WIDTH: u16 = 4;
const VIEW_WIDTH: u16 = 7 * CELL_WIDTH + 3;
const INPUT_HEIGHT: u16 = 3;
/// border + navigation line + weekday header + six weeks + border
const POPUP_HEIGHT: u16 = 2 + 1 + 1 + 6;
const STATUS_HEIGHT: u16 = 1;
const HELP_HEIGHT: u16 = 3;

/// Screen areas from the last draw, used to route mouse events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewLayout {
    pub input: Rect,
    pub popup: Option<Rect>,
    /// Navigation line inside the popup: prev arrow left, next arrow right
    pub navigation: Rect,
    /// Weekday header row followed by one row per week
    pub grid: Rect,
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

/// Hosts one picker: owns the selected date, queues events, runs effects and
/// notifies hooks. Has no terminal of its own so it can be driven directly.
pub struct PickerHost {
    settings: Settings,
    picker: DatePicker,
    selected: Option<NaiveDate>,
    pending: VecDeque<Msg>,
    last_event: DateEvent,
    hooks: HookRegistry,
    should_exit: bool,
    show_help: bool,
}

impl PickerHost {
    /// Start a fresh picker. Today's date is requested from `clock` and
    /// arrives as the first queued event.
    pub fn new(
        settings: Settings,
        selected: Option<NaiveDate>,
        hooks: HookRegistry,
        clock: &dyn Clock,
    ) -> Self {
        let (picker, effect) = DatePicker::init();
        let mut host = Self::with_picker(settings, picker, selected, hooks);
        if let Some(msg) = effect.perform(clock) {
            host.pending.push_back(msg);
        }
        host
    }

    pub fn with_picker(
        settings: Settings,
        picker: DatePicker,
        selected: Option<NaiveDate>,
        hooks: HookRegistry,
    ) -> Self {
        Self {
            settings,
            picker,
            selected,
            pending: VecDeque::new(),
            last_event: DateEvent::None,
            hooks,
            should_exit: false,
            show_help: false,
        }
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_event(&self) -> &DateEvent {
        &self.last_event
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn input_value(&self) -> String {
        input_value(self.selected, &self.settings, &self.picker)
    }

    pub fn current_date(&self) -> NaiveDate {
        self.picker.current_date(self.selected)
    }

    /// Queue an event and process everything pending, one at a time.
    pub fn dispatch(&mut self, msg: Msg) {
        self.pending.push_back(msg);
        self.flush();
    }

    pub fn flush(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: Msg) {
        let previous = self.selected;
        let input_text = self.input_value();
        let editing = matches!(msg, Msg::TextEdited(_));

        let update = self.picker.clone().update(&self.settings, msg, self.selected);
        self.picker = update.picker;
        self.selected = update.selected;

        if !update.event.is_none() {
            self.hooks.notify(
                &EventContext {
                    previous,
                    selected: self.selected,
                    input_text,
                },
                &update.event,
            );
            self.last_event = update.event;
        } else if editing {
            self.last_event = DateEvent::None;
        }
    }

    fn has_pending_text(&self) -> bool {
        self.picker.input_text().is_some()
    }

    fn close(&mut self) {
        if self.has_pending_text() {
            self.dispatch(Msg::TextCommitted);
        }
        self.dispatch(Msg::InputBlurred);
    }

    fn move_focus(&mut self, date: NaiveDate) {
        self.dispatch(Msg::FocusChanged(date));
    }

    fn pick_if_enabled(&mut self, date: NaiveDate) {
        if !self.settings.disabled(date) {
            self.dispatch(Msg::Picked(Some(date)));
        }
    }

    /// Step the focused year through the configured year list.
    fn shift_year(&mut self, delta: i32) {
        let current = self.current_date();
        let years = year_range(
            YearContext {
                current_month: current,
                today: self.picker.today(),
            },
            self.settings.change_year,
        );
        let target = current.year() + delta;
        if years.contains(&target) {
            if let Ok(date) = new_year(current, &target.to_string()) {
                self.move_focus(date);
            }
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.input_value();
        edit(&mut text);
        self.dispatch(Msg::TextEdited(text));
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let open = self.picker.is_open();
        let current = self.current_date();

        match (key.code, key.modifiers) {
            // Ctrl+C and Ctrl+D
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.should_exit = true;
            }

            (KeyCode::Esc, _) if open => self.close(),
            (KeyCode::Esc, _) => self.should_exit = true,

            (KeyCode::Tab, _) | (KeyCode::BackTab, _) if open => self.close(),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => self.dispatch(Msg::InputFocused),

            (KeyCode::Enter, _) if open && self.has_pending_text() => {
                self.dispatch(Msg::TextCommitted)
            }
            (KeyCode::Enter, _) if open => self.pick_if_enabled(current),
            (KeyCode::Enter, _) => self.dispatch(Msg::InputFocused),

            (KeyCode::Char('q'), _) if !open => self.should_exit = true,
            (KeyCode::Char('?'), _) if !open => self.show_help = !self.show_help,

            // Navigation
            (KeyCode::Left, _) if open => self.move_focus(add_days(current, -1)),
            (KeyCode::Right, _) if open => self.move_focus(add_days(current, 1)),
            (KeyCode::Up, _) if open => self.move_focus(add_days(current, -7)),
            (KeyCode::Down, _) if open => self.move_focus(add_days(current, 7)),
            (KeyCode::PageUp, _) if open => self.move_focus(prev_month(current)),
            (KeyCode::PageDown, _) if open => self.move_focus(next_month(current)),
            (KeyCode::Char('['), _) if open => self.shift_year(-1),
            (KeyCode::Char(']'), _) if open => self.shift_year(1),
            (KeyCode::Home, _) if open => self.move_focus(self.picker.today()),

            (KeyCode::Char(' '), _) if open => self.pick_if_enabled(current),
            (KeyCode::Delete, _) => self.dispatch(Msg::Picked(None)),

            // Text editing
            (KeyCode::Backspace, _) => {
                if !open {
                    self.dispatch(Msg::InputFocused);
                }
                self.edit_text(|text| {
                    text.pop();
                });
            }
            (KeyCode::Char(c), modifiers)
                if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT =>
            {
                if !open {
                    self.dispatch(Msg::InputFocused);
                }
                self.edit_text(|text| text.push(c));
            }

            _ => {}
        }
    }

    /// Handle mouse input against the areas of the last draw
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, layout: &ViewLayout) {
        let (column, row) = (mouse.column, mouse.row);
        let in_popup = layout
            .popup
            .is_some_and(|popup| self.picker.is_open() && contains(popup, column, row));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if in_popup {
                    self.dispatch(Msg::PointerDown);
                } else if contains(layout.input, column, row) {
                    self.dispatch(Msg::InputFocused);
                } else if self.picker.is_open() {
                    self.close();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dispatch(Msg::PointerUp);
                if in_popup {
                    self.click_popup(column, row, layout);
                }
            }
            _ => {}
        }
    }

    fn click_popup(&mut self, column: u16, row: u16, layout: &ViewLayout) {
        let current = self.current_date();

        if contains(layout.navigation, column, row) {
            if column < layout.navigation.x + 2 {
                self.move_focus(prev_month(current));
            } else if column + 2 >= layout.navigation.x + layout.navigation.width {
                self.move_focus(next_month(current));
            }
            return;
        }

        if !contains(layout.grid, column, row) || row == layout.grid.y {
            return;
        }

        let week = (row - layout.grid.y - 1) as usize;
        let day = ((column - layout.grid.x) / CELL_WIDTH) as usize;
        let grid = prepare_dates(current, self.settings.first_day_of_week);
        if let Some(&date) = grid.weeks.get(week).and_then(|dates| dates.get(day)) {
            self.pick_if_enabled(date);
        }
    }
}

/// Calculate centered area with both horizontal and vertical centering
fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
    let width = std::cmp::min(available.width, needed_width);
    let height = std::cmp::min(available.height, needed_height);

    Rect {
        x: available.x + available.width.saturating_sub(width) / 2,
        y: available.y + available.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn day_style(host: &PickerHost, date: NaiveDate, in_month: bool, theme: &Theme) -> Style {
    let colors = &theme.colors;
    let current = host.current_date();

    if host.selected.map(date_tuple) == Some(date_tuple(date)) {
        colors.picked.to_ratatui_with_modifier(Modifier::BOLD)
    } else if date == current {
        colors.focused.to_ratatui()
    } else if host.settings.disabled(date) {
        colors.disabled.to_ratatui_with_modifier(Modifier::CROSSED_OUT)
    } else if date == host.picker.today() {
        colors.today.to_ratatui()
    } else if !in_month {
        colors.other_month.to_ratatui()
    } else if date.weekday().number_from_monday() >= 6 {
        colors.weekend.to_ratatui()
    } else {
        colors.normal_text.to_ratatui()
    }
}

fn create_calendar_table(host: &PickerHost, theme: &Theme) -> Table<'static> {
    let settings = &host.settings;
    let grid = prepare_dates(host.current_date(), settings.first_day_of_week);

    let header = Row::new((0..7).map(|offset| {
        let day = add_dows(offset, settings.first_day_of_week);
        Cell::from((settings.day_formatter)(day)).style(theme.colors.header.to_ratatui())
    }));

    let rows: Vec<Row> = grid
        .weeks
        .iter()
        .map(|week| {
            Row::new(week.iter().map(|&date| {
                let style = day_style(host, date, grid.is_current_month(date), theme);
                Cell::from(format!("{:>2} ", date.day())).style(style)
            }))
        })
        .collect();

    Table::new(rows, [Constraint::Length(CELL_WIDTH - 1); 7])
        .header(header)
        .column_spacing(1)
        .flex(Flex::Start)
}

fn create_navigation_line(host: &PickerHost, theme: &Theme, width: u16) -> Paragraph<'static> {
    let settings = &host.settings;
    let current = host.current_date();
    let month = Month::try_from(current.month() as u8)
        .map(|month| (settings.month_formatter)(month))
        .unwrap_or_default();
    let title = format!("{} {}", month, (settings.year_formatter)(current.year()));
    let padding = (width as usize).saturating_sub(title.chars().count() + 4) / 2;

    Paragraph::new(Line::from(vec![
        Span::styled("‹ ", theme.colors.help_text.to_ratatui()),
        Span::raw(" ".repeat(padding)),
        Span::styled(title, theme.colors.header.to_ratatui_with_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(padding)),
        Span::styled(" ›", theme.colors.help_text.to_ratatui()),
    ]))
}

fn create_input_field(host: &PickerHost, theme: &Theme) -> Paragraph<'static> {
    let value = host.input_value();
    let line = if value.is_empty() {
        Line::from(Span::styled(
            host.settings.placeholder.clone(),
            theme.colors.placeholder.to_ratatui(),
        ))
    } else {
        Line::from(Span::styled(value, theme.colors.normal_text.to_ratatui()))
    };

    let border = if host.picker.is_open() {
        theme.colors.border.to_ratatui_with_modifier(Modifier::BOLD)
    } else {
        theme.colors.border.to_ratatui()
    };

    Paragraph::new(line).block(Block::default().borders(Borders::ALL).border_style(border))
}

fn create_status_line(host: &PickerHost, theme: &Theme) -> Paragraph<'static> {
    let line = match &host.last_event {
        DateEvent::FailedInput(error) => {
            Line::from(Span::styled(error.to_string(), theme.colors.error_text.to_ratatui()))
        }
        DateEvent::None => Line::default(),
        event => Line::from(Span::styled(event.to_string(), theme.colors.help_text.to_ratatui())),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

fn create_help_text(host: &PickerHost, theme: &Theme) -> Paragraph<'static> {
    let style = theme.colors.help_text.to_ratatui();
    let mut lines = vec![
        Line::from(Span::styled("Tab=Open/Close • type=Edit • Enter=Commit", style)),
        Line::from(Span::styled("←→↑↓=Move • PgUp/PgDn=Month • Space=Pick", style)),
    ];
    if host.settings.change_year.is_active() {
        lines.push(Line::from(Span::styled("[ ]=Year • Del=Clear • q=Quit", style)));
    } else {
        lines.push(Line::from(Span::styled("Del=Clear • q=Quit", style)));
    }
    Paragraph::new(lines).alignment(Alignment::Center)
}

/// Draw the whole view and report where everything landed.
fn draw(frame: &mut Frame, host: &PickerHost, theme: &Theme) -> ViewLayout {
    let open = host.picker.is_open();
    let needed_height = INPUT_HEIGHT
        + if open { POPUP_HEIGHT } else { 0 }
        + STATUS_HEIGHT
        + if host.show_help { HELP_HEIGHT } else { 0 };
    let area = calculate_centered_area(frame.area(), VIEW_WIDTH, needed_height);

    let input = Rect { height: INPUT_HEIGHT.min(area.height), ..area };
    frame.render_widget(create_input_field(host, theme), input);

    let mut layout = ViewLayout {
        input,
        ..ViewLayout::default()
    };
    let mut y = input.y + input.height;

    if open {
        let popup = Rect { y, height: POPUP_HEIGHT, ..area }.intersection(frame.area());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.colors.border.to_ratatui());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let navigation = Rect { height: 1.min(inner.height), ..inner };
        frame.render_widget(create_navigation_line(host, theme, inner.width), navigation);

        let grid = Rect {
            y: inner.y + navigation.height,
            height: inner.height.saturating_sub(navigation.height),
            ..inner
        };
        frame.render_widget(create_calendar_table(host, theme), grid);

        layout.popup = Some(popup);
        layout.navigation = navigation;
        layout.grid = grid;
        y = popup.y + popup.height;
    }

    let status = Rect { y, height: STATUS_HEIGHT, ..area }.intersection(frame.area());
    frame.render_widget(create_status_line(host, theme), status);

    if host.show_help {
        let help = Rect { y: y + STATUS_HEIGHT, height: HELP_HEIGHT, ..area }.intersection(frame.area());
        frame.render_widget(create_help_text(host, theme), help);
    }

    layout
}

/// Full-screen terminal front end around a [`PickerHost`]
pub struct PickerView {
    host: PickerHost,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    layout: ViewLayout,
}

impl PickerView {
    pub fn new(host: PickerHost, theme: Theme) -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        if let Err(e) = stdout()
            .execute(EnterAlternateScreen)
            .and_then(|out| out.execute(EnableMouseCapture))
        {
            let _ = disable_raw_mode(); // Clean up on failure
            return Err(io::Error::other(format!(
                "Failed to enter alternate screen: {}",
                e
            )));
        }

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            host,
            terminal,
            theme,
            layout: ViewLayout::default(),
        })
    }

    /// Run the picker until the user exits and return the selected date
    pub fn run(&mut self) -> io::Result<Option<NaiveDate>> {
        loop {
            // Deliver whatever arrived since the last frame, like today's date
            self.host.flush();

            if self.host.should_exit() {
                break;
            }

            let host = &self.host;
            let theme = &self.theme;
            let mut layout = self.layout;
            self.terminal.draw(|frame| {
                layout = draw(frame, host, theme);
            })?;
            self.layout = layout;

            // Handle events with timeout to prevent blocking indefinitely
            if poll(std::time::Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) => self.host.handle_key_event(key),
                    Event::Mouse(mouse) => self.host.handle_mouse_event(mouse, &self.layout),
                    _ => continue,
                }
            }
        }

        self.cleanup()?;
        Ok(self.host.selected())
    }

    /// Explicit cleanup method
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(DisableMouseCapture)?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for PickerView {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}

use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Day cells
    pub picked: ColorPair,
    pub today: ColorPair,
    pub focused: ColorPair,
    pub other_month: ColorPair,
    pub disabled: ColorPair,

    // UI elements
    pub border: ColorPair,
    pub header: ColorPair,
    pub weekend: ColorPair,

    // Text
    pub normal_text: ColorPair,
    pub placeholder: ColorPair,
    pub help_text: ColorPair,
    pub error_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    pub fn to_ratatui(&self) -> RatatuiStyle {
        let style = RatatuiStyle::default().fg(RatatuiColor::from(self.fg));
        match self.bg {
            Some(bg) => style.bg(RatatuiColor::from(bg)),
            None => style,
        }
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    /// ANSI-styled text for plain stdout
    pub fn paint(&self, text: &str, bold: bool) -> String {
        let mut styled = text.with(self.fg);
        if bold {
            styled = styled.bold();
        }
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        styled.to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                picked: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                focused: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 60, g: 60, b: 60 }),
                other_month: ColorPair::new(CrosstermColor::DarkGrey),
                disabled: ColorPair::new(CrosstermColor::DarkRed),

                border: ColorPair::new(CrosstermColor::DarkCyan),
                header: ColorPair::new(CrosstermColor::DarkCyan),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),

                normal_text: ColorPair::new(CrosstermColor::White),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),
                help_text: ColorPair::new(CrosstermColor::DarkCyan),
                error_text: ColorPair::new(CrosstermColor::Red),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                picked: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                focused: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Rgb { r: 220, g: 220, b: 220 }),
                other_month: ColorPair::new(CrosstermColor::Grey),
                disabled: ColorPair::new(CrosstermColor::Red),

                border: ColorPair::new(CrosstermColor::DarkBlue),
                header: ColorPair::new(CrosstermColor::DarkBlue),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),

                normal_text: ColorPair::new(CrosstermColor::Black),
                placeholder: ColorPair::new(CrosstermColor::Grey),
                help_text: ColorPair::new(CrosstermColor::DarkBlue),
                error_text: ColorPair::new(CrosstermColor::DarkRed),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                picked: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                today: ColorPair::new(CrosstermColor::White),
                focused: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 28, g: 28, b: 28 }),
                other_month: ColorPair::new(CrosstermColor::DarkGrey),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),

                border: ColorPair::new(CrosstermColor::White),
                header: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::Grey),

                normal_text: ColorPair::new(CrosstermColor::White),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),
                help_text: ColorPair::new(CrosstermColor::Grey),
                error_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }

    /// Look a theme up by name, ignoring case.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "minimal" => Some(Self::minimal()),
            _ => None,
        }
    }
}

use crate::domain::DateEvent;
use crate::infrastructure::{DateEventHook, EventContext};
use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Appends every date event to a plain text file
pub struct EventLogHook {
    path: PathBuf,
}

impl EventLogHook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DateEventHook for EventLogHook {
    fn on_date_event(&self, context: &EventContext, event: &DateEvent) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let selected = context
            .selected
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());

        writeln!(
            file,
            "[{}] {} - selected: {} - input: {:?}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            event,
            selected,
            context.input_text
        )?;

        Ok(())
    }

    fn name(&self) -> &str {
        "Event Log"
    }
}

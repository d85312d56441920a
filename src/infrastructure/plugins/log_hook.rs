use crate::domain::DateEvent;
use crate::infrastructure::{DateEventHook, EventContext};
use anyhow::Result;

/// Forwards date events to the `log` facade
pub struct LogHook;

impl DateEventHook for LogHook {
    fn on_date_event(&self, context: &EventContext, event: &DateEvent) -> Result<()> {
        match event {
            DateEvent::FailedInput(error) => {
                log::warn!("rejected input {:?}: {}", context.input_text, error)
            }
            _ => log::info!("{} (was {:?})", event, context.previous),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Log"
    }
}

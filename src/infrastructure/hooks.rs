use crate::domain::DateEvent;
use anyhow::Result;
use chrono::NaiveDate;

/// Context provided to date event hooks
#[derive(Debug, Clone, PartialEq)]
pub struct EventContext {
    pub previous: Option<NaiveDate>,
    pub selected: Option<NaiveDate>,
    /// Text in the input when the event happened
    pub input_text: String,
}

/// Trait for plugins that respond to the picker's date events
pub trait DateEventHook {
    /// Called after a transition reported something other than `DateEvent::None`
    fn on_date_event(&self, context: &EventContext, event: &DateEvent) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing date event hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn DateEventHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: DateEventHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Run every registered hook for an event. Failing hooks are logged and
    /// skipped.
    pub fn notify(&self, context: &EventContext, event: &DateEvent) {
        if event.is_none() {
            return;
        }

        for hook in &self.hooks {
            if let Err(e) = hook.on_date_event(context, event) {
                log::warn!("Hook '{}' failed: {}", hook.name(), e);
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;

use crate::domain::traits::CommandHandler;

/// A text command: a trigger keyword bound to the handler it runs
#[derive(Clone)]
pub struct Command {
    pub trigger: String,
    pub description: Option<String>,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(trigger: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        Self {
            trigger: trigger.into(),
            description: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Case-sensitive: the trigger may appear anywhere in the text.
    pub fn matches(&self, input: &str) -> bool {
        !self.trigger.is_empty() && input.contains(&self.trigger)
    }

    /// Text after the first occurrence of the trigger, trimmed.
    pub fn params<'a>(&self, input: &'a str) -> &'a str {
        input
            .split_once(self.trigger.as_str())
            .map(|(_, rest)| rest.trim())
            .unwrap_or("")
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("trigger", &self.trigger)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered command registry; lookups return the first registered match
#[derive(Default, Clone, Debug)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn with(mut self, command: Command) -> Self {
        self.register(command);
        self
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

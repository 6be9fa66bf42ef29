//! Matching conditions for handler registrations.

use std::fmt;

use regex::Regex;

use crate::base::{activity::Activity, types::Res};

/// Which member list a `conversationUpdate` registration cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationUpdate {
    MembersAdded,
    MembersRemoved,
}

/// The condition under which a registration fires.
///
/// Every condition that is set must hold; unset conditions match anything.
#[derive(Debug, Clone)]
pub struct Matcher {
    kind: String,
    pattern: Option<Regex>,
    name: Option<String>,
    update: Option<ConversationUpdate>,
}

impl Matcher {
    /// Matches every activity of the given type.
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            pattern: None,
            name: None,
            update: None,
        }
    }

    /// Additionally requires the text to match `pattern` in full.
    pub fn with_text(mut self, pattern: &str) -> Res<Self> {
        self.pattern = Some(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(self)
    }

    /// Additionally requires the activity name to equal `name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Additionally requires the selected member list to be non-empty.
    pub fn with_update(mut self, update: ConversationUpdate) -> Self {
        self.update = Some(update);
        self
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        if self.kind != activity.kind {
            return false;
        }

        if let Some(pattern) = &self.pattern {
            match activity.text.as_deref() {
                Some(text) if pattern.is_match(text) => {}
                _ => return false,
            }
        }

        if let Some(name) = &self.name
            && activity.name.as_deref() != Some(name.as_str())
        {
            return false;
        }

        match self.update {
            Some(ConversationUpdate::MembersAdded) => !activity.members_added.is_empty(),
            Some(ConversationUpdate::MembersRemoved) => !activity.members_removed.is_empty(),
            None => true,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(name) = &self.name {
            write!(f, " name={name}")?;
        }

        if let Some(pattern) = &self.pattern {
            write!(f, " text=/{}/", pattern.as_str())?;
        }

        if let Some(update) = &self.update {
            write!(f, " update={update:?}")?;
        }

        Ok(())
    }
}

// Tests.

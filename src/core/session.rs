use super::request::Mode;
use crate::error::Result;
use std::collections::HashMap;

/// What a mode produced, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Payload(String),
    Failure(String),
}

impl Output {
    pub fn from_outcome(outcome: &Result<String>) -> Self {
        match outcome {
            Ok(payload) => Output::Payload(payload.clone()),
            Err(e) => Output::Failure(e.to_display()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Output::Payload(text) | Output::Failure(text) => text,
        }
    }
}

/// Last output per mode, kept for redisplay.
#[derive(Debug, Default)]
pub struct Session {
    last: HashMap<Mode, Output>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mode: Mode, output: Output) {
        self.last.insert(mode, output);
    }

    pub fn last(&self, mode: Mode) -> Option<&Output> {
        self.last.get(&mode)
    }

    /// Stored outputs in menu order.
    pub fn entries(&self) -> impl Iterator<Item = (Mode, &Output)> + '_ {
        Mode::ALL
            .into_iter()
            .filter_map(|mode| self.last(mode).map(|out| (mode, out)))
    }
}

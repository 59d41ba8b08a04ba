//! Headline that types out a role, holds it, deletes it and moves on.
//!
//! [`Typewriter`] is a pure state machine: the host waits
//! [`Typewriter::delay`], calls [`Typewriter::tick`], and waits the returned
//! duration before calling it again. No timers live
//! here, so tests step it synchronously.

use log::trace;
use std::time::Duration;

pub const DEFAULT_ROLES: &[&str] = &[
    "Full Stack Developer",
    "Software Engineer",
    "Web Developer",
    "PHP & Laravel Developer",
];

/// Delays between transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_char: Duration,
    pub delete_char: Duration,
    /// Pause once a role is fully typed.
    pub hold_full: Duration,
    /// Pause on an empty line before the next role starts.
    pub hold_empty: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_char: Duration::from_millis(100),
            delete_char: Duration::from_millis(50),
            hold_full: Duration::from_millis(2000),
            hold_empty: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    roles: Vec<Vec<char>>,
    timing: TypewriterTiming,
    role: usize,
    shown: usize,
    phase: Phase,
}

impl Typewriter {
    /// Starts on the first role with nothing typed yet.
    pub fn new<S: AsRef<str>>(roles: &[S], timing: TypewriterTiming) -> Self {
        Self {
            roles: roles.iter().map(|r| r.as_ref().chars().collect()).collect(),
            timing,
            role: 0,
            shown: 0,
            phase: Phase::Typing,
        }
    }

    /// The currently visible text.
    pub fn text(&self) -> String {
        self.roles
            .get(self.role)
            .map(|chars| chars[..self.shown].iter().collect())
            .unwrap_or_default()
    }

    /// Index of the role being typed or deleted.
    pub fn role_index(&self) -> usize {
        self.role
    }

    pub fn is_deleting(&self) -> bool {
        self.phase == Phase::Deleting
    }

    /// How long the current state is shown before the next [`tick`].
    ///
    /// A complete word holds for `hold_full` and an emptied line for
    /// `hold_empty`; otherwise the per-character typing or deleting delay.
    ///
    /// [`tick`]: Typewriter::tick
    pub fn delay(&self) -> Duration {
        let Some(len) = self.roles.get(self.role).map(Vec::len) else {
            return self.timing.hold_full;
        };
        match self.phase {
            Phase::Typing if self.shown == len => self.timing.hold_full,
            Phase::Typing => self.timing.type_char,
            Phase::Deleting if self.shown == 0 => self.timing.hold_empty,
            Phase::Deleting => self.timing.delete_char,
        }
    }

    /// Applies one transition and returns the [`delay`] of the new state.
    ///
    /// Reaching the end of a word and reaching an empty line are states of
    /// their own: the tick after a hold only flips direction (or advances
    /// to the next role) without changing the text. With no roles the text
    /// stays empty.
    ///
    /// [`delay`]: Typewriter::delay
    pub fn tick(&mut self) -> Duration {
        let Some(len) = self.roles.get(self.role).map(Vec::len) else {
            return self.delay();
        };
        match self.phase {
            Phase::Typing if self.shown == len => self.phase = Phase::Deleting,
            Phase::Typing => self.shown += 1,
            Phase::Deleting if self.shown == 0 => {
                self.phase = Phase::Typing;
                self.role = (self.role + 1) % self.roles.len();
                trace!("typewriter moving to role {}", self.role);
            }
            Phase::Deleting => self.shown -= 1,
        }
        self.delay()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_ROLES, TypewriterTiming::default())
    }
}

//! Page-level side effects.
//!
//! Every failure path on the board ends in one of two things: the page
//! reloads to pick up server state, or the user gets a blocking message.

use std::cell::RefCell;

/// Page shell capability.
pub trait Shell {
    /// Reload the page to resynchronize with the server.
    fn reload(&self);

    /// Show a blocking notification.
    fn alert(&self, message: &str);
}

/// A side effect requested through a [`Shell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    Reload,
    Alert(String),
}

/// Shell that records requested effects instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingShell {
    effects: RefCell<Vec<ShellEffect>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects in the order they were requested.
    pub fn effects(&self) -> Vec<ShellEffect> {
        self.effects.borrow().clone()
    }

    pub fn reload_count(&self) -> usize {
        self.effects
            .borrow()
            .iter()
            .filter(|e| **e == ShellEffect::Reload)
            .count()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.effects
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ShellEffect::Alert(message) => Some(message.clone()),
                ShellEffect::Reload => None,
            })
            .collect()
    }
}

impl Shell for RecordingShell {
    fn reload(&self) {
        self.effects.borrow_mut().push(ShellEffect::Reload);
    }

    fn alert(&self, message: &str) {
        self.effects
            .borrow_mut()
            .push(ShellEffect::Alert(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let shell = RecordingShell::new();
        shell.alert("failed");
        shell.reload();

        assert_eq!(
            shell.effects(),
            vec![ShellEffect::Alert("failed".into()), ShellEffect::Reload]
        );
        assert_eq!(shell.reload_count(), 1);
        assert_eq!(shell.alerts(), vec!["failed".to_string()]);
    }
}

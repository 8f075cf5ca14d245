//! Fixed-answer confirmation adapter.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ports::Confirmation;

/// Answers every prompt the same way and counts how often it was asked.
#[derive(Debug)]
pub struct StaticConfirmation {
    answer: bool,
    prompts: AtomicUsize,
}

impl StaticConfirmation {
    /// Always confirms.
    pub fn accept() -> Self {
        Self::new(true)
    }

    /// Always declines.
    pub fn decline() -> Self {
        Self::new(false)
    }

    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: AtomicUsize::new(0),
        }
    }

    /// Returns how many prompts were shown.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl Confirmation for StaticConfirmation {
    fn confirm(&self, _prompt: &str) -> bool {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_fixed() {
        assert!(StaticConfirmation::accept().confirm("Restore?"));
        assert!(!StaticConfirmation::decline().confirm("Restore?"));
    }

    #[test]
    fn counts_prompts() {
        let confirmation = StaticConfirmation::accept();
        confirmation.confirm("one");
        confirmation.confirm("two");
        assert_eq!(confirmation.prompt_count(), 2);
    }
}

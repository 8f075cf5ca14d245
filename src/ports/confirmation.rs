//! Confirmation port - asks the user before a destructive action.
//!
//! Synchronous on purpose: the caller layer decides how to ask, and the
//! domain never waits on the answer.

/// Port for yes/no confirmation prompts.
pub trait Confirmation: Send + Sync {
    /// Returns true if the user agreed to `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Confirmation) {}
}

use std::fmt;

use rand::distr::Alphanumeric;
use rand::{rng, Rng};

/// Random alphanumeric token attached to one crawl operation's log lines.
///
/// Only statistically distinct, never checked for uniqueness: it exists so
/// that the log lines of concurrent crawls can be grepped apart, nothing in
/// the state machine branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugId(String);

impl DebugId {
    pub fn new(len: usize) -> Self {
        let token = rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_shape() {
        let id = DebugId::new(8);
        assert_eq!(8, id.as_str().len());
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_differ() {
        // 62^16 combinations, a collision means the generator is broken
        assert_ne!(DebugId::new(16), DebugId::new(16));
    }
}

use intake_types::{Turn, DEFAULT_HISTORY_TURNS};

/// Selects the trailing turns sent as `history` with the next exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    limit: usize,
}

impl ContextWindow {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The last `limit` turns of `conversation`, oldest first
    pub fn build(&self, conversation: &[Turn]) -> Vec<Turn> {
        let start = conversation.len().saturating_sub(self.limit);
        conversation[start..].to_vec()
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_TURNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn conversation(len: usize) -> Vec<Turn> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::patient(format!("patient {}", i))
                } else {
                    Turn::assistant(format!("assistant {}", i))
                }
            })
            .collect()
    }

    #[test]
    fn test_short_history_is_returned_whole() {
        let turns = conversation(5);
        assert_eq!(ContextWindow::default().build(&turns), turns);
    }

    #[test]
    fn test_long_history_keeps_last_fourteen() {
        let turns = conversation(20);
        let window = ContextWindow::default().build(&turns);

        assert_eq!(window.len(), 14);
        assert_eq!(window.first(), turns.get(6));
        assert_eq!(window.last(), turns.last());
    }

    #[test]
    fn test_empty_history() {
        assert!(ContextWindow::default().build(&[]).is_empty());
    }

    #[test]
    fn test_zero_limit_sends_no_history() {
        assert!(ContextWindow::new(0).build(&conversation(3)).is_empty());
    }
}

// Named sequences
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::{DatabaseError, DatabaseResult};

/// Hands out the next value of a named sequence
///
/// Implementations must never return the same value twice for one code,
/// even under concurrent callers.
pub trait SequenceGenerator: Send + Sync {
    fn next_by_code(&self, code: &str) -> DatabaseResult<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDefinition {
    pub code: String,
    pub prefix: String,
    pub padding: usize,
    pub start: u64,
}

impl SequenceDefinition {
    pub fn new(code: impl Into<String>, prefix: impl Into<String>, padding: usize) -> Self {
        Self {
            code: code.into(),
            prefix: prefix.into(),
            padding,
            start: 1,
        }
    }

    pub fn starting_at(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    fn format(&self, value: u64) -> String {
        format!("{}{:0width$}", self.prefix, value, width = self.padding)
    }
}

/// One counter, incremented with `fetch_add`
#[derive(Debug)]
pub struct NamedSequence {
    definition: SequenceDefinition,
    next: AtomicU64,
}

impl NamedSequence {
    pub fn new(definition: SequenceDefinition) -> Self {
        let next = AtomicU64::new(definition.start);
        Self { definition, next }
    }

    pub fn next_value(&self) -> String {
        let value = self.next.fetch_add(1, Ordering::SeqCst);
        self.definition.format(value)
    }

    /// Value the next call will use, without consuming it
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Registry of named sequences, shared across services
#[derive(Debug, Default, Clone)]
pub struct SequenceRegistry {
    sequences: Arc<DashMap<String, Arc<NamedSequence>>>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence; an existing sequence with the same code is kept
    pub fn register(&self, definition: SequenceDefinition) -> Arc<NamedSequence> {
        let code = definition.code.clone();
        let entry = self
            .sequences
            .entry(code.clone())
            .or_insert_with(|| Arc::new(NamedSequence::new(definition)));
        let sequence = Arc::clone(entry.value());
        drop(entry);
        debug!(sequence = %code, next = sequence.peek(), "Sequence registered");
        sequence
    }

    pub fn with_sequence(self, definition: SequenceDefinition) -> Self {
        self.register(definition);
        self
    }
}

impl SequenceGenerator for SequenceRegistry {
    fn next_by_code(&self, code: &str) -> DatabaseResult<String> {
        let sequence = self
            .sequences
            .get(code)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DatabaseError::SequenceNotFound(code.to_string()))?;
        Ok(sequence.next_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn values_are_prefixed_and_padded() {
        let registry = SequenceRegistry::new()
            .with_sequence(SequenceDefinition::new("hic.reference.level", "RL", 5));
        assert_eq!(registry.next_by_code("hic.reference.level").unwrap(), "RL00001");
        assert_eq!(registry.next_by_code("hic.reference.level").unwrap(), "RL00002");
    }

    #[test]
    fn custom_start_value() {
        let registry = SequenceRegistry::new()
            .with_sequence(SequenceDefinition::new("seq", "S-", 3).starting_at(42));
        assert_eq!(registry.next_by_code("seq").unwrap(), "S-042");
    }

    #[test]
    fn unknown_sequence_is_an_error() {
        let registry = SequenceRegistry::new();
        assert!(matches!(
            registry.next_by_code("missing"),
            Err(DatabaseError::SequenceNotFound(_))
        ));
    }

    #[test]
    fn re_registering_keeps_the_counter() {
        let registry = SequenceRegistry::new();
        registry.register(SequenceDefinition::new("seq", "A", 2));
        registry.next_by_code("seq").unwrap();
        registry.register(SequenceDefinition::new("seq", "B", 4));
        assert_eq!(registry.next_by_code("seq").unwrap(), "A02");
    }

    #[test]
    fn concurrent_callers_never_share_a_value() {
        let registry = SequenceRegistry::new()
            .with_sequence(SequenceDefinition::new("seq", "RL", 6));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    (0..250)
                        .map(|_| registry.next_by_code("seq").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate sequence value");
            }
        }
        assert_eq!(seen.len(), 2000);
    }
}

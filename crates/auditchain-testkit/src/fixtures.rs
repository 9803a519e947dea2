//! Fixtures for setting up chain test scenarios.

use std::collections::BTreeMap;

use auditchain::AuditChain;
use auditchain_core::EntryId;

/// A chain plus the ids it has handed out, in ingestion order.
pub struct TestFixture {
    pub chain: AuditChain,
    pub ids: Vec<EntryId>,
}

impl TestFixture {
    /// A fresh chain with the given batch size and nothing in it.
    pub fn new(batch_size: usize) -> Self {
        Self {
            chain: AuditChain::new(batch_size).expect("fixture batch size is positive"),
            ids: Vec::new(),
        }
    }

    /// Add `count` distinct entries, recording their ids.
    pub fn add_entries(&mut self, count: usize) {
        for i in 0..count {
            let mut meta = BTreeMap::new();
            meta.insert("index".to_string(), i.to_string());
            let id = self
                .chain
                .add("fixture_event", format!("payload-{i}").into_bytes(), meta);
            self.ids.push(id);
        }
    }

    /// A chain with `count` entries added at the given batch size.
    pub fn with_entries(batch_size: usize, count: usize) -> Self {
        let mut fixture = Self::new(batch_size);
        fixture.add_entries(count);
        fixture
    }

    /// A chain where every entry is sealed (flushes the tail).
    pub fn fully_sealed(batch_size: usize, count: usize) -> Self {
        let fixture = Self::with_entries(batch_size, count);
        fixture.chain.flush();
        fixture
    }
}

use chrono::Local;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Draft, Transaction};
use crate::storage::KeyValueStorage;

/// Hands out strictly increasing, timestamp-shaped ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn seeded(last: i64) -> Self {
        Self { last }
    }

    pub fn next_at(&mut self, now_millis: i64) -> i64 {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    pub fn next(&mut self) -> i64 {
        self.next_at(Local::now().timestamp_millis())
    }
}

/// Owns the ordered transaction list and mirrors it to storage on every change.
#[derive(Debug)]
pub struct Store<S: KeyValueStorage> {
    storage: S,
    key: String,
    transactions: Vec<Transaction>,
    ids: IdGenerator,
}

impl<S: KeyValueStorage> Store<S> {
    /// Reads the persisted list. A missing or malformed value yields an empty store;
    /// entries that cannot be read are skipped without losing the rest.
    pub fn load(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let transactions: Vec<Transaction> = match storage.get_item(&key)? {
            None => {
                debug!(key = %key, "no persisted transactions, starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw) {
                Ok(entries) => entries
                    .unwrap_or_default()
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                        Ok(tx) => Some(tx),
                        Err(e) => {
                            warn!(key = %key, index, error = %e, "skipping unreadable entry");
                            None
                        }
                    })
                    .collect(),
                Err(e) => {
                    warn!(key = %key, error = %e, "discarding malformed persisted transactions");
                    Vec::new()
                }
            },
        };

        let last_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        info!(count = transactions.len(), "loaded transactions");

        Ok(Self {
            storage,
            key,
            transactions,
            ids: IdGenerator::seeded(last_id),
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Assigns a fresh id to `draft` and appends it.
    pub fn create(&mut self, draft: Draft) -> Result<Transaction> {
        let tx = draft.into_transaction(self.ids.next());
        self.append(tx.clone())?;
        Ok(tx)
    }

    pub fn append(&mut self, tx: Transaction) -> Result<()> {
        let id = tx.id;
        self.transactions.push(tx);
        if let Err(e) = self.persist() {
            self.transactions.pop();
            return Err(e);
        }
        debug!(id, "appended transaction");
        Ok(())
    }

    /// Removes the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            debug!(id, "remove ignored, id not present");
            return Ok(false);
        };

        let removed = self.transactions.remove(pos);
        if let Err(e) = self.persist() {
            self.transactions.insert(pos, removed);
            return Err(e);
        }
        debug!(id, "removed transaction");
        Ok(true)
    }

    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.transactions)?;
        self.storage.set_item(&self.key, &json)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

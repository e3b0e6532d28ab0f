// src/store/table.rs
//! In-memory favorites table shared by the store backends.

use super::BookRecord;
use crate::types::BookId;
use indexmap::IndexMap;
use tokio::sync::watch;

/// How to revert one mutation if it could not be made durable.
#[derive(Debug)]
pub(super) enum Undo {
    /// The upsert replaced this record.
    Restore(BookRecord),
    /// The upsert inserted a new id.
    Remove(BookId),
    /// The delete removed this record from this position.
    Reinsert(usize, BookRecord),
}

/// Insertion-ordered rows plus the live query publishing them.
pub(super) struct FavoriteTable {
    rows: IndexMap<BookId, BookRecord>,
    published: watch::Sender<Vec<BookRecord>>,
}

impl FavoriteTable {
    pub fn new(records: Vec<BookRecord>) -> Self {
        let rows: IndexMap<BookId, BookRecord> = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        let (published, _) = watch::channel(rows.values().cloned().collect());
        Self { rows, published }
    }

    pub fn get(&self, id: &BookId) -> Option<BookRecord> {
        self.rows.get(id).cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<BookRecord>> {
        self.published.subscribe()
    }

    pub fn apply_upsert(&mut self, record: BookRecord) -> Undo {
        let id = record.id.clone();
        match self.rows.insert(id.clone(), record) {
            Some(previous) => Undo::Restore(previous),
            None => Undo::Remove(id),
        }
    }

    /// Returns `None` when the id was absent and nothing changed.
    pub fn apply_delete(&mut self, id: &BookId) -> Option<Undo> {
        self.rows
            .shift_remove_full(id)
            .map(|(index, _, record)| Undo::Reinsert(index, record))
    }

    pub fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Restore(record) => {
                self.rows.insert(record.id.clone(), record);
            }
            Undo::Remove(id) => {
                self.rows.shift_remove(&id);
            }
            Undo::Reinsert(index, record) => {
                self.rows.shift_insert(index, record.id.clone(), record);
            }
        }
    }

    pub fn snapshot(&self) -> Vec<BookRecord> {
        self.rows.values().cloned().collect()
    }

    /// Emits the current rows to every observer.
    pub fn publish(&self) {
        self.published.send_replace(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;

    fn record(id: &str, title: &str) -> BookRecord {
        BookRecord::from_book(&Book::new(BookId::parse(id).unwrap(), title))
    }

    fn titles(table: &FavoriteTable) -> Vec<String> {
        table.snapshot().into_iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut table = FavoriteTable::new(vec![record("OL1W", "one"), record("OL2W", "two")]);
        table.apply_upsert(record("OL1W", "uno"));
        assert_eq!(titles(&table), vec!["uno", "two"]);
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut table = FavoriteTable::new(vec![
            record("OL1W", "one"),
            record("OL2W", "two"),
            record("OL3W", "three"),
        ]);

        let undo = table.apply_upsert(record("OL2W", "dos"));
        table.undo(undo);
        assert_eq!(titles(&table), vec!["one", "two", "three"]);

        let undo = table.apply_upsert(record("OL4W", "four"));
        table.undo(undo);
        assert_eq!(titles(&table), vec!["one", "two", "three"]);

        let undo = table.apply_delete(&BookId::parse("OL2W").unwrap()).unwrap();
        assert_eq!(titles(&table), vec!["one", "three"]);
        table.undo(undo);
        assert_eq!(titles(&table), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut table = FavoriteTable::new(vec![record("OL1W", "one")]);
        assert!(table.apply_delete(&BookId::parse("OL9W").unwrap()).is_none());
        assert_eq!(titles(&table), vec!["one"]);
    }

    #[test]
    fn test_publish_reaches_late_subscribers() {
        let mut table = FavoriteTable::new(Vec::new());
        table.apply_upsert(record("OL1W", "one"));
        table.publish();
        let rx = table.subscribe();
        assert_eq!(rx.borrow().len(), 1);
    }
}

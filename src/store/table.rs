//! A thread-safe in-memory table with auto-increment ids.
//!
//! Locks are `parking_lot` and are never held across an `.await`, so the
//! table is safe to share between async handlers.

use std::collections::BTreeMap;
use std::collections::btree_map::Values;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::RwLock;

/// A cloneable iterator over a table's rows in id order.
pub type Rows<'a, T> = Values<'a, i64, T>;

/// Rows keyed by id, iterated in id order.
#[derive(Debug)]
pub struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T: Clone> Table<T> {
    /// Creates an empty table whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the row built by `make` under a fresh id and returns it.
    pub fn insert_with(&self, make: impl FnOnce(i64) -> T) -> T {
        let mut rows = self.rows.write();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = make(id);
        rows.insert(id, row.clone());
        row
    }

    /// Runs `check` against the current rows and inserts only if it passes.
    ///
    /// Check and insert happen under one write lock, so two concurrent
    /// callers cannot both pass a uniqueness check.
    pub fn try_insert_with<E>(
        &self,
        check: impl FnOnce(Rows<'_, T>) -> Result<(), E>,
        make: impl FnOnce(i64) -> T,
    ) -> Result<T, E> {
        let mut rows = self.rows.write();
        check(rows.values())?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = make(id);
        rows.insert(id, row.clone());
        Ok(row)
    }

    /// Returns the row with this id.
    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.read().get(&id).cloned()
    }

    /// Returns the first row, in id order, matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().values().find(|row| predicate(row)).cloned()
    }

    /// Returns every row matching `predicate`, in id order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    /// Returns every row in id order.
    pub fn all(&self) -> Vec<T> {
        self.rows.read().values().cloned().collect()
    }

    /// Mutates the row with this id if `guard` accepts it.
    ///
    /// Returns the updated row, or `None` if it is missing or rejected.
    pub fn update_if(
        &self,
        id: i64,
        guard: impl FnOnce(&T) -> bool,
        f: impl FnOnce(&mut T),
    ) -> Option<T> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id).filter(|row| guard(row))?;
        f(row);
        Some(row.clone())
    }

    /// Removes the row with this id if `guard` accepts it.
    pub fn remove_if(&self, id: i64, guard: impl FnOnce(&T) -> bool) -> Option<T> {
        let mut rows = self.rows.write();
        if rows.get(&id).is_some_and(guard) {
            rows.remove(&id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let table: Table<String> = Table::new();

        let first = table.insert_with(|id| format!("row-{id}"));
        let second = table.insert_with(|id| format!("row-{id}"));

        assert_eq!(first, "row-1");
        assert_eq!(second, "row-2");
        assert_eq!(table.all().len(), 2);
    }

    #[test]
    fn test_try_insert_rejects_without_consuming_id() {
        let table: Table<String> = Table::new();
        table.insert_with(|_| "taken".to_string());

        let result = table.try_insert_with(
            |mut rows| {
                if rows.any(|row| row == "taken") {
                    Err("duplicate")
                } else {
                    Ok(())
                }
            },
            |_| "taken".to_string(),
        );
        assert_eq!(result, Err("duplicate"));

        let next = table.insert_with(|id| id.to_string());
        assert_eq!(next, "2");
    }

    #[test]
    fn test_update_if_respects_guard() {
        let table: Table<i32> = Table::new();
        table.insert_with(|_| 10);

        assert_eq!(table.update_if(1, |v| *v > 5, |v| *v += 1), Some(11));
        assert_eq!(table.update_if(1, |v| *v > 100, |v| *v += 1), None);
        assert_eq!(table.update_if(99, |_| true, |v| *v += 1), None);
        assert_eq!(table.get(1), Some(11));
    }

    #[test]
    fn test_remove_if_respects_guard() {
        let table: Table<i32> = Table::new();
        table.insert_with(|_| 10);

        assert_eq!(table.remove_if(1, |v| *v == 0), None);
        assert_eq!(table.remove_if(1, |v| *v == 10), Some(10));
        assert!(table.all().is_empty());
    }

    #[test]
    fn test_filter_and_find_use_id_order() {
        let table: Table<i32> = Table::new();
        for value in [5, 3, 8, 1] {
            table.insert_with(|_| value);
        }

        assert_eq!(table.filter(|v| *v > 2), vec![5, 3, 8]);
        assert_eq!(table.find(|v| *v < 4), Some(3));
    }

    #[test]
    fn test_concurrent_inserts_get_distinct_ids() {
        let table: Arc<Table<i64>> = Arc::new(Table::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        table.insert_with(|id| id);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids = table.all();
        assert_eq!(ids.len(), 800);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}

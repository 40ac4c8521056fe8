use std::collections::{BTreeMap, HashMap};

/// Rows addressable by an opaque string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Keyed collection that scans in insertion order.
///
/// Replacing a row keeps its original position; removing and re-inserting moves it to the end.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<u64, T>,
    index: HashMap<String, u64>,
    next_seq: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T: Keyed> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces; returns the previous row under the same key.
    pub fn insert(&mut self, row: T) -> Option<T> {
        if let Some(seq) = self.index.get(row.key()) {
            return self.rows.insert(*seq, row);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(row.key().to_string(), seq);
        self.rows.insert(seq, row);
        None
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).and_then(|seq| self.rows.get(seq))
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        let seq = self.index.remove(key)?;
        self.rows.remove(&seq)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl Keyed for Row {
        fn key(&self) -> &str {
            self.0
        }
    }

    fn keys(table: &Table<Row>) -> Vec<&str> {
        table.values().map(|r| r.0).collect()
    }

    #[test]
    fn scans_in_insertion_order() {
        let mut table = Table::new();
        table.insert(Row("c", 1));
        table.insert(Row("a", 2));
        table.insert(Row("b", 3));
        assert_eq!(keys(&table), ["c", "a", "b"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut table = Table::new();
        table.insert(Row("x", 1));
        table.insert(Row("y", 2));

        assert_eq!(table.insert(Row("x", 9)), Some(Row("x", 1)));
        assert_eq!(keys(&table), ["x", "y"]);
        assert_eq!(table.get("x"), Some(&Row("x", 9)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn remove_reports_presence() {
        let mut table = Table::new();
        table.insert(Row("x", 1));

        assert_eq!(table.remove("x"), Some(Row("x", 1)));
        assert_eq!(table.remove("x"), None);
        assert!(table.is_empty());
    }
}

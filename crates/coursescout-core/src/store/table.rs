/// Append-only in-memory table
///
/// Rows keep their insertion order. Every `add` is committed immediately;
/// there are no transactions, updates or deletes.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Table<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a row
    pub fn add(&mut self, row: T) {
        self.rows.push(row);
    }

    /// Rows matching the predicate, in insertion order
    pub fn query<P>(&self, mut predicate: P) -> impl Iterator<Item = &T>
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.iter().filter(move |row| predicate(*row))
    }

    /// All rows, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

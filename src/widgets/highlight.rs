//! Small identifier sets for highlighted and recorded elements.

/// Insertion-ordered set without duplicates.
///
/// These sets hold a handful of ids, so membership is a linear scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSet<T> {
    items: Vec<T>,
}

impl<T: Copy + PartialEq> IdSet<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn contains(&self, id: T) -> bool {
        self.items.contains(&id)
    }

    /// Add or remove `id`. Returns whether the set changed.
    pub fn set(&mut self, id: T, member: bool) -> bool {
        if member {
            self.insert(id)
        } else {
            self.remove(id)
        }
    }

    pub fn insert(&mut self, id: T) -> bool {
        if self.contains(id) {
            return false;
        }
        self.items.push(id);
        true
    }

    pub fn remove(&mut self, id: T) -> bool {
        match self.items.iter().position(|item| *item == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flip membership and return the new state
    pub fn toggle(&mut self, id: T) -> bool {
        let member = !self.contains(id);
        self.set(id, member);
        member
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.items.iter().copied()
    }
}

impl<T: Copy + PartialEq> Default for IdSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::HashSet;

/// Application ids chosen for a bulk action on the page in view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it if present.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Header checkbox behaviour: a fully selected page is cleared, anything
    /// else selects every id on the page.
    pub fn toggle_all(&mut self, page_ids: &[&str]) {
        if self.is_all_selected(page_ids) {
            self.clear();
        } else {
            self.select_all(page_ids.iter().copied());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn is_all_selected(&self, page_ids: &[&str]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(*id))
    }

    pub fn is_partially_selected(&self, page_ids: &[&str]) -> bool {
        let selected = page_ids.iter().filter(|id| self.ids.contains(**id)).count();
        selected > 0 && selected < page_ids.len()
    }
}

#[cfg(test)]
#[path = "../tests/discovery/selection_tests.rs"]
mod tests;

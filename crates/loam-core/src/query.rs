//! Derived view queries
//!
//! Pure, synchronous functions over an in-memory collection. The UI runs
//! these against the state store's mirror instead of re-querying the
//! repository.

use crate::models::Note;

/// Notes ordered by `updated_at` descending, at most `limit` entries
#[must_use]
pub fn recent_notes(notes: &[Note], limit: usize) -> Vec<Note> {
    let mut ordered = notes.to_vec();
    ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    ordered.truncate(limit);
    ordered
}

/// Favorite notes, preserving their relative order
#[must_use]
pub fn favorite_notes(notes: &[Note]) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.is_favorite)
        .cloned()
        .collect()
}

/// Notes matching `query` (case-insensitive, over title/content/tags)
#[must_use]
pub fn search_notes(notes: &[Note], query: &str) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.matches(query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteDraft;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn note(title: &str) -> Note {
        Note::new(NoteDraft::text(title, ""))
    }

    #[test]
    fn test_recent_notes_orders_by_updated_at() {
        let mut a = note("a");
        let mut b = note("b");
        let mut c = note("c");
        b.updated_at += Duration::seconds(2);
        c.updated_at += Duration::seconds(1);

        let recent = recent_notes(&[a.clone(), b.clone(), c.clone()], 2);
        let titles: Vec<&str> = recent.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);

        a.updated_at += Duration::seconds(10);
        let recent = recent_notes(&[a, b, c], 10);
        assert_eq!(recent[0].title, "a");
    }

    #[test]
    fn test_favorite_notes_preserves_relative_order() {
        let mut first = note("first");
        let second = note("second");
        let mut third = note("third");
        first.is_favorite = true;
        third.is_favorite = true;

        let favorites = favorite_notes(&[first, second, third]);
        let titles: Vec<&str> = favorites.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third"]);
    }

    #[test]
    fn test_search_notes_subset() {
        let abc = note("ABC");
        let mut inside = note("xyz");
        inside.content = "has abc inside".to_string();
        let none = note("none");

        let results = search_notes(&[abc, inside, none], "abc");
        let titles: Vec<&str> = results.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["ABC", "xyz"]);
    }
}

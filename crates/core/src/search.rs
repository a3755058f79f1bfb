//! Search projection over the category list.
//!
//! The admin list view filters as the user types. The projection is a pure
//! function of the current snapshot and the query string: no state of its
//! own, recomputed on every keystroke and after every cache change, order
//! preserved from the canonical `sort_order` sequence.

use crate::category::CategoryRecord;

/// Case-insensitive substring match against `name`, `slug`, and
/// `description` (a missing description matches nothing). An empty or
/// whitespace-only query matches every record.
pub fn matches_query(record: &CategoryRecord, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    record.name.to_lowercase().contains(&needle)
        || record.slug.to_lowercase().contains(&needle)
        || record
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// Lazily project the snapshot through the query filter.
///
/// The iterator borrows the snapshot, so it is restartable for free: call
/// again with the same inputs to re-run the projection. Canonical order is
/// preserved because the snapshot is already display-ordered.
pub fn project<'a>(
    records: &'a [CategoryRecord],
    query: &'a str,
) -> impl Iterator<Item = &'a CategoryRecord> + 'a {
    records.iter().filter(move |r| matches_query(r, query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, slug: &str, description: Option<&str>) -> CategoryRecord {
        CategoryRecord {
            id: slug.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.map(str::to_string),
            color: None,
            icon: None,
            sort_order: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn newsroom() -> Vec<CategoryRecord> {
        vec![
            category("Politics", "politics", None),
            category("Sports", "sports", Some("Scores and match reports")),
            category("Business", "business", None),
        ]
    }

    // -- matching rule -------------------------------------------------------

    #[test]
    fn substring_of_name_matches_case_insensitively() {
        let records = newsroom();
        let hits: Vec<&str> = project(&records, "ti").map(|r| r.name.as_str()).collect();
        assert_eq!(hits, ["Politics"]);
    }

    #[test]
    fn uppercase_query_matches() {
        let records = newsroom();
        let hits: Vec<&str> = project(&records, "SPORT").map(|r| r.name.as_str()).collect();
        assert_eq!(hits, ["Sports"]);
    }

    #[test]
    fn description_is_searched_when_present() {
        let records = newsroom();
        let hits: Vec<&str> = project(&records, "match rep")
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(hits, ["Sports"]);
    }

    #[test]
    fn missing_description_is_treated_as_empty() {
        let records = vec![category("Politics", "politics", None)];
        assert!(project(&records, "report").next().is_none());
    }

    #[test]
    fn slug_is_searched() {
        let records = vec![category("World News", "world-news", None)];
        let hits: Vec<&str> = project(&records, "-ne").map(|r| r.name.as_str()).collect();
        assert_eq!(hits, ["World News"]);
    }

    // -- empty queries and ordering ------------------------------------------

    #[test]
    fn empty_query_yields_everything_in_order() {
        let records = newsroom();
        let hits: Vec<&str> = project(&records, "").map(|r| r.name.as_str()).collect();
        assert_eq!(hits, ["Politics", "Sports", "Business"]);
    }

    #[test]
    fn whitespace_only_query_matches_all() {
        let records = newsroom();
        assert_eq!(project(&records, "   ").count(), 3);
    }

    #[test]
    fn projection_preserves_canonical_order() {
        let records = newsroom();
        let hits: Vec<&str> = project(&records, "s").map(|r| r.name.as_str()).collect();
        // Everything contains an "s"; order must stay canonical.
        assert_eq!(hits, ["Politics", "Sports", "Business"]);
    }

    #[test]
    fn projection_is_restartable() {
        let records = newsroom();
        assert_eq!(project(&records, "ti").count(), 1);
        assert_eq!(project(&records, "ti").count(), 1);
    }
}

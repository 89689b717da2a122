//! Breed filtering and display labels
//!
//! Everything here is a pure function of the record list and the query. Nothing is
//! cached; callers recompute on every frame.

use crate::api::DogRecord;

/// Shown in the breed column when a record has no usable breed name
pub const UNKNOWN_BREED: &str = "Unknown Breed";

/// Image alt text when a record has no usable breed name
pub const DEFAULT_ALT: &str = "Dog";

fn breed_name(record: &DogRecord) -> Option<&str> {
    record.primary_breed().filter(|name| !name.is_empty())
}

/// Breed column text for a record.
pub fn display_name(record: &DogRecord) -> &str {
    breed_name(record).unwrap_or(UNKNOWN_BREED)
}

/// Alt text for a record's image.
pub fn alt_text(record: &DogRecord) -> &str {
    breed_name(record).unwrap_or(DEFAULT_ALT)
}

/// Check whether a record's first breed contains `query`, ignoring case.
///
/// An empty query matches every record, including ones without breeds. A non-empty
/// query never matches a record without breeds.
pub fn matches_breed(record: &DogRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    match record.primary_breed() {
        Some(name) => name.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}

/// Indices into `records` that match `query`, in ascending order.
pub fn filter_indices(records: &[DogRecord], query: &str) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_breed(record, query))
        .map(|(idx, _)| idx)
        .collect()
}

/// The filtered view: records matching `query`, in their original order.
pub fn filter_records<'a>(records: &'a [DogRecord], query: &str) -> Vec<&'a DogRecord> {
    filter_indices(records, query)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Breed;
    use pretty_assertions::assert_eq;

    fn record(url: &str, breeds: &[&str]) -> DogRecord {
        DogRecord::new(url, breeds.iter().map(|b| Breed::new(*b)).collect())
    }

    fn sample() -> Vec<DogRecord> {
        vec![
            record("1.jpg", &["Labrador Retriever"]),
            record("2.jpg", &[]),
            record("3.jpg", &["Pug"]),
            record("4.jpg", &["Black Labrador", "Pug"]),
            record("5.jpg", &["Afghan Hound"]),
        ]
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let records = sample();
        let filtered = filter_records(&records, "");
        assert_eq!(filtered.len(), records.len());
        for (got, want) in filtered.iter().zip(records.iter()) {
            assert_eq!(*got, want);
        }
    }

    #[test]
    fn match_is_case_insensitive() {
        let records = vec![record("l.jpg", &["Labrador"])];
        assert_eq!(filter_indices(&records, "lab"), vec![0]);
        assert_eq!(filter_indices(&records, "LAB"), vec![0]);
        assert_eq!(filter_indices(&records, "rAdO"), vec![0]);
    }

    #[test]
    fn only_first_breed_is_searched() {
        let records = sample();
        // 4.jpg carries Pug as its second tag and must not match.
        assert_eq!(filter_indices(&records, "pug"), vec![2]);
        assert_eq!(filter_indices(&records, "labrador"), vec![0, 3]);
    }

    #[test]
    fn breedless_records_only_survive_an_empty_query() {
        let records = sample();
        assert!(filter_indices(&records, "").contains(&1));
        for query in ["a", " ", "unknown", "dog"] {
            assert!(!filter_indices(&records, query).contains(&1), "query {:?}", query);
        }
    }

    #[test]
    fn query_is_not_trimmed() {
        let records = sample();
        assert_eq!(filter_indices(&records, "pug "), Vec::<usize>::new());
        assert_eq!(filter_indices(&records, " hound"), vec![4]);
    }

    #[test]
    fn result_is_an_ordered_subsequence_and_source_is_untouched() {
        let records = sample();
        let before = records.clone();
        for query in ["", "a", "o", "r", "pug", "zzz", "LAB", " "] {
            let indices = filter_indices(&records, query);
            assert!(indices.windows(2).all(|w| w[0] < w[1]), "query {:?}", query);
            assert!(indices.iter().all(|&i| i < records.len()));
            assert_eq!(filter_indices(&records, query), indices);
        }
        assert_eq!(records, before);
    }

    #[test]
    fn placeholders_for_missing_or_empty_names() {
        let none = record("x.jpg", &[]);
        let blank = record("y.jpg", &[""]);
        let named = record("z.jpg", &["Pug"]);

        assert_eq!(display_name(&none), UNKNOWN_BREED);
        assert_eq!(alt_text(&none), DEFAULT_ALT);
        assert_eq!(display_name(&blank), UNKNOWN_BREED);
        assert_eq!(alt_text(&blank), DEFAULT_ALT);
        assert_eq!(display_name(&named), "Pug");
        assert_eq!(alt_text(&named), "Pug");
    }

    #[test]
    fn blank_breed_name_never_matches_non_empty_query() {
        let records = vec![record("y.jpg", &[""])];
        assert!(matches_breed(&records[0], ""));
        assert!(!matches_breed(&records[0], "u"));
        assert!(filter_indices(&records, "u").is_empty());
    }
}

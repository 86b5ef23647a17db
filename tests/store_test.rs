mod common;

use chrono::NaiveDate;
use common::temp_store;
use watchlog::{MediaType, MediaUpdate, NewMediaEntry, WatchLogError};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn entry(title: &str, media_type: MediaType, genre: &str, minutes: u32, date: NaiveDate) -> NewMediaEntry {
    NewMediaEntry::new(title, media_type)
        .with_genre(genre)
        .with_duration(minutes)
        .watched_on(date)
}

#[test]
fn test_insert_then_get_returns_same_fields() {
    let (_dir, store) = temp_store();

    let new_entry = entry("Arrival", MediaType::Movie, "Drama", 116, day(9));
    let id = store.insert(&new_entry).unwrap();

    let stored = store.get(id).unwrap().expect("entry should exist");
    assert_eq!(stored.id, id);
    assert_eq!(stored.title, "Arrival");
    assert_eq!(stored.media_type, MediaType::Movie);
    assert_eq!(stored.genre, "Drama");
    assert_eq!(stored.duration_minutes, 116);
    assert_eq!(stored.watched_date, day(9));
}

#[test]
fn test_ids_are_unique_and_get_missing_is_none() {
    let (_dir, store) = temp_store();

    let first = store.insert(&NewMediaEntry::new("One", MediaType::Tv)).unwrap();
    let second = store.insert(&NewMediaEntry::new("Two", MediaType::Tv)).unwrap();
    assert_ne!(first, second);

    assert!(store.get(second + 100).unwrap().is_none());
}

#[test]
fn test_defaults_are_stored() {
    let (_dir, store) = temp_store();

    let id = store.insert(&NewMediaEntry::new("Pilot", MediaType::Tv)).unwrap();
    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.genre, "Unknown");
    assert_eq!(stored.duration_minutes, 30);
}

#[test]
fn test_blank_genre_is_stored_as_unknown() {
    let (_dir, store) = temp_store();

    let mut new_entry = NewMediaEntry::new("Solaris", MediaType::Movie);
    new_entry.genre = "   ".to_string();
    let blank = store.insert(&new_entry).unwrap();

    new_entry.genre = "  Drama ".to_string();
    let padded = store.insert(&new_entry).unwrap();

    assert_eq!(store.get(blank).unwrap().unwrap().genre, "Unknown");
    assert_eq!(store.get(padded).unwrap().unwrap().genre, "Drama");
}

#[test]
fn test_titles_with_sql_characters_are_stored_verbatim() {
    let (_dir, store) = temp_store();

    let tricky = "Ocean's Eleven'; DROP TABLE media; --";
    let id = store.insert(&NewMediaEntry::new(tricky, MediaType::Movie)).unwrap();

    assert_eq!(store.get(id).unwrap().unwrap().title, tricky);
    assert_eq!(store.list(None).unwrap().len(), 1);
}

#[test]
fn test_blank_title_is_rejected() {
    let (_dir, store) = temp_store();

    let result = store.insert(&NewMediaEntry::new("   ", MediaType::Movie));
    assert!(matches!(result, Err(WatchLogError::InvalidInput(_))));
    assert!(store.list(None).unwrap().is_empty());
}

#[test]
fn test_update_changes_only_target_row() {
    let (_dir, store) = temp_store();

    let target = store.insert(&entry("Dune", MediaType::Movie, "Unknown", 90, day(1))).unwrap();
    let other = store.insert(&entry("Heat", MediaType::Movie, "Crime", 170, day(1))).unwrap();

    store
        .update(
            target,
            &MediaUpdate {
                title: Some("Dune: Part One".to_string()),
                genre: Some("Science Fiction".to_string()),
                duration_minutes: Some(155),
                ..Default::default()
            },
        )
        .unwrap();

    let updated = store.get(target).unwrap().unwrap();
    assert_eq!(updated.title, "Dune: Part One");
    assert_eq!(updated.genre, "Science Fiction");
    assert_eq!(updated.duration_minutes, 155);
    assert_eq!(updated.media_type, MediaType::Movie);
    assert_eq!(updated.watched_date, day(1));

    let untouched = store.get(other).unwrap().unwrap();
    assert_eq!(untouched.title, "Heat");
    assert_eq!(untouched.genre, "Crime");
    assert_eq!(untouched.duration_minutes, 170);
}

#[test]
fn test_update_type_and_blank_genre() {
    let (_dir, store) = temp_store();

    let id = store.insert(&entry("Chernobyl", MediaType::Movie, "Drama", 60, day(2))).unwrap();
    store
        .update(
            id,
            &MediaUpdate {
                media_type: Some(MediaType::Tv),
                genre: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let updated = store.get(id).unwrap().unwrap();
    assert_eq!(updated.media_type, MediaType::Tv);
    assert_eq!(updated.genre, "Unknown");
}

#[test]
fn test_update_and_delete_missing_rows() {
    let (_dir, store) = temp_store();

    let update = MediaUpdate {
        title: Some("Nothing".to_string()),
        ..Default::default()
    };
    assert!(matches!(store.update(99, &update), Err(WatchLogError::NotFound(99))));
    assert!(matches!(store.delete(99), Err(WatchLogError::NotFound(99))));
}

#[test]
fn test_delete_removes_exactly_one_row() {
    let (_dir, store) = temp_store();

    let keep = store.insert(&entry("Keep", MediaType::Movie, "Drama", 60, day(5))).unwrap();
    let removed = store.insert(&entry("Drop", MediaType::Movie, "Drama", 90, day(5))).unwrap();
    assert_eq!(store.sum_duration_for_date(day(5)).unwrap(), 150);

    store.delete(removed).unwrap();

    assert!(store.get(removed).unwrap().is_none());
    assert!(store.get(keep).unwrap().is_some());
    assert_eq!(store.list(None).unwrap().len(), 1);
    assert_eq!(store.sum_duration_for_date(day(5)).unwrap(), 60);
}

#[test]
fn test_list_is_most_recent_first_and_limited() {
    let (_dir, store) = temp_store();

    store.insert(&entry("Old", MediaType::Movie, "Drama", 100, day(1))).unwrap();
    store.insert(&entry("Newest", MediaType::Tv, "Comedy", 25, day(8))).unwrap();
    store.insert(&entry("Middle", MediaType::Movie, "Drama", 100, day(4))).unwrap();

    let titles: Vec<String> = store
        .list(None)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Old"]);

    let limited = store.list(Some(2)).unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].title, "Newest");

    assert_eq!(store.list(Some(usize::MAX)).unwrap().len(), 3);
    assert!(store.list(Some(0)).unwrap().is_empty());
}

#[test]
fn test_sum_duration_for_date_and_range() {
    let (_dir, store) = temp_store();

    store.insert(&entry("A", MediaType::Movie, "Drama", 60, day(3))).unwrap();
    store.insert(&entry("B", MediaType::Tv, "Comedy", 30, day(3))).unwrap();
    store.insert(&entry("C", MediaType::Tv, "Comedy", 45, day(6))).unwrap();
    store.insert(&entry("D", MediaType::Movie, "Drama", 120, day(10))).unwrap();

    assert_eq!(store.sum_duration_for_date(day(3)).unwrap(), 90);
    assert_eq!(store.sum_duration_for_date(day(4)).unwrap(), 0);

    assert_eq!(store.sum_duration_for_range(day(3), day(6)).unwrap(), 135);
    assert_eq!(store.sum_duration_for_range(day(4), day(9)).unwrap(), 45);
    assert_eq!(store.sum_duration_for_range(day(10), day(10)).unwrap(), 120);
    assert_eq!(store.sum_duration_for_range(day(11), day(20)).unwrap(), 0);
}

#[test]
fn test_inverted_range_is_rejected() {
    let (_dir, store) = temp_store();
    assert!(matches!(
        store.sum_duration_for_range(day(9), day(3)),
        Err(WatchLogError::InvalidInput(_))
    ));
}

#[test]
fn test_most_frequent_genre() {
    let (_dir, store) = temp_store();
    assert_eq!(store.most_frequent_genre().unwrap(), None);

    store.insert(&entry("A", MediaType::Movie, "Drama", 60, day(1))).unwrap();
    store.insert(&entry("B", MediaType::Movie, "Comedy", 60, day(1))).unwrap();
    store.insert(&entry("C", MediaType::Tv, "Drama", 30, day(2))).unwrap();

    let top = store.most_frequent_genre().unwrap().unwrap();
    assert_eq!(top.genre, "Drama");
    assert_eq!(top.count, 2);
}

#[test]
fn test_most_frequent_genre_ties_break_alphabetically() {
    let (_dir, store) = temp_store();

    // Insert the alphabetically later genre first so insertion order cannot decide
    store.insert(&entry("A", MediaType::Movie, "Thriller", 60, day(1))).unwrap();
    store.insert(&entry("B", MediaType::Movie, "Animation", 60, day(1))).unwrap();
    store.insert(&entry("C", MediaType::Movie, "Thriller", 60, day(1))).unwrap();
    store.insert(&entry("D", MediaType::Movie, "Animation", 60, day(1))).unwrap();

    let top = store.most_frequent_genre().unwrap().unwrap();
    assert_eq!(top.genre, "Animation");
    assert_eq!(top.count, 2);
}

#[test]
fn test_store_reopens_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("media_tracker.db");

    let id = {
        let store = watchlog::MediaStore::open(&path).unwrap();
        store.insert(&NewMediaEntry::new("Persisted", MediaType::Movie)).unwrap()
    };

    let reopened = watchlog::MediaStore::open(&path).unwrap();
    assert_eq!(reopened.get(id).unwrap().unwrap().title, "Persisted");
}

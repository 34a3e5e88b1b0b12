use tempfile::TempDir;
use user_records::{ConnectionConfig, StoreError, UserRecord, UserStore};

fn open_store() -> (TempDir, UserStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = UserStore::open(ConnectionConfig::new(dir.path(), "users")).unwrap();
    (dir, store)
}

fn user(id: i64, value: f64, first: &str, last: &str, category: &str, mission: &str) -> UserRecord {
    UserRecord {
        id,
        numeric_value: value,
        first_name: first.into(),
        last_name: last.into(),
        category: category.into(),
        mission: mission.into(),
    }
}

fn ann() -> UserRecord {
    user(1, 3.5, "Ann", "Lee", "Ops", "Alpha")
}

fn seed(store: &UserStore) {
    for record in [
        ann(),
        user(2, 1.5, "Bob", "Smith", "Eng", "Beta"),
        user(3, 10.0, "Cara", "Jones", "ops", "Gamma"),
    ] {
        assert!(store.add(&record).unwrap());
    }
}

#[test]
fn open_creates_missing_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = UserStore::open(ConnectionConfig::new(&nested, "people")).unwrap();
    assert!(nested.join("people.sqlite").exists());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn added_record_reads_back_identically() {
    let (_dir, store) = open_store();
    assert!(store.add(&ann()).unwrap());
    assert_eq!(store.get_by_id(1).unwrap(), Some(ann()));
    assert_eq!(store.get_by_id(2).unwrap(), None);
}

#[test]
fn list_all_is_ordered_by_id() {
    let (_dir, store) = open_store();
    store.add(&user(5, 1.0, "E", "E", "X", "M")).unwrap();
    store.add(&user(2, 1.0, "B", "B", "X", "M")).unwrap();
    store.add(&user(9, 1.0, "I", "I", "X", "M")).unwrap();
    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![2, 5, 9]);
}

#[test]
fn duplicate_id_is_reported_and_first_record_kept() {
    let (_dir, store) = open_store();
    store.add(&ann()).unwrap();
    let err = store
        .add(&user(1, 9.0, "Zed", "Zee", "Eng", "Omega"))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(1)));
    assert_eq!(err.to_string(), "User ID 1 already exists.");
    assert_eq!(store.get_by_id(1).unwrap(), Some(ann()));
}

#[test]
fn update_replaces_every_field_but_id() {
    let (_dir, store) = open_store();
    store.add(&ann()).unwrap();
    let changed = user(1, 7.25, "Anne", "Leigh", "Eng", "Delta");
    assert!(store.update(&changed).unwrap());
    assert_eq!(store.get_by_id(1).unwrap(), Some(changed));
}

#[test]
fn update_of_missing_id_changes_nothing() {
    let (_dir, store) = open_store();
    store.add(&ann()).unwrap();
    assert!(!store.update(&user(4, 1.0, "X", "Y", "Z", "W")).unwrap());
    assert_eq!(store.list_all().unwrap(), vec![ann()]);
}

#[test]
fn delete_removes_only_the_target() {
    let (_dir, store) = open_store();
    seed(&store);
    assert!(store.exists(2).unwrap());
    assert!(store.delete(2).unwrap());
    assert!(!store.exists(2).unwrap());
    assert!(!store.delete(2).unwrap());
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn search_matches_any_text_field_ignoring_case() {
    let (_dir, store) = open_store();
    seed(&store);

    let by_last: Vec<i64> = store.search("SMI").unwrap().iter().map(|u| u.id).collect();
    assert_eq!(by_last, vec![2]);

    let by_category: Vec<i64> = store.search("ops").unwrap().iter().map(|u| u.id).collect();
    assert_eq!(by_category, vec![1, 3]);

    let by_mission: Vec<i64> = store.search("amm").unwrap().iter().map(|u| u.id).collect();
    assert_eq!(by_mission, vec![3]);

    assert!(store.search("nobody").unwrap().is_empty());
}

#[test]
fn search_results_are_a_subset_of_list_all() {
    let (_dir, store) = open_store();
    seed(&store);
    let all = store.list_all().unwrap();
    for term in ["a", "e", "o", "x"] {
        for found in store.search(term).unwrap() {
            assert!(all.contains(&found), "{found} missing from list_all");
        }
    }
}

#[test]
fn empty_search_term_returns_everything() {
    let (_dir, store) = open_store();
    seed(&store);
    assert_eq!(store.search("").unwrap(), store.list_all().unwrap());
}

#[test]
fn wildcards_in_the_term_match_literally() {
    let (_dir, store) = open_store();
    store.add(&user(1, 1.0, "100%", "Lee", "Ops", "Alpha")).unwrap();
    store.add(&user(2, 1.0, "1000", "Lee", "Ops", "Alpha")).unwrap();
    store.add(&user(3, 1.0, "a_b", "Lee", "Ops", "Alpha")).unwrap();
    store.add(&user(4, 1.0, "axb", "Lee", "Ops", "Alpha")).unwrap();

    let percent: Vec<i64> = store.search("0%").unwrap().iter().map(|u| u.id).collect();
    assert_eq!(percent, vec![1]);
    let underscore: Vec<i64> = store.search("a_b").unwrap().iter().map(|u| u.id).collect();
    assert_eq!(underscore, vec![3]);
}

#[test]
fn search_ignores_case_beyond_ascii() {
    let (_dir, store) = open_store();
    store.add(&user(1, 1.0, "Özil", "Mesut", "Mid", "Berlin")).unwrap();
    store.add(&user(2, 1.0, "ÉMILE", "Zola", "Writer", "Paris")).unwrap();
    store.add(&user(3, 1.0, "Oskar", "Lee", "Ops", "Alpha")).unwrap();

    let ids = |term: &str| -> Vec<i64> { store.search(term).unwrap().iter().map(|u| u.id).collect() };
    assert_eq!(ids("öz"), vec![1]);
    assert_eq!(ids("ÖZ"), vec![1]);
    assert_eq!(ids("émile"), vec![2]);
    assert_eq!(ids("mIlE"), vec![2]);
    assert!(ids("oz").is_empty());
}

#[test]
fn injection_shaped_text_is_stored_verbatim() {
    let (_dir, store) = open_store();
    let hostile = user(
        1,
        1.0,
        "Robert'); DROP TABLE users;--",
        "O'Brien",
        "x' OR '1'='1",
        "\"quoted\"",
    );
    store.add(&hostile).unwrap();
    store.add(&user(2, 2.0, "Bob", "Smith", "Eng", "Beta")).unwrap();

    assert_eq!(store.get_by_id(1).unwrap(), Some(hostile));
    assert_eq!(store.search("x' OR '1'='1").unwrap().len(), 1);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn statistics_of_empty_store_are_zero() {
    let (_dir, store) = open_store();
    let stats = store.statistics().unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.average, 0.0);
    assert_eq!(stats.max, 0.0);
    assert_eq!(stats.min, 0.0);
}

#[test]
fn statistics_for_a_single_user() {
    let (_dir, store) = open_store();
    store.add(&ann()).unwrap();
    let stats = store.statistics().unwrap();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.average, 3.5);
    assert_eq!(stats.max, 3.5);
    assert_eq!(stats.min, 3.5);
}

#[test]
fn statistics_follow_mutations() {
    let (_dir, store) = open_store();
    seed(&store);
    let stats = store.statistics().unwrap();
    assert_eq!(stats.count, 3);
    assert!((stats.average - 5.0).abs() < 1e-9);
    assert_eq!(stats.max, 10.0);
    assert_eq!(stats.min, 1.5);

    store.delete(3).unwrap();
    let stats = store.statistics().unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.max, 3.5);
    assert!(stats.min <= stats.average && stats.average <= stats.max);
}

#[test]
fn category_summaries_group_exact_names() {
    let (_dir, store) = open_store();
    seed(&store);
    store.add(&user(4, 4.5, "Dan", "Ray", "Eng", "Beta")).unwrap();

    let summaries = store.category_summaries().unwrap();
    let names: Vec<&str> = summaries.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["Eng", "Ops", "ops"]);
    assert_eq!(summaries[0].count, 2);
    assert_eq!(summaries[0].average, 3.0);
    assert_eq!(summaries[1].count, 1);
}

#[test]
fn data_survives_reopening_the_store() {
    let (dir, store) = open_store();
    seed(&store);
    drop(store);

    let reopened = UserStore::open(ConnectionConfig::new(dir.path(), "users")).unwrap();
    assert_eq!(reopened.list_all().unwrap().len(), 3);
    assert_eq!(reopened.get_by_id(1).unwrap(), Some(ann()));
}

#[test]
fn separate_database_names_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let first = UserStore::open(ConnectionConfig::new(dir.path(), "first")).unwrap();
    let second = UserStore::open(ConnectionConfig::new(dir.path(), "second")).unwrap();
    first.add(&ann()).unwrap();
    assert!(second.list_all().unwrap().is_empty());
    assert_eq!(second.config().database, "second");
}

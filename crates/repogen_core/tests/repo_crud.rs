mod support;

use repogen_core::query::Cond;
use repogen_core::repo::{FindOptions, RepoError, SqliteRepository};
use support::{open_test_db, sample, User, CREATED_AT, ID, NAME, PASSWORD};

#[test]
fn create_returns_generated_primary_keys_in_sequence() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    let first = repo.create(&sample("u1", "p1")).unwrap();
    let second = repo.create(&sample("u2", "p2")).unwrap();
    assert!(first > 0);
    assert!(second > first);
}

#[test]
fn find_one_returns_the_created_row() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.create(&sample("u1", "p1")).unwrap();
    let found = repo
        .find_one(&NAME.eq("u1".to_string()), &FindOptions::new())
        .unwrap();
    assert!(found.id > 0);
    assert_eq!(found.name, "u1");
    assert_eq!(found.password, "p1");
    assert_eq!(found.created_at, sample("u1", "p1").created_at);
}

#[test]
fn find_one_distinguishes_absence_from_failure() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    let err = repo
        .find_one(&NAME.eq("missing".to_string()), &FindOptions::new())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[test]
fn batch_create_persists_every_row_in_insertion_order() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    let users = vec![sample("u1", "p1"), sample("u2", "p2"), sample("u3", "p3")];
    repo.batch_create(&users).unwrap();

    let found = repo
        .find(&Cond::none(), &FindOptions::new().sort(ID.asc()))
        .unwrap();
    assert_eq!(found.len(), 3);
    for (row, given) in found.iter().zip(&users) {
        assert_eq!(row.name, given.name);
        assert_eq!(row.password, given.password);
        assert_eq!(row.created_at, given.created_at);
    }
}

#[test]
fn batch_create_of_nothing_is_a_no_op() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.batch_create(&[]).unwrap();
    let found = repo.find(&Cond::none(), &FindOptions::new()).unwrap();
    assert!(found.is_empty());
}

#[test]
fn update_applies_assignments_to_matching_rows_only() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.create(&sample("u1", "p1")).unwrap();
    repo.create(&sample("u2", "p2")).unwrap();

    let affected = repo
        .update(
            &NAME.eq("u1".to_string()),
            &[PASSWORD.set("changed".to_string())],
        )
        .unwrap();
    assert_eq!(affected, 1);

    let updated = repo
        .find_one(&NAME.eq("u1".to_string()), &FindOptions::new())
        .unwrap();
    assert_eq!(updated.password, "changed");

    let untouched = repo
        .find_one(&NAME.eq("u2".to_string()), &FindOptions::new())
        .unwrap();
    assert_eq!(untouched.password, "p2");
}

#[test]
fn update_without_filter_touches_every_row() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.batch_create(&[sample("u1", "p1"), sample("u2", "p2")])
        .unwrap();
    let affected = repo
        .update(&Cond::none(), &[PASSWORD.set("reset".to_string())])
        .unwrap();
    assert_eq!(affected, 2);
}

#[test]
fn update_binds_assignment_arguments_before_filter_arguments() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.create(&sample("u1", "p1")).unwrap();
    // Both the assignment and the filter bind a text value; a swapped
    // order would update the wrong row or set the wrong value.
    let affected = repo
        .update(
            &PASSWORD.eq("p1".to_string()),
            &[NAME.set("renamed".to_string())],
        )
        .unwrap();
    assert_eq!(affected, 1);
    let row = repo
        .find_one(&PASSWORD.eq("p1".to_string()), &FindOptions::new())
        .unwrap();
    assert_eq!(row.name, "renamed");
}

#[test]
fn delete_with_filter_reports_the_affected_count() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.batch_create(&[sample("u1", "p1"), sample("u2", "p2")])
        .unwrap();
    let affected = repo.delete(&NAME.eq("u1".to_string())).unwrap();
    assert_eq!(affected, 1);

    let err = repo
        .find_one(&NAME.eq("u1".to_string()), &FindOptions::new())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[test]
fn delete_without_filter_removes_all_rows() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.batch_create(&[sample("u1", "p1"), sample("u2", "p2"), sample("u3", "p3")])
        .unwrap();
    let affected = repo.delete(&Cond::none()).unwrap();
    assert_eq!(affected, 3);

    let remaining = repo.find(&Cond::none(), &FindOptions::new()).unwrap();
    assert!(remaining.is_empty());
}

#[test]
fn pagination_returns_windows_of_distinct_rows() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    let users: Vec<User> = (1..=15)
        .map(|n| sample(&format!("u{n:02}"), "p"))
        .collect();
    repo.batch_create(&users).unwrap();

    let first_page = repo
        .find(
            &Cond::none(),
            &FindOptions::new().sort(ID.asc()).paginate(0, 10),
        )
        .unwrap();
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0].name, "u01");

    let second_page = repo
        .find(
            &Cond::none(),
            &FindOptions::new().sort(ID.asc()).paginate(10, 10),
        )
        .unwrap();
    assert_eq!(second_page.len(), 5);
    assert_eq!(second_page[0].name, "u11");
}

#[test]
fn pagination_applies_the_filter_inside_the_window() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    let mut users = Vec::new();
    for n in 1..=6 {
        let mut user = sample(&format!("u{n}"), "p");
        user.created_at = n;
        users.push(user);
    }
    repo.batch_create(&users).unwrap();

    let window = repo
        .find(
            &CREATED_AT.ge(3),
            &FindOptions::new().sort(CREATED_AT.asc()).paginate(1, 2),
        )
        .unwrap();
    assert_eq!(window.len(), 2);
    assert_eq!(window[0].created_at, 4);
    assert_eq!(window[1].created_at, 5);
}

#[test]
fn sorting_orders_rows_without_an_implicit_fallback() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.batch_create(&[sample("banana", "p"), sample("apple", "p"), sample("cherry", "p")])
        .unwrap();

    let ascending = repo
        .find(&Cond::none(), &FindOptions::new().sort(NAME.asc()))
        .unwrap();
    let names: Vec<&str> = ascending.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, ["apple", "banana", "cherry"]);

    let descending = repo
        .find(&Cond::none(), &FindOptions::new().sort(NAME.desc()))
        .unwrap();
    assert_eq!(descending[0].name, "cherry");
}

#[test]
fn in_filters_match_listed_rows_and_empty_lists_match_nothing() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    repo.batch_create(&[sample("u1", "p"), sample("u2", "p"), sample("u3", "p")])
        .unwrap();

    let listed = repo
        .find(
            &NAME.is_in(vec!["u1".to_string(), "u3".to_string()]),
            &FindOptions::new().sort(ID.asc()),
        )
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "u1");
    assert_eq!(listed[1].name, "u3");

    let excluded = repo
        .find(&NAME.not_in(vec!["u2".to_string()]), &FindOptions::new())
        .unwrap();
    assert_eq!(excluded.len(), 2);

    let none = repo.find(&NAME.is_in(Vec::new()), &FindOptions::new()).unwrap();
    assert!(none.is_empty());
}

#[test]
fn combined_filters_bind_arguments_in_predicate_order() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    let mut early = sample("u1", "p");
    early.created_at = 100;
    let mut late = sample("u1", "p");
    late.created_at = 900;
    repo.batch_create(&[early, late]).unwrap();

    let found = repo
        .find(
            &NAME.eq("u1".to_string()).and(CREATED_AT.lt(500)),
            &FindOptions::new(),
        )
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].created_at, 100);
}

#[test]
fn end_to_end_lifecycle_matches_the_contract() {
    let mut conn = open_test_db();
    let repo = SqliteRepository::<User>::new(&mut conn);

    let id = repo.create(&sample("u1", "p1")).unwrap();
    assert!(id > 0);

    let affected = repo
        .update(
            &NAME.eq("u1".to_string()),
            &[PASSWORD.set("p2".to_string())],
        )
        .unwrap();
    assert_eq!(affected, 1);

    let found = repo
        .find_one(&NAME.eq("u1".to_string()), &FindOptions::new())
        .unwrap();
    assert_eq!(found.password, "p2");

    let deleted = repo.delete(&NAME.eq("u1".to_string())).unwrap();
    assert_eq!(deleted, 1);

    let err = repo
        .find_one(&NAME.eq("u1".to_string()), &FindOptions::new())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

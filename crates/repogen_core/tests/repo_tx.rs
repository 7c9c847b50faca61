mod support;

use repogen_core::query::Cond;
use repogen_core::repo::{FindOptions, RepoError, RepoResult, SqliteRepository};
use support::{open_test_db, sample, User, NAME, PASSWORD};

#[test]
fn committed_transaction_is_visible_outside() {
    let mut conn = open_test_db();
    let mut repo = SqliteRepository::<User>::new(&mut conn);

    let id = repo.in_tx(|tx| tx.create(&sample("u1", "p1"))).unwrap();
    assert!(id > 0);

    let found = repo
        .find_one(&NAME.eq("u1".to_string()), &FindOptions::new())
        .unwrap();
    assert_eq!(found.id, id);
}

#[test]
fn handler_error_rolls_back_every_write() {
    let mut conn = open_test_db();
    let mut repo = SqliteRepository::<User>::new(&mut conn);

    let err = repo
        .in_tx(|tx| -> RepoResult<()> {
            tx.create(&sample("ghost", "p"))?;
            tx.create(&sample("ghost2", "p"))?;
            Err(RepoError::NotFound)
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));

    let rows = repo.find(&Cond::none(), &FindOptions::new()).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn transaction_handle_supports_the_full_operation_set() {
    let mut conn = open_test_db();
    let mut repo = SqliteRepository::<User>::new(&mut conn);

    repo.in_tx(|tx| {
        tx.create(&sample("u1", "p1"))?;
        tx.batch_create(&[sample("u2", "p2"), sample("u3", "p3")])?;

        let affected = tx.update(
            &NAME.eq("u2".to_string()),
            &[PASSWORD.set("rotated".to_string())],
        )?;
        assert_eq!(affected, 1);

        let rotated = tx.find_one(&NAME.eq("u2".to_string()), &FindOptions::new())?;
        assert_eq!(rotated.password, "rotated");

        let all_rows = tx.find(&Cond::none(), &FindOptions::new())?;
        assert_eq!(all_rows.len(), 3);

        let deleted = tx.delete(&NAME.eq("u3".to_string()))?;
        assert_eq!(deleted, 1);
        Ok(())
    })
    .unwrap();

    let remaining = repo.find(&Cond::none(), &FindOptions::new()).unwrap();
    assert_eq!(remaining.len(), 2);
}

#[test]
fn writes_inside_the_transaction_are_read_back_before_commit() {
    let mut conn = open_test_db();
    let mut repo = SqliteRepository::<User>::new(&mut conn);

    repo.in_tx(|tx| {
        let id = tx.create(&sample("u1", "p1"))?;
        let row = tx.find_one(&NAME.eq("u1".to_string()), &FindOptions::new())?;
        assert_eq!(row.id, id);
        Ok(())
    })
    .unwrap();
}

#[test]
fn in_tx_rejects_a_connection_already_inside_a_transaction() {
    let mut conn = open_test_db();
    conn.execute_batch("BEGIN").unwrap();

    let mut repo = SqliteRepository::<User>::new(&mut conn);
    let err = repo.in_tx(|_tx| Ok(())).unwrap_err();
    assert!(matches!(err, RepoError::TxUnsupported));
}

use diesel::connection::SimpleConnection;
use fiscal_crm::db::{ConnectionOptions, establish_connection_pool_with, get_connection};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_pool_without_pragmas_still_connects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.db");
    let options = ConnectionOptions {
        enable_wal: false,
        enable_foreign_keys: false,
        busy_timeout: None,
    };

    let pool = establish_connection_pool_with(path.to_str().unwrap(), options).unwrap();
    let mut conn = get_connection(&pool).unwrap();

    assert!(conn.batch_execute("CREATE TABLE t (id INTEGER);").is_ok());
}

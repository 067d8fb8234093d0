use hogwarts_core::db::migrations::latest_version;
use hogwarts_core::db::open_db;
use hogwarts_core::{SqliteStudentRepository, Student, StudentService};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: usize = 4;
const STUDENTS_PER_WRITER: usize = 10;

#[test]
fn concurrent_writers_get_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hogwarts.db");
    drop(open_db(&path).unwrap());

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let path = path.clone();
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let service = StudentService::new(SqliteStudentRepository::try_new(&conn).unwrap());
                (0..STUDENTS_PER_WRITER)
                    .map(|index| {
                        service
                            .create_student(&Student::new(format!("w{writer}-{index}"), 11))
                            .unwrap()
                            .id
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<_> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(ids.len(), WRITERS * STUDENTS_PER_WRITER);

    let conn = open_db(&path).unwrap();
    let service = StudentService::new(SqliteStudentRepository::try_new(&conn).unwrap());
    assert_eq!(
        service.get_all_students().unwrap().len(),
        WRITERS * STUDENTS_PER_WRITER
    );
}

#[test]
fn concurrent_bootstrap_of_fresh_file_migrates_once() {
    for round in 0..10 {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("fresh-{round}.db"));
        let barrier = Arc::new(Barrier::new(WRITERS));

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let path = path.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    open_db(&path).map(|_| ()).map_err(|err| err.to_string())
                })
            })
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            assert!(result.is_ok(), "round {round}: {result:?}");
        }

        let conn = open_db(&path).unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, latest_version());
    }
}

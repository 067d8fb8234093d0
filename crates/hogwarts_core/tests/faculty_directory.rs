use hogwarts_core::db::open_db_in_memory;
use hogwarts_core::{
    Faculty, FacultyRepository, FacultyService, RepoError, SqliteFacultyRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;

fn service(conn: &Connection) -> FacultyService<SqliteFacultyRepository<'_>> {
    FacultyService::new(SqliteFacultyRepository::try_new(conn).unwrap())
}

fn faculty_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM faculties;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_assigns_fresh_id_and_keeps_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let first = service
        .create_faculty(&Faculty::new("Gryffindor", "Red"))
        .unwrap();
    let second = service
        .create_faculty(&Faculty::new("Ravenclaw", "Blue"))
        .unwrap();

    let first_id = first.id.unwrap();
    let second_id = second.id.unwrap();
    assert_ne!(first_id, second_id);
    assert_eq!(first.name, "Gryffindor");
    assert_eq!(first.color, "Red");

    let loaded = service.get_faculty(first_id).unwrap().unwrap();
    assert_eq!(loaded, first);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let first = service
        .create_faculty(&Faculty::new("Gryffindor", "Red"))
        .unwrap();
    service.delete_faculty(first.id.unwrap()).unwrap().unwrap();

    let second = service
        .create_faculty(&Faculty::new("Hufflepuff", "Yellow"))
        .unwrap();
    assert!(second.id.unwrap() > first.id.unwrap());
}

#[test]
fn get_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(service.get_faculty(42).unwrap().is_none());
    assert!(service.get_faculty_detail(42).unwrap().is_none());
    assert!(service.get_faculty_students(42).unwrap().is_none());
}

#[test]
fn get_all_returns_every_faculty() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for (name, color) in [("Gryffindor", "Red"), ("Slytherin", "Green"), ("Ravenclaw", "Blue")] {
        service.create_faculty(&Faculty::new(name, color)).unwrap();
    }

    let names: HashSet<_> = service
        .get_all_faculties()
        .unwrap()
        .into_iter()
        .map(|faculty| faculty.name)
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains("Slytherin"));
}

#[test]
fn update_replaces_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create_faculty(&Faculty::new("Gryffindor", "Red"))
        .unwrap();
    let id = created.id.unwrap();

    let updated = service
        .update_faculty(&Faculty::new("Gryffindor House", "Scarlet").with_id(id))
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, "Gryffindor House");
    assert_eq!(updated.color, "Scarlet");

    let loaded = service.get_faculty(id).unwrap().unwrap();
    assert_eq!(loaded, updated);
}

#[test]
fn update_unknown_id_returns_none_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let result = service
        .update_faculty(&Faculty::new("X", "Y").with_id(999))
        .unwrap();

    assert!(result.is_none());
    assert_eq!(faculty_count(&conn), 0);
    assert!(service.get_faculty(999).unwrap().is_none());
}

#[test]
fn update_without_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .update_faculty(&Faculty::new("X", "Y"))
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingId("faculty")));
    assert_eq!(faculty_count(&conn), 0);
}

#[test]
fn delete_returns_previous_state_then_absent() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create_faculty(&Faculty::new("Hufflepuff", "Yellow"))
        .unwrap();
    let id = created.id.unwrap();

    let deleted = service.delete_faculty(id).unwrap().unwrap();
    assert_eq!(deleted, created);
    assert!(service.get_faculty(id).unwrap().is_none());
    assert!(service.delete_faculty(id).unwrap().is_none());
}

#[test]
fn delete_unknown_id_returns_none_and_keeps_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .create_faculty(&Faculty::new("Ravenclaw", "Blue"))
        .unwrap();

    assert!(service.delete_faculty(77).unwrap().is_none());
    assert_eq!(faculty_count(&conn), 1);
}

#[test]
fn color_lookup_is_case_insensitive_exact_match() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let red = service
        .create_faculty(&Faculty::new("Gryffindor", "Red"))
        .unwrap();
    service
        .create_faculty(&Faculty::new("Crimson Club", "Dark Red"))
        .unwrap();

    let upper = service.get_faculties_by_color("RED").unwrap();
    let lower = service.get_faculties_by_color("red").unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper, vec![red]);
}

#[test]
fn color_lookup_folds_non_ascii_text() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let green = service
        .create_faculty(&Faculty::new("Слизерин", "Зелёный"))
        .unwrap();

    assert_eq!(
        service.get_faculties_by_color("ЗЕЛЁНЫЙ").unwrap(),
        vec![green]
    );
}

#[test]
fn search_matches_name_or_color() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let by_name = service
        .create_faculty(&Faculty::new("Gryffindor", "Red"))
        .unwrap();
    let by_color = service
        .create_faculty(&Faculty::new("Lions", "gryffindor"))
        .unwrap();
    service
        .create_faculty(&Faculty::new("Slytherin", "Green"))
        .unwrap();

    let found = service.search_by_name_or_color("Gryffindor").unwrap();
    assert_eq!(found, vec![by_name, by_color]);
}

#[test]
fn search_returns_a_row_once_when_both_fields_match() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_faculty(&Faculty::new("Blue", "BLUE"))
        .unwrap();

    assert_eq!(service.search_by_name_or_color("blue").unwrap().len(), 1);
    assert!(service.search_by_name_or_color("blu").unwrap().is_empty());
}

#[test]
fn repository_save_with_explicit_id_upserts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacultyRepository::try_new(&conn).unwrap();

    let inserted = repo
        .save(&Faculty::new("Durmstrang", "Crimson").with_id(10))
        .unwrap();
    assert_eq!(inserted.id, Some(10));

    let resaved = repo
        .save(&Faculty::new("Durmstrang", "Blood Red").with_id(10))
        .unwrap();
    assert_eq!(resaved.color, "Blood Red");
    assert_eq!(repo.find_all().unwrap().len(), 1);
    assert!(repo.exists_by_id(10).unwrap());
}

#[test]
fn repository_delete_of_absent_id_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacultyRepository::try_new(&conn).unwrap();

    repo.delete_by_id(5).unwrap();
    assert!(!repo.exists_by_id(5).unwrap());
}

/// Reports every id as present, mimicking a delete that lands between the
/// existence check and the write.
struct StaleExistenceCheck<'conn>(SqliteFacultyRepository<'conn>);

impl FacultyRepository for StaleExistenceCheck<'_> {
    fn find_by_id(&self, id: i64) -> hogwarts_core::RepoResult<Option<Faculty>> {
        self.0.find_by_id(id)
    }
    fn find_all(&self) -> hogwarts_core::RepoResult<Vec<Faculty>> {
        self.0.find_all()
    }
    fn exists_by_id(&self, _id: i64) -> hogwarts_core::RepoResult<bool> {
        Ok(true)
    }
    fn save(&self, faculty: &Faculty) -> hogwarts_core::RepoResult<Faculty> {
        self.0.save(faculty)
    }
    fn update(&self, faculty: &Faculty) -> hogwarts_core::RepoResult<Option<Faculty>> {
        self.0.update(faculty)
    }
    fn delete_by_id(&self, id: i64) -> hogwarts_core::RepoResult<()> {
        self.0.delete_by_id(id)
    }
    fn find_by_color_case_insensitive(
        &self,
        color: &str,
    ) -> hogwarts_core::RepoResult<Vec<Faculty>> {
        self.0.find_by_color_case_insensitive(color)
    }
    fn find_by_name_or_color_case_insensitive(
        &self,
        text: &str,
    ) -> hogwarts_core::RepoResult<Vec<Faculty>> {
        self.0.find_by_name_or_color_case_insensitive(text)
    }
    fn find_students(&self, id: i64) -> hogwarts_core::RepoResult<Vec<hogwarts_core::Student>> {
        self.0.find_students(id)
    }
}

#[test]
fn update_racing_a_delete_does_not_resurrect_the_row() {
    let conn = open_db_in_memory().unwrap();
    let service = FacultyService::new(StaleExistenceCheck(
        SqliteFacultyRepository::try_new(&conn).unwrap(),
    ));

    let created = service
        .create_faculty(&Faculty::new("Gryffindor", "Red"))
        .unwrap();
    let id = created.id.unwrap();
    service.delete_faculty(id).unwrap().unwrap();

    let result = service
        .update_faculty(&Faculty::new("Gryffindor", "Gold").with_id(id))
        .unwrap();
    assert!(result.is_none());
    assert_eq!(faculty_count(&conn), 0);
}

#[test]
fn repository_update_never_inserts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacultyRepository::try_new(&conn).unwrap();

    assert!(repo
        .update(&Faculty::new("Beauxbatons", "Azure").with_id(3))
        .unwrap()
        .is_none());
    assert!(repo.update(&Faculty::new("Beauxbatons", "Azure")).unwrap().is_none());
    assert_eq!(faculty_count(&conn), 0);
}

use rusqlite::Connection;
use std::collections::HashSet;
use userdb_core::db::{initialize_schema, open_db_in_memory, seed, SEED_USERS};
use userdb_core::{
    RepoError, SqliteUserRepository, UserFilter, UserRecord, UserRepository, UserService,
    UserValidationError,
};

fn seeded_conn() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    initialize_schema(&mut conn).unwrap();
    seed(&mut conn).unwrap();
    conn
}

fn empty_conn() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    initialize_schema(&mut conn).unwrap();
    conn
}

fn names(users: &[UserRecord]) -> HashSet<String> {
    users.iter().map(|user| user.name.clone()).collect()
}

#[test]
fn list_all_after_seed_matches_literal_set() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    let listed: HashSet<UserRecord> = repo.list_users().unwrap().into_iter().collect();
    let expected: HashSet<UserRecord> = SEED_USERS
        .iter()
        .map(|(name, email, age)| UserRecord::new(*name, *email, *age))
        .collect();

    assert_eq!(listed, expected);
}

#[test]
fn create_then_find_by_name() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let user = UserRecord::parse("New Person", "new.person@email.com", "41").unwrap();
    service.create(&user).unwrap();

    let loaded = service.find_by_name("New Person").unwrap().unwrap();
    assert_eq!(loaded, user);
    assert_eq!(service.list_all().unwrap().len(), SEED_USERS.len() + 1);
}

#[test]
fn find_by_name_absent_returns_none() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    assert!(repo.find_by_name("Nonexistent").unwrap().is_none());
    // Exact match only.
    assert!(repo.find_by_name("Anne").unwrap().is_none());
}

#[test]
fn validation_failures_do_not_touch_storage() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    let empty_name = UserRecord::new("", "a@b.com", 30);
    let err = repo.create_user(&empty_name).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(UserValidationError::EmptyName)
    ));

    let missing_at = UserRecord::new("A B", "noat.com", 30);
    let err = repo.create_user(&missing_at).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(UserValidationError::MissingAt)
    ));

    let err = UserRecord::parse("A B", "a@b.com", "abc").unwrap_err();
    assert_eq!(err, UserValidationError::InvalidAge("abc".to_string()));

    assert_eq!(repo.list_users().unwrap().len(), SEED_USERS.len());
}

#[test]
fn duplicate_email_is_rejected_and_count_unchanged() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let user = UserRecord::new("X Y", "anne.bee@email.com", 40);
    let err = service.create(&user).unwrap_err();

    assert!(matches!(err, RepoError::DuplicateEmail(ref email) if email == "anne.bee@email.com"));
    assert_eq!(service.list_all().unwrap().len(), SEED_USERS.len());
    assert!(service.find_by_name("X Y").unwrap().is_none());
}

#[test]
fn duplicate_names_are_allowed() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    repo.create_user(&UserRecord::new("Anne Bee", "anne.two@email.com", 50))
        .unwrap();

    let first = repo.find_by_name("Anne Bee").unwrap().unwrap();
    assert_eq!(first.name, "Anne Bee");
    assert_eq!(repo.list_users().unwrap().len(), SEED_USERS.len() + 1);
}

#[test]
fn search_matches_name_or_email_substring() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    let found = repo.search_users("ee").unwrap();
    let expected: HashSet<String> = SEED_USERS
        .iter()
        .filter(|(name, email, _)| {
            name.to_ascii_lowercase().contains("ee") || email.to_ascii_lowercase().contains("ee")
        })
        .map(|(name, _, _)| name.to_string())
        .collect();

    assert!(!expected.is_empty());
    assert_eq!(names(&found), expected);
    assert_eq!(found.len(), expected.len());
}

#[test]
fn search_matches_email_only_fragment() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    let found = repo.search_users("sam.tee@").unwrap();
    assert_eq!(found, vec![UserRecord::new("Sam Tee", "sam.tee@email.com", 23)]);
}

#[test]
fn search_treats_like_wildcards_literally() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    assert!(repo.search_users("%").unwrap().is_empty());
    assert!(repo.search_users("_").unwrap().is_empty());

    repo.create_user(&UserRecord::new("Per%Cent", "pct@email.com", 40))
        .unwrap();
    let found = repo.search_users("%").unwrap();
    assert_eq!(names(&found), HashSet::from(["Per%Cent".to_string()]));
}

#[test]
fn search_empty_term_matches_everything() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    assert_eq!(repo.search_users("").unwrap().len(), SEED_USERS.len());
}

#[test]
fn filter_age_bounds_are_exclusive() {
    let conn = empty_conn();
    let repo = SqliteUserRepository::new(&conn);
    for (index, age) in [19, 25, 27, 29, 36].into_iter().enumerate() {
        repo.create_user(&UserRecord::new(
            format!("User {index}"),
            format!("user{index}@email.com"),
            age,
        ))
        .unwrap();
    }

    let filter = UserFilter {
        name_prefix: String::new(),
        min_age: Some(25),
        max_age: Some(29),
    };
    let found = repo.filter_users(&filter).unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].age, 27);
}

#[test]
fn filter_without_bounds_or_prefix_returns_all() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    let found = repo.filter_users(&UserFilter::default()).unwrap();
    assert_eq!(found.len(), SEED_USERS.len());
}

#[test]
fn filter_bounds_are_not_clamped_to_sentinels() {
    let conn = empty_conn();
    let repo = SqliteUserRepository::new(&conn);
    repo.create_user(&UserRecord::new("Old One", "old@email.com", 5000))
        .unwrap();
    repo.create_user(&UserRecord::new("Odd One", "odd@email.com", -5000))
        .unwrap();

    let found = repo.filter_users(&UserFilter::default()).unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn filter_combines_prefix_and_single_bound() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    let filter = UserFilter {
        name_prefix: "C".to_string(),
        min_age: None,
        max_age: Some(27),
    };
    let found = repo.filter_users(&filter).unwrap();

    // Cee Dee (19) passes; Cora Fee (27) sits on the exclusive bound.
    assert_eq!(names(&found), HashSet::from(["Cee Dee".to_string()]));
}

#[test]
fn filter_prefix_is_anchored_at_start() {
    let conn = seeded_conn();
    let repo = SqliteUserRepository::new(&conn);

    let filter = UserFilter {
        name_prefix: "Dee".to_string(),
        ..UserFilter::default()
    };
    assert!(repo.filter_users(&filter).unwrap().is_empty());
}

#[test]
fn update_overwrites_all_fields() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let replacement = UserRecord::new("Anne Sea", "anne.sea@email.com", 28);
    let changed = service.update("Anne Bee", &replacement).unwrap();

    assert_eq!(changed, 1);
    assert!(service.find_by_name("Anne Bee").unwrap().is_none());
    assert_eq!(
        service.find_by_name("Anne Sea").unwrap(),
        Some(replacement)
    );
}

#[test]
fn update_on_shared_name_hits_unique_email() {
    let conn = empty_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    service
        .create(&UserRecord::new("Twin", "twin.a@email.com", 30))
        .unwrap();
    service
        .create(&UserRecord::new("Twin", "twin.b@email.com", 31))
        .unwrap();

    // Every matching row would receive the same email.
    let err = service
        .update("Twin", &UserRecord::new("Solo", "solo@email.com", 32))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateEmail(_)));

    let twins = service.search("Twin").unwrap();
    assert_eq!(twins.len(), 2);
    assert!(service.find_by_name("Solo").unwrap().is_none());
}

#[test]
fn update_absent_name_is_not_found_and_writes_nothing() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    let before: HashSet<UserRecord> = service.list_all().unwrap().into_iter().collect();

    let err = service
        .update("Nonexistent", &UserRecord::new("Ghost", "ghost@email.com", 1))
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound(ref name) if name == "Nonexistent"));
    let after: HashSet<UserRecord> = service.list_all().unwrap().into_iter().collect();
    assert_eq!(after, before);
}

#[test]
fn update_to_taken_email_is_duplicate() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let err = service
        .update(
            "Anne Bee",
            &UserRecord::new("Anne Bee", "cee.dee@email.com", 27),
        )
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateEmail(_)));
    assert_eq!(
        service.find_by_name("Anne Bee").unwrap().unwrap().email,
        "anne.bee@email.com"
    );
}

#[test]
fn update_rejects_invalid_replacement() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let err = service
        .update("Anne Bee", &UserRecord::new("", "x@y.com", 1))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(UserValidationError::EmptyName)
    ));
}

#[test]
fn delete_absent_name_is_noop() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    assert_eq!(service.delete("Nonexistent").unwrap(), 0);
    assert_eq!(service.list_all().unwrap().len(), SEED_USERS.len());
}

#[test]
fn delete_removes_every_row_sharing_the_name() {
    let conn = seeded_conn();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    service
        .create(&UserRecord::new("Cee Dee", "cee.two@email.com", 44))
        .unwrap();

    assert_eq!(service.delete("Cee Dee").unwrap(), 2);
    assert!(service.find_by_name("Cee Dee").unwrap().is_none());
    assert_eq!(service.list_all().unwrap().len(), SEED_USERS.len() - 1);
}

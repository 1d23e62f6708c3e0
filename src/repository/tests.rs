//! Repository Integration Tests
//!
//! Tests for the SQLite repositories with an in-memory database.

#[cfg(test)]
mod tests {
    use crate::domain::{
        Amount, BudgetEntry, BudgetSettings, DomainError, EntryType, NewEntry, PlaintextCredentials,
    };
    use crate::repository::{
        init_db, CredentialStore, EntryRepository, Repository, SettingsRepository, UserRepository,
    };
    use chrono::{TimeZone, Utc};
    use std::path::Path;

    async fn setup_test_db() -> crate::repository::DbState {
        // Use in-memory database for tests
        init_db(Path::new(":memory:")).await.expect("Failed to init test DB")
    }

    fn lunch() -> NewEntry {
        NewEntry::new(
            Amount::from_major(50),
            "Food",
            "Lunch",
            EntryType::Expense,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    fn paycheck() -> NewEntry {
        NewEntry::new(
            Amount::from_major(1000),
            "Salary",
            "Paycheck",
            EntryType::Income,
            Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_entry() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        let created = repo.create(&lunch()).await.expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.description, "Lunch");
        assert_eq!(created.amount, Amount::from_cents(5000));
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        let a = repo.create(&lunch()).await.unwrap();
        let b = repo.create(&lunch()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        let a = repo.create(&lunch()).await.unwrap();
        repo.delete(a.id).await.unwrap();
        let b = repo.create(&lunch()).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        let created = repo.create(&paycheck()).await.unwrap();
        let found = repo.find_by_id(created.id).await.expect("Find failed");

        assert_eq!(found, Some(created));
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        repo.create(&lunch()).await.unwrap();
        repo.create(&paycheck()).await.unwrap();

        let entries = repo.list().await.expect("List failed");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, "Food");
        assert_eq!(entries[1].entry_type, EntryType::Income);
    }

    #[tokio::test]
    async fn test_update_entry() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        let mut created = repo.create(&lunch()).await.unwrap();
        created.description = "Dinner".to_string();
        created.amount = Amount::from_cents(7525);

        repo.update(&created).await.expect("Update failed");
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.description, "Dinner");
        assert_eq!(found.amount, Amount::from_cents(7525));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        let ghost = BudgetEntry::from_new(42, lunch());
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());

        let created = repo.create(&lunch()).await.unwrap();
        repo.delete(created.id).await.expect("Delete failed");

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(created.id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_closed_db_reports_not_initialized() {
        let db = setup_test_db().await;
        let repo = EntryRepository::new(db.connection());
        db.close().await;

        assert_eq!(repo.list().await.unwrap_err(), DomainError::NotInitialized);
    }

    #[tokio::test]
    async fn test_unknown_type_column_is_storage_error() {
        let db = setup_test_db().await;
        {
            let guard = db.conn.lock().await;
            guard
                .as_ref()
                .unwrap()
                .execute(
                    "INSERT INTO transactions (amount, category, description, date, type) VALUES (1, 'Food', 'x', '2024-05-01T00:00:00.000Z', 'transfer')",
                    [],
                )
                .unwrap();
        }
        let repo = EntryRepository::new(db.connection());

        assert!(repo.list().await.unwrap_err().is_storage());
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(db.connection());
        let creds = PlaintextCredentials::new("ana@example.com", "secret");

        let user = repo.insert(&creds).await.unwrap();
        let found = repo.find_by_credentials(&creds).await.unwrap();
        assert_eq!(found, Some(user));

        let wrong = PlaintextCredentials::new("ana@example.com", "Secret");
        assert!(repo.find_by_credentials(&wrong).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_emails_allowed() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(db.connection());
        let creds = PlaintextCredentials::new("ana@example.com", "secret");

        let first = repo.insert(&creds).await.unwrap();
        let second = repo.insert(&creds).await.unwrap();
        assert_ne!(first.id, second.id);

        // lowest id wins
        assert_eq!(repo.find_by_credentials(&creds).await.unwrap(), Some(first.clone()));
        assert_eq!(repo.first_user().await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_first_user_empty_table() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(db.connection());
        assert!(repo.first_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_settings_default_then_saved() {
        let db = setup_test_db().await;
        let repo = SettingsRepository::new(db.connection());

        assert_eq!(repo.load().await.unwrap(), BudgetSettings::default());

        let settings = BudgetSettings::with_weekly_budget(Amount::from_major(250));
        repo.save(&settings).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), settings);

        repo.save(&BudgetSettings::default()).await.unwrap();
        assert_eq!(repo.load().await.unwrap().weekly_budget, None);
    }
}

pub mod activity;
pub mod catalog;
pub mod conversations;
pub mod lending;

use crate::error::AppError;

// Tailles des colonnes VARCHAR (voir migrations/)
pub(crate) const NAME_MAX: usize = 100;
pub(crate) const EMAIL_MAX: usize = 255;
pub(crate) const TITLE_MAX: usize = 255;
pub(crate) const CATEGORY_MAX: usize = 100;
pub(crate) const LOCATION_MAX: usize = 255;

/// Treats a missing value and a whitespace-only value alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Refuse une valeur plus longue que sa colonne, comptée en caractères comme VARCHAR
pub(crate) fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use campus_share_api::AccountKind;
    use chrono::NaiveDate;

    use crate::db::memory::MemoryStore;
    use crate::db::models::account::{Account, NewAccount};
    use crate::db::models::item::{Item, NewItem};
    use crate::db::store::Store;

    pub fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    /// Inserts an account directly, skipping password hashing.
    pub fn account(store: &MemoryStore, name: &str, email: &str, kind: AccountKind) -> Account {
        store
            .insert_account(&NewAccount::new(
                name.to_string(),
                email.to_string(),
                "not-a-real-hash".to_string(),
                kind,
            ))
            .expect("insert account")
    }

    pub fn employee(store: &MemoryStore, name: &str) -> Account {
        let email = format!("{}@campus.edu", name.to_lowercase());
        account(store, name, &email, AccountKind::Employee)
    }

    pub fn item(store: &MemoryStore, owner: &Account, title: &str) -> Item {
        store
            .insert_item(&NewItem {
                title: title.to_string(),
                description: format!("{title} in good condition"),
                category: "Electronics".to_string(),
                available_from: NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
                available_until: NaiveDate::from_ymd_opt(2025, 6, 30).expect("date"),
                location: "Library, 2nd floor".to_string(),
                owner_id: owner.id,
                owner_name: owner.name.clone(),
                owner_email: owner.email.clone(),
            })
            .expect("insert item")
    }

    #[test]
    fn non_blank_drops_whitespace_only_values() {
        assert_eq!(super::non_blank(Some("  ".to_string())), None);
        assert_eq!(super::non_blank(None), None);
        assert_eq!(
            super::non_blank(Some("Projector".to_string())),
            Some("Projector".to_string())
        );
    }
}

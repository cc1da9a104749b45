use crate::db::schema::items;
use campus_share_api::ItemResponse;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = items)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub available_from: NaiveDate,
    pub available_until: NaiveDate,
    pub location: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub available_from: NaiveDate,
    pub available_until: NaiveDate,
    pub location: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        ItemResponse {
            id: item.id,
            title: item.title,
            description: item.description,
            category: item.category,
            available_from: item.available_from,
            available_until: item.available_until,
            location: item.location,
            owner_id: item.owner_id,
            owner: item.owner_name,
            owner_email: item.owner_email,
            available: item.available,
            created_at: item.created_at,
        }
    }
}

/// Owner-editable item fields. `available` and ownership are deliberately
/// absent: availability only moves with the request lifecycle.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = items)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_until: Option<NaiveDate>,
    pub location: Option<String>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.available_from.is_none()
            && self.available_until.is_none()
            && self.location.is_none()
    }

    /// Applies the set fields onto an in-memory item.
    #[cfg(test)]
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(category) = &self.category {
            item.category.clone_from(category);
        }
        if let Some(from) = self.available_from {
            item.available_from = from;
        }
        if let Some(until) = self.available_until {
            item.available_until = until;
        }
        if let Some(location) = &self.location {
            item.location.clone_from(location);
        }
    }
}

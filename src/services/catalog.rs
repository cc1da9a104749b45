use std::sync::Arc;

use campus_share_api::{CreateItemRequest, ItemResponse, UpdateItemRequest};
use uuid::Uuid;

use super::{CATEGORY_MAX, LOCATION_MAX, TITLE_MAX, check_length, non_blank};
use crate::db::models::item::{ItemChanges, NewItem};
use crate::db::store::Store;
use crate::error::AppError;

const ITEM_NOT_FOUND_OR_UNAUTHORIZED: &str = "Item not found or unauthorized";

/// Annonces d'objets et contrôle de propriété.
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn list_items(&self) -> Result<Vec<ItemResponse>, AppError> {
        Ok(self
            .store
            .list_items()?
            .into_iter()
            .map(ItemResponse::from)
            .collect())
    }

    pub fn list_owned_items(&self, account_id: Uuid) -> Result<Vec<ItemResponse>, AppError> {
        Ok(self
            .store
            .list_items_by_owner(account_id)?
            .into_iter()
            .map(ItemResponse::from)
            .collect())
    }

    pub fn create_item(
        &self,
        account_id: Uuid,
        request: CreateItemRequest,
    ) -> Result<ItemResponse, AppError> {
        let (
            Some(title),
            Some(description),
            Some(category),
            Some(available_from),
            Some(available_until),
            Some(location),
        ) = (
            non_blank(request.title),
            non_blank(request.description),
            non_blank(request.category),
            request.available_from,
            request.available_until,
            non_blank(request.location),
        )
        else {
            return Err(AppError::validation("All fields are required"));
        };
        Self::check_lengths(Some(&title), Some(&category), Some(&location))?;

        let owner = self
            .store
            .find_account(account_id)?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let item = self.store.insert_item(&NewItem {
            title,
            description,
            category,
            available_from,
            available_until,
            location,
            owner_id: owner.id,
            owner_name: owner.name,
            owner_email: owner.email,
        })?;

        tracing::info!(item_id = %item.id, owner_id = %account_id, "Item listed");
        Ok(item.into())
    }

    /// Seuls les champs modifiables du corps sont appliqués
    pub fn update_item(
        &self,
        account_id: Uuid,
        item_id: Uuid,
        request: UpdateItemRequest,
    ) -> Result<ItemResponse, AppError> {
        let changes = ItemChanges {
            title: non_blank(request.title),
            description: non_blank(request.description),
            category: non_blank(request.category),
            available_from: request.available_from,
            available_until: request.available_until,
            location: non_blank(request.location),
        };
        Self::check_lengths(
            changes.title.as_deref(),
            changes.category.as_deref(),
            changes.location.as_deref(),
        )?;

        self.store
            .update_owned_item(item_id, account_id, &changes)?
            .map(ItemResponse::from)
            .ok_or_else(|| AppError::not_found_or_unauthorized(ITEM_NOT_FOUND_OR_UNAUTHORIZED))
    }

    /// Les demandes qui référencent l'objet sont conservées
    pub fn delete_item(&self, account_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_owned_item(item_id, account_id)? {
            return Err(AppError::not_found_or_unauthorized(
                ITEM_NOT_FOUND_OR_UNAUTHORIZED,
            ));
        }
        tracing::info!(%item_id, owner_id = %account_id, "Item deleted");
        Ok(())
    }

    fn check_lengths(
        title: Option<&str>,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Result<(), AppError> {
        check_length("title", title, TITLE_MAX)?;
        check_length("category", category, CATEGORY_MAX)?;
        check_length("location", location, LOCATION_MAX)
    }
}

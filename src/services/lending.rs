use std::sync::Arc;

use campus_share_api::{
    BorrowRequestResponse, IncomingRequestResponse, OutgoingRequestResponse, RequestListResponse,
    RequestStatus,
};
use uuid::Uuid;

use crate::db::models::borrow_request::NewBorrowRequest;
use crate::db::store::{StatusChange, Store};
use crate::error::AppError;

/// Cycle de vie des demandes d'emprunt et disponibilité des objets.
pub struct LendingService {
    store: Arc<dyn Store>,
}

impl LendingService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn create_request(
        &self,
        borrower_id: Uuid,
        item_id: Uuid,
    ) -> Result<BorrowRequestResponse, AppError> {
        let item = self
            .store
            .find_item(item_id)?
            .ok_or_else(|| AppError::not_found("Item not found"))?;

        if !item.available {
            return Err(AppError::NotAvailable);
        }
        if item.owner_id == borrower_id {
            return Err(AppError::SelfBorrow);
        }

        let borrower = self
            .store
            .find_account(borrower_id)?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        // Le propriétaire a pu changer de nom depuis la mise en ligne
        let (owner_name, owner_email) = match self.store.find_account(item.owner_id)? {
            Some(owner) => (owner.name, owner.email),
            None => (item.owner_name, item.owner_email),
        };

        let request = self.store.insert_request(&NewBorrowRequest {
            item_id: item.id,
            item_name: item.title,
            borrower_id: borrower.id,
            borrower_name: borrower.name,
            borrower_email: borrower.email,
            owner_id: item.owner_id,
            owner_name,
            owner_email,
            status: RequestStatus::Pending.as_str().to_string(),
        })?;

        tracing::info!(request_id = %request.id, %item_id, %borrower_id, "Borrow request created");
        Ok(BorrowRequestResponse::try_from(request)?)
    }

    pub fn list_requests(&self, account_id: Uuid) -> Result<RequestListResponse, AppError> {
        let outgoing = self
            .store
            .list_requests_by_borrower(account_id)?
            .into_iter()
            .map(OutgoingRequestResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let incoming = self
            .store
            .list_requests_by_owner(account_id)?
            .into_iter()
            .map(IncomingRequestResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RequestListResponse { outgoing, incoming })
    }

    /// Décision du propriétaire. Le statut et la disponibilité de l'objet
    /// sont écrits dans une seule transaction.
    pub fn update_request_status(
        &self,
        owner_id: Uuid,
        request_id: Uuid,
        status: Option<&str>,
    ) -> Result<BorrowRequestResponse, AppError> {
        let next = status
            .and_then(|s| s.parse::<RequestStatus>().ok())
            .filter(|s| *s != RequestStatus::Pending)
            .ok_or_else(|| AppError::invalid_status("Invalid status"))?;

        match self.store.transition_request(request_id, owner_id, next)? {
            StatusChange::Applied(request) => {
                tracing::info!(%request_id, status = %next, "Borrow request updated");
                Ok(BorrowRequestResponse::try_from(request)?)
            }
            StatusChange::NotFound => Err(AppError::not_found_or_unauthorized(
                "Request not found or unauthorized",
            )),
            StatusChange::Refused(current) if current.is_terminal() || current == next => Err(
                AppError::invalid_status(format!("Request is already {current}")),
            ),
            StatusChange::Refused(current) => Err(AppError::invalid_status(format!(
                "Cannot move a {current} request to {next}"
            ))),
            StatusChange::ItemUnavailable => Err(AppError::NotAvailable),
        }
    }
}

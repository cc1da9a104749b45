use crate::db::schema::borrow_requests;
use campus_share_api::{
    BorrowRequestResponse, IncomingRequestResponse, OutgoingRequestResponse, ParseEnumError,
    RequestStatus,
};
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = borrow_requests)]
pub struct NewBorrowRequest {
    pub item_id: Uuid,
    pub item_name: String,
    pub borrower_id: Uuid,
    pub borrower_name: String,
    pub borrower_email: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub status: String,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = borrow_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BorrowRequest {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub borrower_id: Uuid,
    pub borrower_name: String,
    pub borrower_email: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl BorrowRequest {
    pub fn status(&self) -> Result<RequestStatus, ParseEnumError> {
        self.status.parse()
    }
}

impl TryFrom<BorrowRequest> for BorrowRequestResponse {
    type Error = ParseEnumError;

    fn try_from(request: BorrowRequest) -> Result<Self, Self::Error> {
        Ok(BorrowRequestResponse {
            status: request.status()?,
            id: request.id,
            item_id: request.item_id,
            item_name: request.item_name,
        })
    }
}

impl TryFrom<BorrowRequest> for OutgoingRequestResponse {
    type Error = ParseEnumError;

    fn try_from(request: BorrowRequest) -> Result<Self, Self::Error> {
        Ok(OutgoingRequestResponse {
            status: request.status()?,
            id: request.id,
            item_id: request.item_id,
            item_name: request.item_name,
            owner: request.owner_name,
            owner_email: request.owner_email,
            owner_id: request.owner_id,
            created_at: request.created_at,
        })
    }
}

impl TryFrom<BorrowRequest> for IncomingRequestResponse {
    type Error = ParseEnumError;

    fn try_from(request: BorrowRequest) -> Result<Self, Self::Error> {
        Ok(IncomingRequestResponse {
            status: request.status()?,
            id: request.id,
            item_id: request.item_id,
            item_name: request.item_name,
            borrower: request.borrower_name,
            borrower_email: request.borrower_email,
            borrower_id: request.borrower_id,
            created_at: request.created_at,
        })
    }
}

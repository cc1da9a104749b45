use crate::db::error::RepositoryError;
use crate::db::models::borrow_request::{BorrowRequest, NewBorrowRequest};
use crate::db::schema::borrow_requests;
use campus_share_api::RequestStatus;
use diesel::prelude::*;
use uuid::Uuid;

pub struct RequestRepository;

impl RequestRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_request: &NewBorrowRequest,
    ) -> Result<BorrowRequest, RepositoryError> {
        diesel::insert_into(borrow_requests::table)
            .values(new_request)
            .returning(BorrowRequest::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn list_by_borrower(
        conn: &mut PgConnection,
        borrower_id: Uuid,
    ) -> Result<Vec<BorrowRequest>, RepositoryError> {
        borrow_requests::table
            .filter(borrow_requests::borrower_id.eq(borrower_id))
            .order(borrow_requests::created_at.desc())
            .select(BorrowRequest::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    pub fn list_by_owner(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<Vec<BorrowRequest>, RepositoryError> {
        borrow_requests::table
            .filter(borrow_requests::owner_id.eq(owner_id))
            .order(borrow_requests::created_at.desc())
            .select(BorrowRequest::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    /// Verrouille la demande (`FOR UPDATE`) le temps de la transaction
    pub fn lock_owned(
        conn: &mut PgConnection,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<BorrowRequest>, RepositoryError> {
        borrow_requests::table
            .filter(borrow_requests::id.eq(id))
            .filter(borrow_requests::owner_id.eq(owner_id))
            .select(BorrowRequest::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn set_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<BorrowRequest, RepositoryError> {
        diesel::update(borrow_requests::table.filter(borrow_requests::id.eq(id)))
            .set(borrow_requests::status.eq(status.as_str()))
            .returning(BorrowRequest::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn count_by_status(
        conn: &mut PgConnection,
        status: RequestStatus,
    ) -> Result<i64, RepositoryError> {
        borrow_requests::table
            .filter(borrow_requests::status.eq(status.as_str()))
            .count()
            .get_result(conn)
            .map_err(Into::into)
    }
}

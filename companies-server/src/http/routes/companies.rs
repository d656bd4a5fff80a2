//! Company endpoints
//!
//! | Method | Path                | Success |
//! |--------|---------------------|---------|
//! | GET    | `/companies/`       | 200     |
//! | POST   | `/company/`         | 201     |
//! | GET    | `/company/{id}`     | 200     |
//! | PATCH  | `/company/{id}`     | 200     |
//! | DELETE | `/company/{tax_id}` | 200     |
//!
//! Tax ids may contain `/`, so the single-company routes capture the rest
//! of the path.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{Company, CompanyRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{
    CompanyPatch, CreateCompanyRequest, ListParams, ListQuery, NewCompany, SortDir, TaxId,
    UpdateCompanyRequest,
};

/// Company response
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub tax_id: String,
    pub legal_name: String,
    pub trade_name: String,
    pub activity_code: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            tax_id: c.tax_id,
            legal_name: c.legal_name,
            trade_name: c.trade_name,
            activity_code: c.activity_code,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Page of companies plus the effective query
#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyResponse>,
    /// Rows in this page
    pub count: usize,
    pub start: u32,
    /// `null` when the page was unbounded
    pub limit: Option<u32>,
    pub sort: &'static str,
    pub dir: SortDir,
}

/// Success message, with the id of the created company on POST
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl MessageResponse {
    fn new(message: &'static str) -> Self {
        Self { message, id: None }
    }
}

/// GET /companies/ - list companies with paging and sorting
async fn list_companies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let query = ListQuery::try_from(params)?;
    let companies = CompanyRepo::new(&state.pool).list(query).await?;

    Ok(Json(CompanyListResponse {
        count: companies.len(),
        companies: companies.into_iter().map(CompanyResponse::from).collect(),
        start: query.offset,
        limit: query.limit,
        sort: query.sort.as_str(),
        dir: query.dir,
    }))
}

/// POST /company/ - register a company
async fn create_company(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = payload?;
    let company = NewCompany::from_request(&req)?;
    let created = CompanyRepo::new(&state.pool).create(&company).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "company created",
            id: Some(created.id),
        }),
    ))
}

/// GET /company/{id} - get a single company
async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CompanyResponse>, ApiError> {
    // A malformed id can't match any row
    let uuid = Uuid::parse_str(&id).map_err(|_| ApiError::company_not_found(&id))?;

    let company = CompanyRepo::new(&state.pool)
        .find_by_id(uuid)
        .await?
        .ok_or_else(|| ApiError::company_not_found(&id))?;

    Ok(Json(CompanyResponse::from(company)))
}

/// PATCH /company/{id} - update trade name and/or activity code
async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCompanyRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let patch = CompanyPatch::from_request(&req)?;
    let uuid = Uuid::parse_str(&id).map_err(|_| ApiError::company_not_found(&id))?;

    let rows = CompanyRepo::new(&state.pool).update(uuid, &patch).await?;
    if rows == 0 {
        return Err(ApiError::company_not_found(&id));
    }

    Ok(Json(MessageResponse::new("company updated")))
}

/// DELETE /company/{tax_id} - remove the company with this tax id
async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(tax_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let tax_id = TaxId::new(&tax_id)?;

    let rows = CompanyRepo::new(&state.pool).delete_by_tax_id(&tax_id).await?;
    if rows == 0 {
        return Err(ApiError::company_not_found(tax_id.as_str()));
    }

    Ok(Json(MessageResponse::new("company deleted")))
}

/// Company routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies/", get(list_companies))
        .route("/company/", post(create_company))
        .route(
            "/company/{*key}",
            get(get_company).patch(update_company).delete(delete_company),
        )
}

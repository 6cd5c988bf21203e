use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::domain::a001_bank_slip::error::BankSlipError;
use crate::domain::a001_bank_slip::service::BankSlipService;
use contracts::domain::a001_bank_slip::aggregate::{BankSlipDto, BankSlipResponse};

type Service = Extension<Arc<BankSlipService>>;

/// POST /rest/bankslips
pub async fn create(
    Extension(service): Service,
    payload: Result<Json<Option<BankSlipDto>>, JsonRejection>,
) -> Result<(StatusCode, Json<BankSlipResponse>), BankSlipError> {
    let dto = match payload {
        Ok(Json(Some(dto))) => dto,
        Ok(Json(None)) => return Err(BankSlipError::NotProvided),
        Err(rejection) => return Err(BankSlipError::MalformedBody(rejection.body_text())),
    };
    let created = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /rest/bankslips
pub async fn list_all(
    Extension(service): Service,
) -> Result<Json<Vec<BankSlipResponse>>, BankSlipError> {
    service.list_all().await.map(Json)
}

/// GET /rest/bankslips/:id
pub async fn get_by_id(
    Extension(service): Service,
    Path(id): Path<String>,
) -> Result<Json<BankSlipResponse>, BankSlipError> {
    service.get_by_id(&id).await.map(Json)
}

/// PUT /rest/bankslips/:id/pay
pub async fn pay(
    Extension(service): Service,
    Path(id): Path<String>,
) -> Result<Json<BankSlipResponse>, BankSlipError> {
    service.pay(&id).await.map(Json)
}

/// DELETE /rest/bankslips/:id/cancel
pub async fn cancel(
    Extension(service): Service,
    Path(id): Path<String>,
) -> Result<Json<BankSlipResponse>, BankSlipError> {
    service.cancel(&id).await.map(Json)
}

//! Time-based aggregation endpoints.

use super::client::{ApiClient, ApiError, QueryParams};
use super::models::Record;

pub async fn linea_mensual(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/temporal/linea-mensual", params).await
}

/// Yearly totals; filtered by category only, never by year.
pub async fn linea_anual(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/temporal/linea-anual", params).await
}

pub async fn por_dia_semana(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/temporal/por-dia-semana", params).await
}

pub async fn tendencia_semanal(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/temporal/tendencia-semanal", params).await
}

pub async fn comparativa_anual(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/temporal/comparativa-anual", params).await
}

pub async fn por_modalidad(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/temporal/por-modalidad", params).await
}

pub async fn por_zona(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/temporal/por-zona", params).await
}

pub async fn anios_disponibles(client: &ApiClient) -> Result<Vec<i32>, ApiError> {
    client.get("/temporal/anios-disponibles", &QueryParams::default()).await
}

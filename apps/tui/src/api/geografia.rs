//! Municipality-level geography endpoints. The map endpoints return GeoJSON
//! with aggregated totals in the feature properties.

use super::client::{ApiClient, ApiError, QueryParams};
use super::models::{GeoCollection, Record};

pub async fn delitos_por_municipio(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<GeoCollection, ApiError> {
    client.get("/geografia/delitos-por-municipio", params).await
}

pub async fn tasa_por_municipio(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<GeoCollection, ApiError> {
    client.get("/geografia/tasa-por-municipio", params).await
}

/// Municipality list without geometry.
pub async fn municipios(client: &ApiClient) -> Result<Vec<Record>, ApiError> {
    client.get("/geografia/municipios", &QueryParams::default()).await
}

pub async fn categorias_delito(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/geografia/categorias-delito", &QueryParams::default()).await
}

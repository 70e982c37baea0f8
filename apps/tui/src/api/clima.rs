//! Climate correlation endpoints, joining precipitation records with crime
//! aggregates.

use super::client::{ApiClient, ApiError, QueryParams};
use super::models::{Correlacion, LineaSuperpuesta, Record, ResumenPrecipitacion};

pub async fn scatter_lluvia_delitos(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/clima/scatter-lluvia-delitos", params).await
}

pub async fn barras_categorias_lluvia(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/clima/barras-categorias-lluvia", params).await
}

pub async fn linea_tiempo_superpuesta(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<LineaSuperpuesta, ApiError> {
    client.get("/clima/linea-tiempo-superpuesta", params).await
}

pub async fn correlacion(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Correlacion, ApiError> {
    client.get("/clima/correlacion", params).await
}

pub async fn resumen_precipitacion(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<ResumenPrecipitacion, ApiError> {
    client.get("/clima/resumen-precipitacion", params).await
}

//! Victim-profile endpoints.

use super::client::{ApiClient, ApiError, QueryParams};
use super::models::{GeoCollection, Record};

pub async fn por_genero(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/victimas/por-genero", params).await
}

pub async fn por_grupo_etario(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/victimas/por-grupo-etario", params).await
}

/// Georeferenced event points. Heavy; callers pass `limit`.
pub async fn mapa_puntos(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<GeoCollection, ApiError> {
    client.get("/victimas/mapa-puntos", params).await
}

pub async fn por_arma_medio(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/victimas/por-arma-medio", params).await
}

pub async fn por_clase_sitio(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/victimas/por-clase-sitio", params).await
}

pub async fn genero_por_delito(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/victimas/genero-por-delito", params).await
}

pub async fn grupo_etario_por_delito(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<Record>, ApiError> {
    client.get("/victimas/grupo-etario-por-delito", params).await
}

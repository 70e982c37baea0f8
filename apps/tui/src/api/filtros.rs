//! Filter catalog endpoints. `resumen` bundles everything the selectors need
//! in one call; the per-field variants exist for cheaper refreshes.

use super::client::{ApiClient, ApiError, QueryParams};
use super::models::{FiltroResumen, RangoFechas};

pub async fn resumen(client: &ApiClient) -> Result<FiltroResumen, ApiError> {
    client.get("/filtros/resumen", &QueryParams::default()).await
}

pub async fn municipios(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/filtros/municipios", &QueryParams::default()).await
}

pub async fn categorias_delito(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/filtros/categorias-delito", &QueryParams::default()).await
}

pub async fn generos(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/filtros/generos", &QueryParams::default()).await
}

pub async fn grupos_etarios(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/filtros/grupos-etarios", &QueryParams::default()).await
}

pub async fn zonas(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/filtros/zonas", &QueryParams::default()).await
}

pub async fn armas_medios(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/filtros/armas-medios", &QueryParams::default()).await
}

pub async fn modalidades(client: &ApiClient) -> Result<Vec<String>, ApiError> {
    client.get("/filtros/modalidades", &QueryParams::default()).await
}

pub async fn anios(client: &ApiClient) -> Result<Vec<i32>, ApiError> {
    client.get("/filtros/anios", &QueryParams::default()).await
}

pub async fn rango_fechas(client: &ApiClient) -> Result<RangoFechas, ApiError> {
    client.get("/filtros/rango-fechas", &QueryParams::default()).await
}

//! Machine-learning prediction endpoints.

use super::client::{ApiClient, ApiError, QueryParams};
use super::models::{Alertas, ComparativaMunicipio, ResumenPredicciones, SerieMunicipio};

/// Monthly series (history plus predictions) for one municipality.
pub async fn municipio(
    client: &ApiClient,
    municipio: &str,
    params: &QueryParams,
) -> Result<SerieMunicipio, ApiError> {
    client
        .get(&format!("/predicciones/municipio/{municipio}"), params)
        .await
}

pub async fn resumen(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<ResumenPredicciones, ApiError> {
    client.get("/predicciones/resumen", params).await
}

pub async fn comparativa(
    client: &ApiClient,
    municipio: &str,
) -> Result<ComparativaMunicipio, ApiError> {
    client
        .get(
            &format!("/predicciones/comparativa/{municipio}"),
            &QueryParams::default(),
        )
        .await
}

pub async fn alertas(client: &ApiClient, params: &QueryParams) -> Result<Alertas, ApiError> {
    client.get("/predicciones/alertas", params).await
}

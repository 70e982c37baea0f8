//! Natural-language query endpoints.

use serde::Serialize;

use super::client::{ApiClient, ApiError, QueryParams};
use super::models::{Capacidades, ChatRespuesta, Estadisticas, Sugerencias};

#[derive(Debug, Serialize)]
struct Consulta<'a> {
    pregunta: &'a str,
    contexto: &'a str,
}

pub async fn consultar(
    client: &ApiClient,
    pregunta: &str,
    contexto: &str,
) -> Result<ChatRespuesta, ApiError> {
    client
        .post_json("/chatbot/consultar", &Consulta { pregunta, contexto })
        .await
}

pub async fn sugerencias(client: &ApiClient) -> Result<Sugerencias, ApiError> {
    client.get("/chatbot/sugerencias", &QueryParams::default()).await
}

pub async fn capacidades(client: &ApiClient) -> Result<Capacidades, ApiError> {
    client.get("/chatbot/capacidades", &QueryParams::default()).await
}

pub async fn estadisticas(client: &ApiClient) -> Result<Estadisticas, ApiError> {
    client.get("/chatbot/estadisticas", &QueryParams::default()).await
}

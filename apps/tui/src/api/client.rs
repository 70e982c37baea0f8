use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no se pudo contactar el API en {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} respondió HTTP {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },
    #[error("respuesta inválida de {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Query parameters shared by every data endpoint. Unset fields are not sent
/// at all, so a default value means "no filter".
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub anio: Option<i32>,
    pub mes: Option<u32>,
    pub categoria_delito: Option<String>,
    pub municipio: Option<String>,
    pub umbral_aumento: Option<f64>,
    pub limit: Option<u32>,
    pub agrupacion: Option<String>,
}

impl QueryParams {
    pub fn year(anio: i32) -> Self {
        Self {
            anio: Some(anio),
            ..Self::default()
        }
    }

    /// Blank categories coming from the "all" selector are treated as unset.
    pub fn with_categoria(mut self, categoria: Option<&str>) -> Self {
        self.categoria_delito = categoria
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToOwned::to_owned);
        self
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(anio) = self.anio {
            pairs.push(("anio", anio.to_string()));
        }
        if let Some(mes) = self.mes {
            pairs.push(("mes", mes.to_string()));
        }
        if let Some(categoria) = &self.categoria_delito {
            pairs.push(("categoria_delito", categoria.clone()));
        }
        if let Some(municipio) = &self.municipio {
            pairs.push(("municipio", municipio.clone()));
        }
        if let Some(umbral) = self.umbral_aumento {
            pairs.push(("umbral_aumento", umbral.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(agrupacion) = &self.agrupacion {
            pairs.push(("agrupacion", agrupacion.clone()));
        }
        pairs
    }
}

/// Thin reqwest wrapper around the backend. No retries, no caching; callers
/// decide what a failure means for their chart.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .query(&params.pairs())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_owned(),
                source,
            })?;
        Self::decode(path, response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_owned(),
                source,
            })?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_owned(),
                status,
            });
        }
        response.json::<T>().await.map_err(|source| {
            if source.is_decode() {
                ApiError::Decode {
                    path: path.to_owned(),
                    source,
                }
            } else {
                ApiError::Transport {
                    path: path.to_owned(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn default_params_serialize_to_nothing() {
        assert!(QueryParams::default().pairs().is_empty());
    }

    #[test]
    fn set_fields_appear_with_their_wire_names() {
        let params = QueryParams {
            anio: Some(2023),
            limit: Some(2000),
            agrupacion: Some("mensual".into()),
            ..QueryParams::default()
        };
        let pairs = params.pairs();
        assert_eq!(
            pairs,
            vec![
                ("anio", "2023".to_owned()),
                ("limit", "2000".to_owned()),
                ("agrupacion", "mensual".to_owned()),
            ]
        );
    }

    #[test]
    fn blank_categoria_is_dropped() {
        let params = QueryParams::year(2022).with_categoria(Some("  "));
        assert!(params.categoria_delito.is_none());
        let params = QueryParams::year(2022).with_categoria(Some("HURTO"));
        assert_eq!(params.categoria_delito.as_deref(), Some("HURTO"));
    }
}

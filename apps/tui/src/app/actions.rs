//! Spawns the per-page fetch batches. Every chart gets its own tokio task;
//! results come back over an unbounded channel tagged with the chart key and
//! the request generation that issued them. Superseded tasks are not
//! aborted, their outcomes are simply discarded on arrival.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{self, ApiClient, ApiError, QueryParams};
use crate::app::fetch::{ChartKey, FetchOutcome, Payload};
use crate::domain::MapView;

/// Alerts are raised for municipalities whose predicted increase exceeds
/// this percentage.
pub const UMBRAL_AUMENTO: f64 = 10.0;
/// Year the prediction summary ranks municipalities for.
pub const ANIO_RESUMEN_PREDICCIONES: i32 = 2025;
/// Cap for the georeferenced victim points fetch.
pub const LIMITE_PUNTOS: u32 = 2000;

#[derive(Debug, Clone)]
pub struct AppActions {
    client: Arc<ApiClient>,
    tx: UnboundedSender<FetchOutcome>,
}

impl AppActions {
    pub fn new(client: ApiClient) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                client: Arc::new(client),
                tx,
            },
            rx,
        )
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    fn spawn<F>(&self, generation: u64, key: ChartKey, fut: F)
    where
        F: Future<Output = Result<Payload, ApiError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fut.await;
            // The receiver only closes on shutdown; a failed send is fine.
            let _ = tx.send(FetchOutcome {
                generation,
                key,
                result,
            });
        });
    }

    fn spawn_filtros(&self, generation: u64, key: ChartKey) {
        let client = Arc::clone(&self.client);
        self.spawn(generation, key, async move {
            api::filtros::resumen(&client).await.map(Payload::Filtros)
        });
    }

    pub fn fetch_dashboard_mount(&self, generation: u64) -> Vec<ChartKey> {
        self.spawn_filtros(generation, ChartKey::DashboardFiltros);
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::DashboardStats, async move {
            api::chatbot::estadisticas(&client).await.map(Payload::Estadisticas)
        });
        vec![ChartKey::DashboardFiltros, ChartKey::DashboardStats]
    }

    pub fn fetch_dashboard_charts(&self, generation: u64, anio: i32) -> Vec<ChartKey> {
        // The yearly line always covers the full range; the distributions
        // follow the selected year.
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::DashboardAnual, async move {
            api::temporal::linea_anual(&client, &QueryParams::default())
                .await
                .map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::DashboardDiaSemana, async move {
            api::temporal::por_dia_semana(&client, &QueryParams::year(anio))
                .await
                .map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::DashboardGenero, async move {
            api::victimas::por_genero(&client, &QueryParams::year(anio))
                .await
                .map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::DashboardZona, async move {
            api::temporal::por_zona(&client, &QueryParams::year(anio))
                .await
                .map(Payload::Registros)
        });
        vec![
            ChartKey::DashboardAnual,
            ChartKey::DashboardDiaSemana,
            ChartKey::DashboardGenero,
            ChartKey::DashboardZona,
        ]
    }

    pub fn fetch_geografia_mount(&self, generation: u64) -> Vec<ChartKey> {
        self.spawn_filtros(generation, ChartKey::GeografiaFiltros);
        vec![ChartKey::GeografiaFiltros]
    }

    pub fn fetch_geografia_mapa(
        &self,
        generation: u64,
        anio: i32,
        categoria: Option<String>,
        view: MapView,
    ) -> Vec<ChartKey> {
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::GeografiaMapa, async move {
            let params = QueryParams::year(anio).with_categoria(categoria.as_deref());
            let geo = match view {
                MapView::Total => api::geografia::delitos_por_municipio(&client, &params).await?,
                MapView::Tasa => api::geografia::tasa_por_municipio(&client, &params).await?,
            };
            Ok(Payload::Geo(geo))
        });
        vec![ChartKey::GeografiaMapa]
    }

    pub fn fetch_temporal_mount(&self, generation: u64) -> Vec<ChartKey> {
        self.spawn_filtros(generation, ChartKey::TemporalFiltros);
        vec![ChartKey::TemporalFiltros]
    }

    pub fn fetch_temporal_charts(
        &self,
        generation: u64,
        anio: i32,
        categoria: Option<String>,
    ) -> Vec<ChartKey> {
        let filtered = QueryParams::year(anio).with_categoria(categoria.as_deref());

        let client = Arc::clone(&self.client);
        let params = filtered.clone();
        self.spawn(generation, ChartKey::TemporalMensual, async move {
            api::temporal::linea_mensual(&client, &params).await.map(Payload::Registros)
        });
        // Year filter does not apply to the all-years line.
        let client = Arc::clone(&self.client);
        let params = QueryParams::default().with_categoria(categoria.as_deref());
        self.spawn(generation, ChartKey::TemporalAnual, async move {
            api::temporal::linea_anual(&client, &params).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let params = filtered.clone();
        self.spawn(generation, ChartKey::TemporalDiaSemana, async move {
            api::temporal::por_dia_semana(&client, &params).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let params = filtered.clone();
        self.spawn(generation, ChartKey::TemporalSemanal, async move {
            api::temporal::tendencia_semanal(&client, &params).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let params = filtered;
        self.spawn(generation, ChartKey::TemporalModalidad, async move {
            api::temporal::por_modalidad(&client, &params).await.map(Payload::Registros)
        });
        vec![
            ChartKey::TemporalMensual,
            ChartKey::TemporalAnual,
            ChartKey::TemporalDiaSemana,
            ChartKey::TemporalSemanal,
            ChartKey::TemporalModalidad,
        ]
    }

    pub fn fetch_victimas_mount(&self, generation: u64) -> Vec<ChartKey> {
        self.spawn_filtros(generation, ChartKey::VictimasFiltros);
        vec![ChartKey::VictimasFiltros]
    }

    pub fn fetch_victimas_charts(
        &self,
        generation: u64,
        anio: i32,
        categoria: Option<String>,
    ) -> Vec<ChartKey> {
        let filtered = QueryParams::year(anio).with_categoria(categoria.as_deref());

        let client = Arc::clone(&self.client);
        let params = filtered.clone();
        self.spawn(generation, ChartKey::VictimasGenero, async move {
            api::victimas::por_genero(&client, &params).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let params = filtered.clone();
        self.spawn(generation, ChartKey::VictimasEtario, async move {
            api::victimas::por_grupo_etario(&client, &params).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let params = filtered.clone();
        self.spawn(generation, ChartKey::VictimasArma, async move {
            api::victimas::por_arma_medio(&client, &params).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let params = filtered.clone();
        self.spawn(generation, ChartKey::VictimasSitio, async move {
            api::victimas::por_clase_sitio(&client, &params).await.map(Payload::Registros)
        });
        // The gender-by-crime pivot covers every category for the year.
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::VictimasGeneroDelito, async move {
            api::victimas::genero_por_delito(&client, &QueryParams::year(anio))
                .await
                .map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let mut params = filtered;
        params.limit = Some(LIMITE_PUNTOS);
        self.spawn(generation, ChartKey::VictimasPuntos, async move {
            api::victimas::mapa_puntos(&client, &params).await.map(Payload::Geo)
        });
        vec![
            ChartKey::VictimasGenero,
            ChartKey::VictimasEtario,
            ChartKey::VictimasArma,
            ChartKey::VictimasSitio,
            ChartKey::VictimasGeneroDelito,
            ChartKey::VictimasPuntos,
        ]
    }

    pub fn fetch_clima_mount(&self, generation: u64) -> Vec<ChartKey> {
        self.spawn_filtros(generation, ChartKey::ClimaFiltros);
        vec![ChartKey::ClimaFiltros]
    }

    pub fn fetch_clima_charts(
        &self,
        generation: u64,
        anio: i32,
        categoria: String,
    ) -> Vec<ChartKey> {
        let params = QueryParams::year(anio).with_categoria(Some(&categoria));

        let client = Arc::clone(&self.client);
        let p = params.clone();
        self.spawn(generation, ChartKey::ClimaScatter, async move {
            api::clima::scatter_lluvia_delitos(&client, &p).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let p = params.clone();
        self.spawn(generation, ChartKey::ClimaBarras, async move {
            api::clima::barras_categorias_lluvia(&client, &p).await.map(Payload::Registros)
        });
        let client = Arc::clone(&self.client);
        let mut p = params.clone();
        p.agrupacion = Some("mensual".to_owned());
        self.spawn(generation, ChartKey::ClimaLinea, async move {
            api::clima::linea_tiempo_superpuesta(&client, &p)
                .await
                .map(|linea| Payload::Registros(linea.data))
        });
        let client = Arc::clone(&self.client);
        let p = params;
        self.spawn(generation, ChartKey::ClimaCorrelacion, async move {
            api::clima::correlacion(&client, &p).await.map(Payload::Correlacion)
        });
        // Precipitation summary is weather-only; the category does not apply.
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::ClimaPrecipitacion, async move {
            api::clima::resumen_precipitacion(&client, &QueryParams::year(anio))
                .await
                .map(Payload::Precipitacion)
        });
        vec![
            ChartKey::ClimaScatter,
            ChartKey::ClimaBarras,
            ChartKey::ClimaLinea,
            ChartKey::ClimaCorrelacion,
            ChartKey::ClimaPrecipitacion,
        ]
    }

    pub fn fetch_chat_mount(&self, generation: u64) -> Vec<ChartKey> {
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::ChatSugerencias, async move {
            api::chatbot::sugerencias(&client)
                .await
                .map(|s| Payload::Sugerencias(s.sugerencias))
        });
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::ChatCapacidades, async move {
            api::chatbot::capacidades(&client)
                .await
                .map(|c| Payload::Capacidades(c.categorias))
        });
        vec![ChartKey::ChatSugerencias, ChartKey::ChatCapacidades]
    }

    pub fn send_chat(&self, generation: u64, pregunta: String) {
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::ChatRespuesta, async move {
            api::chatbot::consultar(&client, &pregunta, "").await.map(Payload::Chat)
        });
    }

    pub fn fetch_predicciones_mount(&self, generation: u64) -> Vec<ChartKey> {
        self.spawn_filtros(generation, ChartKey::PrediccionesFiltros);
        vec![ChartKey::PrediccionesFiltros]
    }

    pub fn fetch_predicciones_charts(
        &self,
        generation: u64,
        municipio: String,
        categoria: Option<String>,
    ) -> Vec<ChartKey> {
        let client = Arc::clone(&self.client);
        let town = municipio.clone();
        let params = QueryParams::default().with_categoria(categoria.as_deref());
        self.spawn(generation, ChartKey::PrediccionesSerie, async move {
            api::predicciones::municipio(&client, &town, &params)
                .await
                .map(|serie| Payload::Serie(serie.datos))
        });
        let client = Arc::clone(&self.client);
        let town = municipio;
        self.spawn(generation, ChartKey::PrediccionesComparativa, async move {
            api::predicciones::comparativa(&client, &town)
                .await
                .map(|c| Payload::Comparativa(c.comparativa))
        });
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::PrediccionesAlertas, async move {
            let params = QueryParams {
                umbral_aumento: Some(UMBRAL_AUMENTO),
                ..QueryParams::default()
            };
            api::predicciones::alertas(&client, &params)
                .await
                .map(|a| Payload::Alertas(a.alertas))
        });
        let client = Arc::clone(&self.client);
        self.spawn(generation, ChartKey::PrediccionesResumen, async move {
            api::predicciones::resumen(&client, &QueryParams::year(ANIO_RESUMEN_PREDICCIONES))
                .await
                .map(|r| Payload::Predicciones(r.predicciones))
        });
        vec![
            ChartKey::PrediccionesSerie,
            ChartKey::PrediccionesComparativa,
            ChartKey::PrediccionesAlertas,
            ChartKey::PrediccionesResumen,
        ]
    }
}

//! Identifiers and payloads for in-flight fetches. Every spawned request is
//! tagged with the chart it feeds and the request generation that issued it,
//! so results can be applied per chart and stale generations can be dropped.

use std::collections::BTreeMap;

use crate::api::models::{
    Alerta, Capacidad, ChatRespuesta, ComparativaMes, Correlacion, Estadisticas, FiltroResumen,
    GeoCollection, PrediccionMunicipio, PuntoSerie, Record, ResumenPrecipitacion,
};
use crate::api::ApiError;

/// One key per independently loading chart or panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKey {
    DashboardFiltros,
    DashboardStats,
    DashboardAnual,
    DashboardDiaSemana,
    DashboardGenero,
    DashboardZona,
    GeografiaFiltros,
    GeografiaMapa,
    TemporalFiltros,
    TemporalMensual,
    TemporalAnual,
    TemporalDiaSemana,
    TemporalSemanal,
    TemporalModalidad,
    VictimasFiltros,
    VictimasGenero,
    VictimasEtario,
    VictimasArma,
    VictimasSitio,
    VictimasGeneroDelito,
    VictimasPuntos,
    ClimaFiltros,
    ClimaScatter,
    ClimaBarras,
    ClimaLinea,
    ClimaCorrelacion,
    ClimaPrecipitacion,
    ChatSugerencias,
    ChatCapacidades,
    /// Chat replies bypass the generation check; a reply always lands in the
    /// transcript.
    ChatRespuesta,
    PrediccionesFiltros,
    PrediccionesSerie,
    PrediccionesComparativa,
    PrediccionesAlertas,
    PrediccionesResumen,
}

#[derive(Debug)]
pub enum Payload {
    Registros(Vec<Record>),
    Geo(GeoCollection),
    Filtros(FiltroResumen),
    Estadisticas(Estadisticas),
    Correlacion(Correlacion),
    Precipitacion(ResumenPrecipitacion),
    Serie(Vec<PuntoSerie>),
    Comparativa(Vec<ComparativaMes>),
    Alertas(Vec<Alerta>),
    Predicciones(Vec<PrediccionMunicipio>),
    Sugerencias(Vec<String>),
    Capacidades(BTreeMap<String, Capacidad>),
    Chat(ChatRespuesta),
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub key: ChartKey,
    pub result: Result<Payload, ApiError>,
}

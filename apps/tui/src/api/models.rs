use std::collections::BTreeMap;

use serde::Deserialize;

/// A chart row as the backend returns it: a JSON object with endpoint-specific
/// named fields. Widgets read the fields they were configured with and skip
/// rows that miss them; there is no client-side schema validation.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Available filter values, fetched once per page from `filtros/resumen`.
/// `anios` arrives most recent first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiltroResumen {
    #[serde(default)]
    pub municipios: Vec<String>,
    #[serde(default)]
    pub categorias_delito: Vec<String>,
    #[serde(default)]
    pub generos: Vec<String>,
    #[serde(default)]
    pub grupos_etarios: Vec<String>,
    #[serde(default)]
    pub zonas: Vec<String>,
    #[serde(default)]
    pub armas_medios: Vec<String>,
    #[serde(default)]
    pub modalidades: Vec<String>,
    #[serde(default)]
    pub anios: Vec<i32>,
    #[serde(default)]
    pub rango_fechas: Option<RangoFechas>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangoFechas {
    pub minima: Option<String>,
    pub maxima: Option<String>,
}

/// General dataset figures from `chatbot/estadisticas`, shown as stat cards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Estadisticas {
    pub total_eventos: Option<i64>,
    pub municipios_cubiertos: Option<i64>,
    #[serde(default)]
    pub categorias_disponibles: Vec<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

/// GeoJSON FeatureCollection. Geometry stays raw JSON; the canvas renderers
/// walk it without an intermediate geometry model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoCollection {
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoFeature {
    #[serde(default)]
    pub properties: Record,
    #[serde(default)]
    pub geometry: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Correlacion {
    pub correlacion_pearson: Option<f64>,
    pub interpretacion: Option<String>,
    pub n_observaciones: Option<i64>,
    pub mensaje: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumenPrecipitacion {
    pub dias_con_registro: Option<i64>,
    pub dias_secos: Option<i64>,
    pub dias_con_lluvia: Option<i64>,
    pub precipitacion_promedio_mm: Option<f64>,
    pub precipitacion_maxima_mm: Option<f64>,
}

/// `clima/linea-superpuesta` wraps its rows in a `data` field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineaSuperpuesta {
    #[serde(default)]
    pub data: Vec<Record>,
}

/// Monthly series for one municipality, historical and predicted points mixed
/// and flagged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerieMunicipio {
    pub municipio: Option<String>,
    #[serde(default)]
    pub datos: Vec<PuntoSerie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuntoSerie {
    pub anio: i32,
    pub mes: u32,
    pub total_delitos: f64,
    #[serde(default)]
    pub es_prediccion: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparativaMunicipio {
    pub municipio: Option<String>,
    #[serde(default)]
    pub comparativa: Vec<ComparativaMes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparativaMes {
    pub anio: i32,
    pub mes: u32,
    pub prediccion: f64,
    pub promedio_historico_mes: f64,
    pub tendencia: Option<String>,
    pub porcentaje_cambio: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alertas {
    #[serde(default)]
    pub alertas: Vec<Alerta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alerta {
    pub municipio: String,
    pub nivel_alerta: Option<String>,
    pub prediccion: Option<f64>,
    pub porcentaje_aumento: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumenPredicciones {
    pub anio: Option<i32>,
    #[serde(default)]
    pub predicciones: Vec<PrediccionMunicipio>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrediccionMunicipio {
    pub municipio: String,
    pub prediccion_delitos: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRespuesta {
    pub respuesta: Option<String>,
    pub tipo_consulta: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sugerencias {
    #[serde(default)]
    pub sugerencias: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Capacidades {
    #[serde(default)]
    pub categorias: BTreeMap<String, Capacidad>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Capacidad {
    pub descripcion: Option<String>,
    #[serde(default)]
    pub ejemplos: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{Alertas, Capacidades, FiltroResumen, GeoCollection, SerieMunicipio};

    #[test]
    fn filtro_resumen_decodes_partial_payloads() {
        let resumen: FiltroResumen = serde_json::from_str(
            r#"{
                "municipios": ["BUCARAMANGA", "FLORIDABLANCA"],
                "categorias_delito": ["HURTO", ""],
                "anios": [2023, 2022, 2021],
                "rango_fechas": {"minima": "2010-01-01", "maxima": "2023-12-31"}
            }"#,
        )
        .unwrap();

        assert_eq!(resumen.municipios.len(), 2);
        assert_eq!(resumen.anios, vec![2023, 2022, 2021]);
        assert!(resumen.generos.is_empty());
        let rango = resumen.rango_fechas.unwrap();
        assert_eq!(rango.minima.as_deref(), Some("2010-01-01"));
    }

    #[test]
    fn geo_collection_keeps_geometry_raw() {
        let geo: GeoCollection = serde_json::from_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"nombre_municipio": "GIRON", "total_delitos": 42},
                    "geometry": {"type": "Point", "coordinates": [-73.1, 7.07]}
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(geo.features.len(), 1);
        let feature = &geo.features[0];
        assert_eq!(
            feature.properties.get("nombre_municipio").and_then(|v| v.as_str()),
            Some("GIRON")
        );
        assert_eq!(feature.geometry["coordinates"][1], 7.07);
    }

    #[test]
    fn serie_flags_predicted_points() {
        let serie: SerieMunicipio = serde_json::from_str(
            r#"{
                "municipio": "Bucaramanga",
                "datos": [
                    {"anio": 2024, "mes": 12, "total_delitos": 310.0},
                    {"anio": 2025, "mes": 1, "total_delitos": 295.5, "es_prediccion": true}
                ]
            }"#,
        )
        .unwrap();

        assert!(!serie.datos[0].es_prediccion);
        assert!(serie.datos[1].es_prediccion);
    }

    #[test]
    fn alertas_and_capacidades_default_to_empty() {
        let alertas: Alertas = serde_json::from_str("{}").unwrap();
        assert!(alertas.alertas.is_empty());
        let caps: Capacidades = serde_json::from_str("{}").unwrap();
        assert!(caps.categorias.is_empty());
    }
}

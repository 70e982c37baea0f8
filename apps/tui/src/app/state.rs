use std::collections::{BTreeMap, HashSet};

use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::models::{
    Alerta, Capacidad, ComparativaMes, Correlacion, Estadisticas, FiltroResumen, GeoCollection,
    PrediccionMunicipio, PuntoSerie, Record, ResumenPrecipitacion,
};
use crate::api::ApiClient;
use crate::app::actions::AppActions;
use crate::app::chat::{ChatState, DEFAULT_SUGERENCIAS, FALLBACK_EMPTY, FALLBACK_ERROR};
use crate::app::fetch::{ChartKey, FetchOutcome, Payload};
use crate::domain::{clima_years, MapView, Page, TemporalTab, Theme};

/// Series charts keep at most this many trailing points.
pub const VENTANA_SERIE: usize = 60;
/// Ranking lists (weapons, sites, alerts, predicted municipalities) cap here.
pub const TOP_RANKING: usize = 10;
/// The modality distribution caps at a longer list.
pub const TOP_MODALIDADES: usize = 15;
/// Municipality preselected on the predictions page.
pub const MUNICIPIO_DEFECTO: &str = "Bucaramanga";
/// Category preselected on the climate page.
pub const CATEGORIA_CLIMA_DEFECTO: &str = "HURTO";

/// Year/category selectors shared by most pages. Index 0 can stand for
/// "all categories" on pages that allow it.
#[derive(Debug, Default)]
pub struct FilterSelection {
    pub years: Vec<i32>,
    pub categories: Vec<String>,
    pub year_index: usize,
    pub category_index: usize,
    include_all: bool,
    fixed_years: bool,
    pub loaded: bool,
}

impl FilterSelection {
    pub fn with_all_option() -> Self {
        Self {
            include_all: true,
            ..Self::default()
        }
    }

    pub fn with_fixed_years(years: Vec<i32>) -> Self {
        Self {
            years,
            fixed_years: true,
            ..Self::default()
        }
    }

    /// Loads the selector options from a filter summary. Blank categories
    /// are dropped; a preferred category is selected when present.
    pub fn apply_resumen(&mut self, resumen: &FiltroResumen, preferred: Option<&str>) {
        self.categories = resumen
            .categorias_delito
            .iter()
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .collect();
        if !self.fixed_years {
            self.years = resumen.anios.clone();
            self.year_index = 0;
        }
        self.category_index = preferred
            .and_then(|p| self.categories.iter().position(|c| c == p))
            .map_or(0, |i| if self.include_all { i + 1 } else { i });
        self.loaded = true;
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.years.get(self.year_index).copied()
    }

    /// `None` means "all categories".
    pub fn selected_category(&self) -> Option<&str> {
        if self.include_all {
            if self.category_index == 0 {
                None
            } else {
                self.categories.get(self.category_index - 1).map(String::as_str)
            }
        } else {
            self.categories.get(self.category_index).map(String::as_str)
        }
    }

    pub fn category_label(&self) -> String {
        self.selected_category()
            .map_or_else(|| "Todas".to_owned(), ToOwned::to_owned)
    }

    fn category_count(&self) -> usize {
        self.categories.len() + usize::from(self.include_all)
    }

    pub fn next_year(&mut self) -> bool {
        if self.years.is_empty() {
            return false;
        }
        self.year_index = (self.year_index + 1) % self.years.len();
        true
    }

    pub fn prev_year(&mut self) -> bool {
        if self.years.is_empty() {
            return false;
        }
        self.year_index = (self.year_index + self.years.len() - 1) % self.years.len();
        true
    }

    pub fn next_category(&mut self) -> bool {
        let count = self.category_count();
        if count == 0 {
            return false;
        }
        self.category_index = (self.category_index + 1) % count;
        true
    }

    pub fn prev_category(&mut self) -> bool {
        let count = self.category_count();
        if count == 0 {
            return false;
        }
        self.category_index = (self.category_index + count - 1) % count;
        true
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub selection: FilterSelection,
    pub stats: Option<Estadisticas>,
    pub anual: Vec<Record>,
    pub dia_semana: Vec<Record>,
    pub genero: Vec<Record>,
    pub zona: Vec<Record>,
    pub visited: bool,
}

#[derive(Debug, Default)]
pub struct GeografiaState {
    pub selection: FilterSelection,
    pub view: MapView,
    pub geo: Option<GeoCollection>,
    pub visited: bool,
}

#[derive(Debug, Default)]
pub struct TemporalState {
    pub selection: FilterSelection,
    pub tab: TemporalTab,
    pub mensual: Vec<Record>,
    pub anual: Vec<Record>,
    pub dia_semana: Vec<Record>,
    pub semanal: Vec<Record>,
    pub modalidad: Vec<Record>,
    pub visited: bool,
}

#[derive(Debug, Default)]
pub struct VictimasState {
    pub selection: FilterSelection,
    pub genero: Vec<Record>,
    pub etario: Vec<Record>,
    pub arma: Vec<Record>,
    pub sitio: Vec<Record>,
    pub genero_delito: Vec<Record>,
    pub puntos: Option<GeoCollection>,
    pub visited: bool,
}

#[derive(Debug, Default)]
pub struct ClimaState {
    pub selection: FilterSelection,
    pub scatter: Vec<Record>,
    pub barras: Vec<Record>,
    pub linea: Vec<Record>,
    pub correlacion: Option<Correlacion>,
    pub precipitacion: Option<ResumenPrecipitacion>,
    pub visited: bool,
}

impl ClimaState {
    /// Climate charts always need a concrete category.
    pub fn categoria(&self) -> String {
        self.selection
            .selected_category()
            .unwrap_or(CATEGORIA_CLIMA_DEFECTO)
            .to_owned()
    }
}

#[derive(Debug, Default)]
pub struct ChatbotState {
    pub chat: ChatState,
    pub sugerencias: Vec<String>,
    pub capacidades: BTreeMap<String, Capacidad>,
    pub visited: bool,
}

#[derive(Debug, Default)]
pub struct PrediccionesState {
    pub selection: FilterSelection,
    pub municipios: Vec<String>,
    pub municipio_index: usize,
    pub serie: Vec<PuntoSerie>,
    pub comparativa: Vec<ComparativaMes>,
    pub alertas: Vec<Alerta>,
    pub resumen: Vec<PrediccionMunicipio>,
    pub visited: bool,
}

impl PrediccionesState {
    pub fn municipio(&self) -> String {
        self.municipios
            .get(self.municipio_index)
            .cloned()
            .unwrap_or_else(|| MUNICIPIO_DEFECTO.to_owned())
    }

    pub fn next_municipio(&mut self) -> bool {
        if self.municipios.is_empty() {
            return false;
        }
        self.municipio_index = (self.municipio_index + 1) % self.municipios.len();
        true
    }

    pub fn prev_municipio(&mut self) -> bool {
        if self.municipios.is_empty() {
            return false;
        }
        self.municipio_index =
            (self.municipio_index + self.municipios.len() - 1) % self.municipios.len();
        true
    }
}

/// Central application state. One request generation at a time is current;
/// outcomes from older generations are dropped on arrival.
pub struct App {
    pub running: bool,
    pub page: Page,
    pub theme: Theme,
    pub show_help: bool,
    pub status_message: String,
    pub debug: bool,
    pub generation: u64,
    pub pending: HashSet<ChartKey>,
    pub throbber: ThrobberState,
    pub actions: AppActions,
    pub rx: UnboundedReceiver<FetchOutcome>,
    pub dashboard: DashboardState,
    pub geografia: GeografiaState,
    pub temporal: TemporalState,
    pub victimas: VictimasState,
    pub clima: ClimaState,
    pub chatbot: ChatbotState,
    pub predicciones: PrediccionesState,
}

impl App {
    pub fn new(client: ApiClient, debug: bool) -> Self {
        let (actions, rx) = AppActions::new(client);
        Self {
            running: true,
            page: Page::Dashboard,
            theme: Theme::Dark,
            show_help: false,
            status_message: "Listo".to_owned(),
            debug,
            generation: 0,
            pending: HashSet::new(),
            throbber: ThrobberState::default(),
            actions,
            rx,
            dashboard: DashboardState {
                selection: FilterSelection::with_all_option(),
                ..DashboardState::default()
            },
            geografia: GeografiaState {
                selection: FilterSelection::with_all_option(),
                ..GeografiaState::default()
            },
            temporal: TemporalState {
                selection: FilterSelection::with_all_option(),
                ..TemporalState::default()
            },
            victimas: VictimasState {
                selection: FilterSelection::with_all_option(),
                ..VictimasState::default()
            },
            clima: ClimaState {
                selection: FilterSelection::with_fixed_years(clima_years()),
                ..ClimaState::default()
            },
            chatbot: ChatbotState {
                sugerencias: DEFAULT_SUGERENCIAS.iter().map(|s| (*s).to_owned()).collect(),
                ..ChatbotState::default()
            },
            predicciones: PrediccionesState {
                selection: FilterSelection::with_all_option(),
                ..PrediccionesState::default()
            },
        }
    }

    pub fn is_loading(&self, key: ChartKey) -> bool {
        self.pending.contains(&key)
    }

    pub fn any_loading(&self) -> bool {
        !self.pending.is_empty() || self.chatbot.chat.waiting
    }

    fn bump_generation(&mut self) {
        self.generation += 1;
        self.pending.clear();
    }

    /// Switches pages and mounts the target on first visit.
    pub fn enter_page(&mut self, page: Page) {
        self.page = page;
        let first_visit = match page {
            Page::Dashboard => !std::mem::replace(&mut self.dashboard.visited, true),
            Page::Geografia => !std::mem::replace(&mut self.geografia.visited, true),
            Page::Temporal => !std::mem::replace(&mut self.temporal.visited, true),
            Page::Victimas => !std::mem::replace(&mut self.victimas.visited, true),
            Page::Clima => !std::mem::replace(&mut self.clima.visited, true),
            Page::Chatbot => !std::mem::replace(&mut self.chatbot.visited, true),
            Page::Predicciones => !std::mem::replace(&mut self.predicciones.visited, true),
        };
        if first_visit {
            self.mount_page(page);
        }
    }

    /// Reloads the current page from scratch.
    pub fn refresh_current_page(&mut self) {
        self.status_message = "Actualizando...".to_owned();
        self.mount_page(self.page);
    }

    fn mount_page(&mut self, page: Page) {
        self.bump_generation();
        let generation = self.generation;
        let keys = match page {
            Page::Dashboard => self.actions.fetch_dashboard_mount(generation),
            Page::Geografia => self.actions.fetch_geografia_mount(generation),
            Page::Temporal => self.actions.fetch_temporal_mount(generation),
            Page::Victimas => self.actions.fetch_victimas_mount(generation),
            // Climate and prediction charts have usable defaults before the
            // filters answer, so their batches fire at mount too.
            Page::Clima => {
                let mut keys = self.actions.fetch_clima_mount(generation);
                if let Some(anio) = self.clima.selection.selected_year() {
                    keys.extend(self.actions.fetch_clima_charts(
                        generation,
                        anio,
                        self.clima.categoria(),
                    ));
                }
                keys
            }
            Page::Chatbot => self.actions.fetch_chat_mount(generation),
            Page::Predicciones => {
                let mut keys = self.actions.fetch_predicciones_mount(generation);
                keys.extend(self.actions.fetch_predicciones_charts(
                    generation,
                    self.predicciones.municipio(),
                    self.predicciones
                        .selection
                        .selected_category()
                        .map(ToOwned::to_owned),
                ));
                keys
            }
        };
        self.pending.extend(keys);
    }

    /// Re-issues the current page's chart batch after a selection change.
    pub fn selection_changed(&mut self) {
        self.bump_generation();
        let generation = self.generation;
        let keys = match self.page {
            Page::Dashboard => self
                .dashboard
                .selection
                .selected_year()
                .map(|anio| self.actions.fetch_dashboard_charts(generation, anio)),
            Page::Geografia => self.geografia.selection.selected_year().map(|anio| {
                self.actions.fetch_geografia_mapa(
                    generation,
                    anio,
                    self.geografia
                        .selection
                        .selected_category()
                        .map(ToOwned::to_owned),
                    self.geografia.view,
                )
            }),
            Page::Temporal => self.temporal.selection.selected_year().map(|anio| {
                self.actions.fetch_temporal_charts(
                    generation,
                    anio,
                    self.temporal
                        .selection
                        .selected_category()
                        .map(ToOwned::to_owned),
                )
            }),
            Page::Victimas => self.victimas.selection.selected_year().map(|anio| {
                self.actions.fetch_victimas_charts(
                    generation,
                    anio,
                    self.victimas
                        .selection
                        .selected_category()
                        .map(ToOwned::to_owned),
                )
            }),
            Page::Clima => self.clima.selection.selected_year().map(|anio| {
                self.actions
                    .fetch_clima_charts(generation, anio, self.clima.categoria())
            }),
            Page::Chatbot => None,
            Page::Predicciones => Some(self.actions.fetch_predicciones_charts(
                generation,
                self.predicciones.municipio(),
                self.predicciones
                    .selection
                    .selected_category()
                    .map(ToOwned::to_owned),
            )),
        };
        if let Some(keys) = keys {
            self.pending.extend(keys);
        }
    }

    /// Submits the chat input if there is one and no consultation is
    /// already in flight.
    pub fn submit_chat(&mut self) {
        let pregunta = self.chatbot.chat.input.trim().to_owned();
        if pregunta.is_empty() || self.chatbot.chat.waiting {
            return;
        }
        self.chatbot.chat.input.clear();
        self.chatbot.chat.push_user(pregunta.clone());
        self.chatbot.chat.waiting = true;
        self.actions.send_chat(self.generation, pregunta);
    }

    pub fn submit_suggestion(&mut self, index: usize) {
        if let Some(sugerencia) = self.chatbot.sugerencias.get(index) {
            self.chatbot.chat.input = sugerencia.clone();
            self.submit_chat();
        }
    }

    /// Applies one fetch result. Chat replies always land; everything else
    /// is dropped when its generation is stale, and failures degrade only
    /// the chart they belong to.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.key == ChartKey::ChatRespuesta {
            self.apply_chat_outcome(outcome.result.map_err(|e| e.to_string()));
            return;
        }
        if outcome.generation != self.generation {
            return;
        }
        self.pending.remove(&outcome.key);
        match outcome.result {
            Ok(payload) => self.apply_payload(outcome.key, payload),
            Err(error) => {
                self.status_message = format!("Error: {error}");
                self.apply_empty(outcome.key);
            }
        }
    }

    fn apply_chat_outcome(&mut self, result: Result<Payload, String>) {
        self.chatbot.chat.waiting = false;
        match result {
            Ok(Payload::Chat(respuesta)) => {
                let text = respuesta
                    .respuesta
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_EMPTY.to_owned());
                self.chatbot.chat.push_bot(text, respuesta.tipo_consulta);
            }
            Ok(_) => {
                self.chatbot.chat.push_bot(FALLBACK_EMPTY.to_owned(), None);
            }
            Err(error) => {
                self.status_message = format!("Error: {error}");
                self.chatbot.chat.push_bot(FALLBACK_ERROR.to_owned(), None);
            }
        }
    }

    fn apply_payload(&mut self, key: ChartKey, payload: Payload) {
        let generation = self.generation;
        match (key, payload) {
            (ChartKey::DashboardFiltros, Payload::Filtros(resumen)) => {
                self.dashboard.selection.apply_resumen(&resumen, None);
                if let Some(anio) = self.dashboard.selection.selected_year() {
                    let keys = self.actions.fetch_dashboard_charts(generation, anio);
                    self.pending.extend(keys);
                }
            }
            (ChartKey::DashboardStats, Payload::Estadisticas(stats)) => {
                self.dashboard.stats = Some(stats);
            }
            (ChartKey::DashboardAnual, Payload::Registros(r)) => self.dashboard.anual = r,
            (ChartKey::DashboardDiaSemana, Payload::Registros(r)) => self.dashboard.dia_semana = r,
            (ChartKey::DashboardGenero, Payload::Registros(r)) => self.dashboard.genero = r,
            (ChartKey::DashboardZona, Payload::Registros(r)) => self.dashboard.zona = r,

            (ChartKey::GeografiaFiltros, Payload::Filtros(resumen)) => {
                self.geografia.selection.apply_resumen(&resumen, None);
                if let Some(anio) = self.geografia.selection.selected_year() {
                    let categoria = self
                        .geografia
                        .selection
                        .selected_category()
                        .map(ToOwned::to_owned);
                    let keys = self.actions.fetch_geografia_mapa(
                        generation,
                        anio,
                        categoria,
                        self.geografia.view,
                    );
                    self.pending.extend(keys);
                }
            }
            (ChartKey::GeografiaMapa, Payload::Geo(geo)) => self.geografia.geo = Some(geo),

            (ChartKey::TemporalFiltros, Payload::Filtros(resumen)) => {
                self.temporal.selection.apply_resumen(&resumen, None);
                if let Some(anio) = self.temporal.selection.selected_year() {
                    let categoria = self
                        .temporal
                        .selection
                        .selected_category()
                        .map(ToOwned::to_owned);
                    let keys = self.actions.fetch_temporal_charts(generation, anio, categoria);
                    self.pending.extend(keys);
                }
            }
            (ChartKey::TemporalMensual, Payload::Registros(r)) => self.temporal.mensual = r,
            (ChartKey::TemporalAnual, Payload::Registros(r)) => self.temporal.anual = r,
            (ChartKey::TemporalDiaSemana, Payload::Registros(r)) => self.temporal.dia_semana = r,
            (ChartKey::TemporalSemanal, Payload::Registros(r)) => self.temporal.semanal = r,
            (ChartKey::TemporalModalidad, Payload::Registros(mut r)) => {
                r.truncate(TOP_MODALIDADES);
                self.temporal.modalidad = r;
            }

            (ChartKey::VictimasFiltros, Payload::Filtros(resumen)) => {
                self.victimas.selection.apply_resumen(&resumen, None);
                if let Some(anio) = self.victimas.selection.selected_year() {
                    let categoria = self
                        .victimas
                        .selection
                        .selected_category()
                        .map(ToOwned::to_owned);
                    let keys = self.actions.fetch_victimas_charts(generation, anio, categoria);
                    self.pending.extend(keys);
                }
            }
            (ChartKey::VictimasGenero, Payload::Registros(r)) => self.victimas.genero = r,
            (ChartKey::VictimasEtario, Payload::Registros(r)) => self.victimas.etario = r,
            (ChartKey::VictimasArma, Payload::Registros(mut r)) => {
                r.truncate(TOP_RANKING);
                self.victimas.arma = r;
            }
            (ChartKey::VictimasSitio, Payload::Registros(mut r)) => {
                r.truncate(TOP_RANKING);
                self.victimas.sitio = r;
            }
            (ChartKey::VictimasGeneroDelito, Payload::Registros(r)) => {
                self.victimas.genero_delito = r;
            }
            (ChartKey::VictimasPuntos, Payload::Geo(geo)) => self.victimas.puntos = Some(geo),

            (ChartKey::ClimaFiltros, Payload::Filtros(resumen)) => {
                self.clima
                    .selection
                    .apply_resumen(&resumen, Some(CATEGORIA_CLIMA_DEFECTO));
            }
            (ChartKey::ClimaScatter, Payload::Registros(r)) => self.clima.scatter = r,
            (ChartKey::ClimaBarras, Payload::Registros(r)) => self.clima.barras = r,
            (ChartKey::ClimaLinea, Payload::Registros(r)) => self.clima.linea = r,
            (ChartKey::ClimaCorrelacion, Payload::Correlacion(c)) => {
                self.clima.correlacion = Some(c);
            }
            (ChartKey::ClimaPrecipitacion, Payload::Precipitacion(p)) => {
                self.clima.precipitacion = Some(p);
            }

            (ChartKey::ChatSugerencias, Payload::Sugerencias(s)) => {
                if !s.is_empty() {
                    self.chatbot.sugerencias = s;
                }
            }
            (ChartKey::ChatCapacidades, Payload::Capacidades(c)) => self.chatbot.capacidades = c,

            (ChartKey::PrediccionesFiltros, Payload::Filtros(resumen)) => {
                self.predicciones.selection.apply_resumen(&resumen, None);
                self.predicciones.municipios = resumen.municipios;
                self.predicciones.municipio_index = self
                    .predicciones
                    .municipios
                    .iter()
                    .position(|m| m.eq_ignore_ascii_case(MUNICIPIO_DEFECTO))
                    .unwrap_or(0);
            }
            (ChartKey::PrediccionesSerie, Payload::Serie(mut serie)) => {
                if serie.len() > VENTANA_SERIE {
                    serie.drain(..serie.len() - VENTANA_SERIE);
                }
                self.predicciones.serie = serie;
            }
            (ChartKey::PrediccionesComparativa, Payload::Comparativa(c)) => {
                self.predicciones.comparativa = c;
            }
            (ChartKey::PrediccionesAlertas, Payload::Alertas(mut alertas)) => {
                alertas.truncate(TOP_RANKING);
                self.predicciones.alertas = alertas;
            }
            (ChartKey::PrediccionesResumen, Payload::Predicciones(mut p)) => {
                p.truncate(TOP_RANKING);
                self.predicciones.resumen = p;
            }

            // A payload that does not fit its key is dropped.
            _ => {}
        }
    }

    /// A failed chart degrades to its empty default; siblings are untouched.
    fn apply_empty(&mut self, key: ChartKey) {
        match key {
            ChartKey::DashboardFiltros
            | ChartKey::GeografiaFiltros
            | ChartKey::TemporalFiltros
            | ChartKey::VictimasFiltros
            | ChartKey::ClimaFiltros
            | ChartKey::PrediccionesFiltros
            | ChartKey::ChatSugerencias
            | ChartKey::ChatCapacidades
            | ChartKey::ChatRespuesta => {}
            ChartKey::DashboardStats => self.dashboard.stats = None,
            ChartKey::DashboardAnual => self.dashboard.anual.clear(),
            ChartKey::DashboardDiaSemana => self.dashboard.dia_semana.clear(),
            ChartKey::DashboardGenero => self.dashboard.genero.clear(),
            ChartKey::DashboardZona => self.dashboard.zona.clear(),
            ChartKey::GeografiaMapa => self.geografia.geo = None,
            ChartKey::TemporalMensual => self.temporal.mensual.clear(),
            ChartKey::TemporalAnual => self.temporal.anual.clear(),
            ChartKey::TemporalDiaSemana => self.temporal.dia_semana.clear(),
            ChartKey::TemporalSemanal => self.temporal.semanal.clear(),
            ChartKey::TemporalModalidad => self.temporal.modalidad.clear(),
            ChartKey::VictimasGenero => self.victimas.genero.clear(),
            ChartKey::VictimasEtario => self.victimas.etario.clear(),
            ChartKey::VictimasArma => self.victimas.arma.clear(),
            ChartKey::VictimasSitio => self.victimas.sitio.clear(),
            ChartKey::VictimasGeneroDelito => self.victimas.genero_delito.clear(),
            ChartKey::VictimasPuntos => self.victimas.puntos = None,
            ChartKey::ClimaScatter => self.clima.scatter.clear(),
            ChartKey::ClimaBarras => self.clima.barras.clear(),
            ChartKey::ClimaLinea => self.clima.linea.clear(),
            ChartKey::ClimaCorrelacion => self.clima.correlacion = None,
            ChartKey::ClimaPrecipitacion => self.clima.precipitacion = None,
            ChartKey::PrediccionesSerie => self.predicciones.serie.clear(),
            ChartKey::PrediccionesComparativa => self.predicciones.comparativa.clear(),
            ChartKey::PrediccionesAlertas => self.predicciones.alertas.clear(),
            ChartKey::PrediccionesResumen => self.predicciones.resumen.clear(),
        }
    }

    /// Per-frame housekeeping: spinner animation and reveal expiry.
    pub fn update(&mut self) {
        if self.any_loading() {
            self.throbber.calc_next();
        }
        self.chatbot.chat.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::{App, FilterSelection, MUNICIPIO_DEFECTO};
    use crate::api::models::{FiltroResumen, Record};
    use crate::api::{ApiClient, ApiError};
    use crate::app::chat::{FALLBACK_EMPTY, FALLBACK_ERROR};
    use crate::app::fetch::{ChartKey, FetchOutcome, Payload};
    use crate::config::Config;

    fn test_app() -> App {
        let config = Config {
            api_base_url: "http://localhost:8000/api/v1".to_owned(),
            http_timeout_secs: 5,
            debug: false,
        };
        App::new(ApiClient::new(&config).unwrap(), false)
    }

    fn registros(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let mut r = Record::new();
                r.insert("total".to_owned(), i.into());
                r
            })
            .collect()
    }

    fn resumen() -> FiltroResumen {
        serde_json::from_str(
            r#"{
                "municipios": ["BARRANCABERMEJA", "BUCARAMANGA"],
                "categorias_delito": ["HURTO", " ", "LESIONES"],
                "anios": [2023, 2022]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut app = test_app();
        app.generation = 3;
        app.apply_outcome(FetchOutcome {
            generation: 2,
            key: ChartKey::DashboardAnual,
            result: Ok(Payload::Registros(registros(4))),
        });
        assert!(app.dashboard.anual.is_empty());
    }

    #[test]
    fn failing_chart_degrades_only_itself() {
        let mut app = test_app();
        app.pending.insert(ChartKey::TemporalMensual);
        app.pending.insert(ChartKey::TemporalAnual);
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::TemporalAnual,
            result: Ok(Payload::Registros(registros(3))),
        });
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::TemporalMensual,
            result: Err(ApiError::Status {
                path: "/temporal/linea-mensual".to_owned(),
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            }),
        });
        assert_eq!(app.temporal.anual.len(), 3);
        assert!(app.temporal.mensual.is_empty());
        assert!(app.pending.is_empty());
        assert!(app.status_message.contains("Error"));
    }

    #[test]
    fn filters_failure_leaves_selectors_empty() {
        let mut app = test_app();
        app.pending.insert(ChartKey::GeografiaFiltros);
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::GeografiaFiltros,
            result: Err(ApiError::Status {
                path: "/filtros/resumen".to_owned(),
                status: reqwest::StatusCode::BAD_GATEWAY,
            }),
        });
        assert!(app.geografia.selection.years.is_empty());
        assert!(app.geografia.selection.selected_year().is_none());
        assert!(app.running);
    }

    #[tokio::test]
    async fn filters_success_selects_latest_year_and_spawns_charts() {
        let mut app = test_app();
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::DashboardFiltros,
            result: Ok(Payload::Filtros(resumen())),
        });
        assert_eq!(app.dashboard.selection.selected_year(), Some(2023));
        // Blank category dropped, "all" option first.
        assert_eq!(app.dashboard.selection.categories.len(), 2);
        assert!(app.dashboard.selection.selected_category().is_none());
        assert!(app.pending.contains(&ChartKey::DashboardAnual));
        assert!(app.pending.contains(&ChartKey::DashboardGenero));
    }

    #[tokio::test]
    async fn prediction_filters_preselect_the_default_municipality() {
        let mut app = test_app();
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::PrediccionesFiltros,
            result: Ok(Payload::Filtros(resumen())),
        });
        assert_eq!(app.predicciones.municipio(), "BUCARAMANGA");
        assert_eq!(app.predicciones.municipio_index, 1);
    }

    #[test]
    fn chat_reply_lands_despite_stale_generation() {
        let mut app = test_app();
        app.generation = 9;
        app.chatbot.chat.waiting = true;
        app.apply_outcome(FetchOutcome {
            generation: 1,
            key: ChartKey::ChatRespuesta,
            result: Ok(Payload::Chat(
                serde_json::from_str(r#"{"respuesta": "Hay 120 hurtos", "tipo_consulta": "conteo"}"#)
                    .unwrap(),
            )),
        });
        assert!(!app.chatbot.chat.waiting);
        assert_eq!(app.chatbot.chat.messages.len(), 1);
        assert_eq!(app.chatbot.chat.messages[0].text, "Hay 120 hurtos");
    }

    #[test]
    fn failed_chat_reply_appends_fallback() {
        let mut app = test_app();
        app.chatbot.chat.waiting = true;
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::ChatRespuesta,
            result: Err(ApiError::Status {
                path: "/chatbot/consultar".to_owned(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            }),
        });
        assert_eq!(app.chatbot.chat.messages.len(), 1);
        assert_eq!(app.chatbot.chat.messages[0].text, FALLBACK_ERROR);
    }

    #[test]
    fn empty_chat_reply_uses_empty_fallback() {
        let mut app = test_app();
        app.chatbot.chat.waiting = true;
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::ChatRespuesta,
            result: Ok(Payload::Chat(serde_json::from_str(r#"{"respuesta": "  "}"#).unwrap())),
        });
        assert_eq!(app.chatbot.chat.messages[0].text, FALLBACK_EMPTY);
    }

    #[test]
    fn series_window_keeps_last_points() {
        let mut app = test_app();
        let datos: Vec<crate::api::models::PuntoSerie> = (0..80)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "anio": 2020 + i / 12,
                    "mes": i % 12 + 1,
                    "total_delitos": f64::from(i)
                }))
                .unwrap()
            })
            .collect();
        app.apply_outcome(FetchOutcome {
            generation: 0,
            key: ChartKey::PrediccionesSerie,
            result: Ok(Payload::Serie(datos)),
        });
        assert_eq!(app.predicciones.serie.len(), super::VENTANA_SERIE);
        assert_eq!(app.predicciones.serie[0].total_delitos, 20.0);
    }

    #[test]
    fn selection_cycles_and_labels() {
        let mut selection = FilterSelection::with_all_option();
        selection.apply_resumen(&resumen(), None);
        assert_eq!(selection.category_label(), "Todas");
        assert!(selection.next_category());
        assert_eq!(selection.selected_category(), Some("HURTO"));
        assert!(selection.prev_category());
        assert!(selection.selected_category().is_none());
        assert!(selection.prev_year());
        assert_eq!(selection.selected_year(), Some(2022));
    }

    #[test]
    fn clima_defaults_hold_without_filters() {
        let app = test_app();
        assert_eq!(app.clima.selection.selected_year(), Some(2019));
        assert_eq!(app.clima.categoria(), "HURTO");
        assert_eq!(app.predicciones.municipio(), MUNICIPIO_DEFECTO);
    }
}

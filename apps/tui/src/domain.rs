/// Pages of the dashboard, switched with the number keys. The TUI analog of
/// client-side routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Geografia,
    Temporal,
    Victimas,
    Clima,
    Chatbot,
    Predicciones,
}

impl Page {
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::Geografia,
        Self::Temporal,
        Self::Victimas,
        Self::Clima,
        Self::Chatbot,
        Self::Predicciones,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Geografia => "Geografía",
            Self::Temporal => "Temporal",
            Self::Victimas => "Víctimas",
            Self::Clima => "Clima",
            Self::Chatbot => "Chatbot",
            Self::Predicciones => "Predicciones",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Resumen general de seguridad en Santander",
            Self::Geografia => "Mapas de delitos por municipio",
            Self::Temporal => "Series de tiempo y distribuciones temporales",
            Self::Victimas => "Perfil demográfico de las víctimas",
            Self::Clima => "Relación entre precipitación y delitos",
            Self::Chatbot => "Consultas en lenguaje natural sobre los datos",
            Self::Predicciones => "Predicciones de delitos basadas en Machine Learning",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Dashboard),
            1 => Some(Self::Geografia),
            2 => Some(Self::Temporal),
            3 => Some(Self::Victimas),
            4 => Some(Self::Clima),
            5 => Some(Self::Chatbot),
            6 => Some(Self::Predicciones),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Geografia => 1,
            Self::Temporal => 2,
            Self::Victimas => 3,
            Self::Clima => 4,
            Self::Chatbot => 5,
            Self::Predicciones => 6,
        }
    }

    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::ALL.len()).unwrap_or(Self::Dashboard)
    }

    pub fn prev(self) -> Self {
        Self::from_index((self.index() + Self::ALL.len() - 1) % Self::ALL.len())
            .unwrap_or(Self::Dashboard)
    }
}

/// A record field a widget reads, together with the label shown for it.
/// Field access stays schemaless, but which field feeds which visual is
/// fixed at compile time.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

/// Which choropleth variant the geography page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapView {
    #[default]
    Total,
    Tasa,
}

impl MapView {
    pub const fn label(self) -> &'static str {
        self.column().label
    }

    /// Property of each GeoJSON feature the color scale reads.
    pub const fn column(self) -> Column {
        match self {
            Self::Total => Column {
                key: "total_delitos",
                label: "Total de Delitos",
            },
            Self::Tasa => Column {
                key: "tasa_por_100k",
                label: "Tasa por 100k habitantes",
            },
        }
    }

    pub const fn value_field(self) -> &'static str {
        self.column().key
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Total => Self::Tasa,
            Self::Tasa => Self::Total,
        }
    }
}

/// Tabs of the temporal page. Every tab's data arrives in the same batch, so
/// switching tabs never refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemporalTab {
    #[default]
    Mensual,
    Anual,
    DiaSemana,
    Modalidad,
}

impl TemporalTab {
    pub const ALL: [Self; 4] = [Self::Mensual, Self::Anual, Self::DiaSemana, Self::Modalidad];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mensual => "Mensual",
            Self::Anual => "Anual",
            Self::DiaSemana => "Día de la semana",
            Self::Modalidad => "Modalidad",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Mensual => 0,
            Self::Anual => 1,
            Self::DiaSemana => 2,
            Self::Modalidad => 3,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Mensual => Self::Anual,
            Self::Anual => Self::DiaSemana,
            Self::DiaSemana => Self::Modalidad,
            Self::Modalidad => Self::Mensual,
        }
    }
}

/// Theme is explicit application state, threaded through every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "oscuro",
            Self::Light => "claro",
        }
    }
}

/// Climate observations only cover 2005-2019, regardless of what the crime
/// filters advertise.
pub const CLIMA_FIRST_YEAR: i32 = 2005;
pub const CLIMA_LAST_YEAR: i32 = 2019;

/// Most recent first, matching the ordering of `filtros/resumen`.
pub fn clima_years() -> Vec<i32> {
    (CLIMA_FIRST_YEAR..=CLIMA_LAST_YEAR).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::{clima_years, MapView, Page, TemporalTab};

    #[test]
    fn page_index_round_trips() {
        for page in Page::ALL {
            assert_eq!(Page::from_index(page.index()), Some(page));
        }
        assert_eq!(Page::from_index(7), None);
    }

    #[test]
    fn page_cycling_wraps() {
        assert_eq!(Page::Predicciones.next(), Page::Dashboard);
        assert_eq!(Page::Dashboard.prev(), Page::Predicciones);
    }

    #[test]
    fn map_view_toggles_value_field() {
        assert_eq!(MapView::Total.value_field(), "total_delitos");
        assert_eq!(MapView::Total.toggled().value_field(), "tasa_por_100k");
    }

    #[test]
    fn temporal_tabs_cycle_in_order() {
        let mut tab = TemporalTab::Mensual;
        for expected in [
            TemporalTab::Anual,
            TemporalTab::DiaSemana,
            TemporalTab::Modalidad,
            TemporalTab::Mensual,
        ] {
            tab = tab.next();
            assert_eq!(tab, expected);
        }
    }

    #[test]
    fn clima_years_are_descending_and_bounded() {
        let years = clima_years();
        assert_eq!(years.first(), Some(&2019));
        assert_eq!(years.last(), Some(&2005));
        assert_eq!(years.len(), 15);
    }
}

//! Pure data shaping for the chart widgets: field extraction from backend
//! records, color-scale bucketing, donut percentages, heat points and the
//! small formatting helpers. Everything here is a pure function of its
//! inputs; rendering lives in `ui::widgets`.

use crate::api::models::{GeoCollection, Record};

pub const MESES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// 1-based month number to Spanish abbreviation; out-of-range values fall
/// back to the number itself.
pub fn month_abbr(mes: i64) -> String {
    if (1..=12).contains(&mes) {
        MESES[(mes - 1) as usize].to_owned()
    } else {
        mes.to_string()
    }
}

/// Numeric field access tolerant of numbers arriving as JSON strings.
pub fn num(record: &Record, key: &str) -> Option<f64> {
    match record.get(key)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn text(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// (label, value) pairs for bar charts; rows missing either field are
/// skipped, negative values floored at zero.
pub fn bar_data(records: &[Record], label_key: &str, value_key: &str) -> Vec<(String, u64)> {
    records
        .iter()
        .filter_map(|r| {
            let label = text(r, label_key)?;
            let value = num(r, value_key)?;
            Some((label, value.max(0.0).round() as u64))
        })
        .collect()
}

/// Bar data with the label column mapped through `month_abbr`.
pub fn monthly_bar_data(records: &[Record], month_key: &str, value_key: &str) -> Vec<(String, u64)> {
    records
        .iter()
        .filter_map(|r| {
            let mes = num(r, month_key)?;
            let value = num(r, value_key)?;
            Some((month_abbr(mes as i64), value.max(0.0).round() as u64))
        })
        .collect()
}

/// (x, y) series from two numeric fields; when the x field is absent or not
/// numeric the row index is used instead.
pub fn series_data(records: &[Record], x_key: &str, y_key: &str) -> Vec<(f64, f64)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let y = num(r, y_key)?;
            let x = num(r, x_key).unwrap_or(i as f64);
            Some((x, y))
        })
        .collect()
}

/// First and last values of a text field, for labelling the ends of an
/// x axis. Empty when the rows are empty or the field is missing.
pub fn edge_labels(records: &[Record], key: &str) -> Vec<String> {
    match (
        records.first().and_then(|r| text(r, key)),
        records.last().and_then(|r| text(r, key)),
    ) {
        (Some(first), Some(last)) => vec![first, last],
        _ => Vec::new(),
    }
}

/// Smallest and largest finite value, `None` when the slice has none.
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some((min, max))
}

/// Number of steps in the sequential choropleth scale.
pub const COLOR_STEPS: usize = 9;

/// Maps a value onto the 9-step scale: `floor((v-min)/(max-min) * 9)`,
/// clamped to `[0, 8]`. A degenerate range maps everything to the lowest
/// step.
pub fn color_bucket(value: f64, min: f64, max: f64) -> usize {
    if max <= min {
        return 0;
    }
    let normalized = (value - min) / (max - min);
    ((normalized * COLOR_STEPS as f64).floor() as isize)
        .clamp(0, COLOR_STEPS as isize - 1) as usize
}

/// Min/max of a feature property across a collection, excluding features
/// where the property is null or missing.
pub fn property_bounds(geo: &GeoCollection, field: &str) -> Option<(f64, f64)> {
    let values: Vec<f64> = geo
        .features
        .iter()
        .filter_map(|f| num(&f.properties, field))
        .collect();
    value_bounds(&values)
}

/// Point features become `(lat, lng, 0.5)` triples with a fixed intensity;
/// features with missing or null coordinates are skipped.
pub fn heat_points(geo: &GeoCollection) -> Vec<(f64, f64, f64)> {
    geo.features
        .iter()
        .filter_map(|f| {
            let coords = f.geometry.get("coordinates")?;
            let lng = coords.get(0)?.as_f64()?;
            let lat = coords.get(1)?.as_f64()?;
            Some((lat, lng, 0.5))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total, in [0, 1].
    pub fraction: f64,
}

impl DonutSlice {
    /// Integer-rounded percentage, as printed next to the legend swatch.
    pub fn percent_label(&self) -> String {
        format!("{}%", (self.fraction * 100.0).round() as i64)
    }

    /// One-decimal percentage, as printed in the detail line.
    pub fn percent_detail(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// Slices with their share of the total. Rows without label or value are
/// skipped; a zero or negative total yields no slices.
pub fn donut_slices(records: &[Record], label_key: &str, value_key: &str) -> Vec<DonutSlice> {
    let pairs: Vec<(String, f64)> = records
        .iter()
        .filter_map(|r| {
            let label = text(r, label_key)?;
            let value = num(r, value_key)?;
            (value >= 0.0).then_some((label, value))
        })
        .collect();
    let total: f64 = pairs.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    pairs
        .into_iter()
        .map(|(label, value)| DonutSlice {
            label,
            value,
            fraction: value / total,
        })
        .collect()
}

/// Largest `n` records by a numeric field, descending, ties keeping their
/// original order. Records without the field sort last.
pub fn top_n(records: &[Record], value_key: &str, n: usize) -> Vec<Record> {
    let mut sorted: Vec<Record> = records.to_vec();
    sorted.sort_by(|a, b| {
        let va = num(a, value_key).unwrap_or(f64::NEG_INFINITY);
        let vb = num(b, value_key).unwrap_or(f64::NEG_INFINITY);
        vb.partial_cmp(&va).unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

/// Per-category (feminine, masculine) totals from the `genero-por-delito`
/// rows, whose gender counts arrive nested under a `generos` object.
pub fn pivot_genero_por_delito(records: &[Record]) -> Vec<(String, u64, u64)> {
    records
        .iter()
        .filter_map(|record| {
            let categoria = text(record, "categoria_delito")?;
            let generos = record.get("generos")?.as_object()?;
            let count = |genero: &str| {
                generos
                    .get(genero)
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(0.0)
                    .max(0.0)
                    .round() as u64
            };
            Some((categoria, count("FEMENINO"), count("MASCULINO")))
        })
        .collect()
}

/// es-CO style grouping: dot as thousands separator.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_opt_number(value: Option<i64>) -> String {
    value.map_or_else(|| "—".to_owned(), |v| format_number(v as f64))
}

pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_owned(), |v| format!("{v:.1}%"))
}

#[cfg(test)]
mod tests {
    use super::{
        bar_data, color_bucket, donut_slices, edge_labels, format_number, heat_points, month_abbr,
        monthly_bar_data, num, pivot_genero_por_delito, property_bounds, series_data, top_n,
        value_bounds, COLOR_STEPS,
    };
    use crate::api::models::{GeoCollection, Record};

    fn record(pairs: &[(&str, serde_json::Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn bucket_is_monotonic_and_clamped() {
        let (min, max) = (0.0, 100.0);
        assert_eq!(color_bucket(min, min, max), 0);
        assert_eq!(color_bucket(max, min, max), COLOR_STEPS - 1);
        assert_eq!(color_bucket(min - 50.0, min, max), 0);
        assert_eq!(color_bucket(max + 50.0, min, max), COLOR_STEPS - 1);

        let mut last = 0;
        for step in 0..=100 {
            let bucket = color_bucket(f64::from(step), min, max);
            assert!(bucket >= last, "bucket decreased at {step}");
            assert!(bucket < COLOR_STEPS);
            last = bucket;
        }
    }

    #[test]
    fn degenerate_range_maps_to_lowest_step() {
        assert_eq!(color_bucket(5.0, 5.0, 5.0), 0);
    }

    #[test]
    fn property_bounds_ignore_null_values() {
        let geo: GeoCollection = serde_json::from_str(
            r#"{"features": [
                {"properties": {"total_delitos": 10}, "geometry": null},
                {"properties": {"total_delitos": null}, "geometry": null},
                {"properties": {"total_delitos": 40}, "geometry": null},
                {"properties": {}, "geometry": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(property_bounds(&geo, "total_delitos"), Some((10.0, 40.0)));
    }

    #[test]
    fn heat_points_skip_missing_coordinates() {
        let geo: GeoCollection = serde_json::from_str(
            r#"{"features": [
                {"properties": {}, "geometry": {"type": "Point", "coordinates": [-73.12, 7.11]}},
                {"properties": {}, "geometry": {"type": "Point", "coordinates": [null, 7.0]}},
                {"properties": {}, "geometry": null}
            ]}"#,
        )
        .unwrap();
        let points = heat_points(&geo);
        assert_eq!(points, vec![(7.11, -73.12, 0.5)]);
    }

    #[test]
    fn donut_percentages_round_as_labels() {
        let records = [
            record(&[("genero", "FEMENINO".into()), ("total", 25.into())]),
            record(&[("genero", "MASCULINO".into()), ("total", 75.into())]),
        ];
        let slices = donut_slices(&records, "genero", "total");
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].percent_label(), "25%");
        assert_eq!(slices[1].percent_label(), "75%");
        assert_eq!(slices[0].percent_detail(), "25.0%");
    }

    #[test]
    fn donut_with_zero_total_is_empty() {
        let records = [record(&[("genero", "FEMENINO".into()), ("total", 0.into())])];
        assert!(donut_slices(&records, "genero", "total").is_empty());
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let records: Vec<Record> = [30, 10, 40, 10, 20]
            .iter()
            .enumerate()
            .map(|(i, v)| record(&[("id", (i as i64).into()), ("total", (*v).into())]))
            .collect();
        let top = top_n(&records, "total", 3);
        let totals: Vec<f64> = top.iter().filter_map(|r| num(r, "total")).collect();
        assert_eq!(totals, vec![40.0, 30.0, 20.0]);
        assert!(top.len() <= 3);
    }

    #[test]
    fn top_n_keeps_tied_rows_in_input_order() {
        let records: Vec<Record> = [("a", 10), ("b", 10), ("c", 10)]
            .iter()
            .map(|(id, v)| record(&[("id", (*id).into()), ("total", (*v).into())]))
            .collect();
        let ids: Vec<String> = top_n(&records, "total", 3)
            .iter()
            .filter_map(|r| super::text(r, "id"))
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn month_mapping_handles_range_and_fallback() {
        assert_eq!(month_abbr(1), "Ene");
        assert_eq!(month_abbr(12), "Dic");
        assert_eq!(month_abbr(0), "0");
        assert_eq!(month_abbr(13), "13");
    }

    #[test]
    fn bar_data_skips_incomplete_rows() {
        let records = [
            record(&[("dia", "Lunes".into()), ("total", 5.into())]),
            record(&[("dia", "Martes".into())]),
            record(&[("total", 9.into())]),
        ];
        assert_eq!(bar_data(&records, "dia", "total"), vec![("Lunes".to_owned(), 5)]);
    }

    #[test]
    fn monthly_rows_label_by_month_number() {
        // The backend sends the month as a number, never a name.
        let records = [
            record(&[
                ("anio", 2023.into()),
                ("mes", 1.into()),
                ("periodo", "2023-01".into()),
                ("total", 120.into()),
            ]),
            record(&[
                ("anio", 2023.into()),
                ("mes", 2.into()),
                ("periodo", "2023-02".into()),
                ("total", 95.into()),
            ]),
        ];
        assert_eq!(
            monthly_bar_data(&records, "mes", "total"),
            vec![("Ene".to_owned(), 120), ("Feb".to_owned(), 95)]
        );
        // A name field the rows do not carry yields nothing.
        assert!(bar_data(&records, "mes_nombre", "total").is_empty());
    }

    #[test]
    fn edge_labels_read_first_and_last_periods() {
        let records = [
            record(&[("periodo", "2019-01".into()), ("total_delitos", 80.into())]),
            record(&[("periodo", "2019-02".into()), ("total_delitos", 70.into())]),
            record(&[("periodo", "2019-03".into()), ("total_delitos", 90.into())]),
        ];
        assert_eq!(edge_labels(&records, "periodo"), vec!["2019-01", "2019-03"]);
        assert!(edge_labels(&records, "mes").is_empty());
        assert!(edge_labels(&[], "periodo").is_empty());
    }

    #[test]
    fn series_falls_back_to_row_index_for_non_numeric_x() {
        let records = [
            record(&[("periodo", "2023-01".into()), ("total", 7.into())]),
            record(&[("periodo", "2023-02".into()), ("total", 9.into())]),
        ];
        assert_eq!(series_data(&records, "periodo", "total"), vec![(0.0, 7.0), (1.0, 9.0)]);
    }

    #[test]
    fn numeric_strings_parse_as_numbers() {
        let r = record(&[("total", "123".into())]);
        assert_eq!(num(&r, "total"), Some(123.0));
    }

    #[test]
    fn pivot_splits_genders_per_category() {
        let records = [
            record(&[
                ("categoria_delito", "HURTO".into()),
                ("generos", serde_json::json!({"FEMENINO": 12, "MASCULINO": 30})),
            ]),
            record(&[
                ("categoria_delito", "LESIONES".into()),
                ("generos", serde_json::json!({"FEMENINO": 4})),
            ]),
            record(&[("categoria_delito", "VIF".into())]),
        ];
        let pivoted = pivot_genero_por_delito(&records);
        assert_eq!(
            pivoted,
            vec![
                ("HURTO".to_owned(), 12, 30),
                ("LESIONES".to_owned(), 4, 0)
            ]
        );
    }

    #[test]
    fn numbers_group_thousands_with_dots() {
        assert_eq!(format_number(1234567.0), "1.234.567");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(-1000.0), "-1.000");
    }

    #[test]
    fn value_bounds_ignore_non_finite() {
        assert_eq!(value_bounds(&[3.0, f64::NAN, 1.0, 5.0]), Some((1.0, 5.0)));
        assert_eq!(value_bounds(&[]), None);
    }
}

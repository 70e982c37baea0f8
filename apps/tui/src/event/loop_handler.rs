use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

use crate::api::{self, ApiClient};
use crate::app::{handle_input, App};
use crate::chart::format_opt_number;
use crate::ui;

/// Run the main application event loop: drain fetch outcomes, advance
/// animations, draw, then poll for input.
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Event poll timeout (ms); also the frame cadence while idle.
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Apply every outcome that arrived since the last frame.
        loop {
            let Ok(outcome) = app.rx.try_recv() else { break };
            app.apply_outcome(outcome);
        }

        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events
                }
            }
        }
    }
    Ok(())
}

/// Prints the backend's general statistics and available filters without
/// entering the TUI.
pub async fn run_headless(client: &ApiClient, json: bool) -> Result<()> {
    let stats = build_headless_stats(client).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }
    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nAtlas al Crimen - Santander");
    println!("===========================");
    println!("Generado: {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
    println!("API: {}", stats.api);
    println!("Total de eventos: {}", format_opt_number(stats.total_eventos));
    println!(
        "Municipios cubiertos: {}",
        format_opt_number(stats.municipios_cubiertos)
    );
    println!("Categorías: {}", stats.categorias.len());
    match (&stats.fecha_inicio, &stats.fecha_fin) {
        (Some(inicio), Some(fin)) => println!("Rango de fechas: {inicio} a {fin}"),
        _ => println!("Rango de fechas: —"),
    }

    if !stats.categorias.is_empty() {
        println!("\nCategorías de delito:");
        for categoria in &stats.categorias {
            println!("- {categoria}");
        }
    }
    if !stats.anios.is_empty() {
        println!("\nAños disponibles:");
        let joined: Vec<String> = stats.anios.iter().map(ToString::to_string).collect();
        println!("{}", joined.join(", "));
    }
}

async fn build_headless_stats(client: &ApiClient) -> Result<HeadlessStats> {
    let estadisticas = api::chatbot::estadisticas(client).await?;
    // Filters are best-effort here; statistics alone are still worth printing.
    let resumen = api::filtros::resumen(client).await.unwrap_or_default();

    Ok(HeadlessStats {
        generado: chrono::Local::now().to_rfc3339(),
        api: client.base_url().to_owned(),
        total_eventos: estadisticas.total_eventos,
        municipios_cubiertos: estadisticas.municipios_cubiertos,
        categorias: estadisticas.categorias_disponibles,
        fecha_inicio: estadisticas.fecha_inicio,
        fecha_fin: estadisticas.fecha_fin,
        anios: resumen.anios,
    })
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    generado: String,
    api: String,
    total_eventos: Option<i64>,
    municipios_cubiertos: Option<i64>,
    categorias: Vec<String>,
    fecha_inicio: Option<String>,
    fecha_fin: Option<String>,
    anios: Vec<i32>,
}

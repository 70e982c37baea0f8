use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Write};

/// Sets up raw mode and the alternate screen, undoing the steps already
/// taken when a later one fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    if let Err(e) = enable_raw_mode() {
        return Err(color_eyre::eyre::eyre!("Failed to enable raw mode: {e}"));
    }

    let mut out = stdout();
    if let Err(e) = execute!(out, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(color_eyre::eyre::eyre!(
            "Failed to enter alternate screen: {e}"
        ));
    }

    let backend = CrosstermBackend::new(out);
    let mut terminal = match Terminal::new(backend) {
        Ok(term) => term,
        Err(e) => {
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(color_eyre::eyre::eyre!("Failed to create terminal: {e}"));
        }
    };

    // Neither of these is fatal.
    if let Err(e) = terminal.clear() {
        eprintln!("Warning: Failed to clear terminal: {e}");
    }
    if let Err(e) = execute!(std::io::stdout(), cursor::Hide) {
        eprintln!("Warning: Failed to hide cursor: {e}");
    }

    Ok(terminal)
}

/// Restores the terminal on the way out; every step is attempted even when
/// an earlier one fails.
pub fn cleanup_terminal_state() {
    let mut out = stdout();

    if let Err(e) = execute!(out, cursor::Show) {
        eprintln!("Warning: Failed to show cursor: {e}");
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen) {
        eprintln!("Warning: Failed to leave alternate screen: {e}");
    }
    if let Err(e) = disable_raw_mode() {
        eprintln!("Warning: Failed to disable raw mode: {e}");
    }

    // Leave the shell prompt on a fresh line.
    let _ = execute!(out, cursor::MoveToNextLine(1));
    let _ = out.flush();
}

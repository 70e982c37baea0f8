//! Chat transcript state and the typewriter reveal. The reveal is purely
//! cosmetic: the full reply is already in the transcript, rendering just
//! truncates it while the clock runs.

use std::time::Instant;

pub const FALLBACK_EMPTY: &str = "Lo siento, no pude procesar tu consulta.";
pub const FALLBACK_ERROR: &str =
    "Lo siento, ocurrió un error al procesar tu consulta. Por favor intenta de nuevo.";

/// Shown while the suggestions fetch has failed or not yet answered.
pub const DEFAULT_SUGERENCIAS: [&str; 4] = [
    "¿Cuántos delitos hay en Bucaramanga?",
    "¿Cuál es el municipio con más hurtos?",
    "¿Cómo ha evolucionado el delito en los últimos años?",
    "¿Qué porcentaje de víctimas son mujeres?",
];

const REVEAL_MS_PER_CHAR: u64 = 10;
const REVEAL_BASE_MS: u64 = 500;
const REVEAL_CAP_MS: u64 = 10_000;

/// Reveal duration proportional to reply length, capped.
pub const fn reveal_duration_ms(chars: usize) -> u64 {
    let raw = chars as u64 * REVEAL_MS_PER_CHAR + REVEAL_BASE_MS;
    if raw > REVEAL_CAP_MS {
        REVEAL_CAP_MS
    } else {
        raw
    }
}

/// Characters visible after `elapsed_ms` of a reveal sized `duration_ms`.
/// Monotonic in elapsed time; the full text shows at or after the duration.
pub fn revealed_chars(total_chars: usize, elapsed_ms: u64, duration_ms: u64) -> usize {
    if duration_ms == 0 || elapsed_ms >= duration_ms {
        return total_chars;
    }
    ((total_chars as u128 * elapsed_ms as u128) / duration_ms as u128) as usize
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub from_bot: bool,
    pub tipo_consulta: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Reveal {
    pub message_id: u64,
    pub started: Instant,
    pub duration_ms: u64,
}

/// Append-only transcript scoped to the session.
#[derive(Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    next_id: u64,
    pub input: String,
    pub insert_mode: bool,
    /// A consultation is in flight; input is disabled meanwhile.
    pub waiting: bool,
    pub reveal: Option<Reveal>,
}

impl ChatState {
    pub fn push_user(&mut self, text: String) -> u64 {
        self.push(text, false, None)
    }

    /// Appends a bot reply and starts its reveal.
    pub fn push_bot(&mut self, text: String, tipo_consulta: Option<String>) -> u64 {
        let duration_ms = reveal_duration_ms(text.chars().count());
        let id = self.push(text, true, tipo_consulta);
        self.reveal = Some(Reveal {
            message_id: id,
            started: Instant::now(),
            duration_ms,
        });
        id
    }

    fn push(&mut self, text: String, from_bot: bool, tipo_consulta: Option<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            from_bot,
            tipo_consulta,
        });
        id
    }

    /// Text of a message with the active reveal applied.
    pub fn visible_text(&self, message: &ChatMessage) -> String {
        match &self.reveal {
            Some(reveal) if reveal.message_id == message.id => {
                let elapsed_ms = u64::try_from(reveal.started.elapsed().as_millis())
                    .unwrap_or(u64::MAX);
                let visible =
                    revealed_chars(message.text.chars().count(), elapsed_ms, reveal.duration_ms);
                message.text.chars().take(visible).collect()
            }
            _ => message.text.clone(),
        }
    }

    /// Drops the reveal once it has run its course, so rendering stops
    /// doing per-frame truncation.
    pub fn tick(&mut self) {
        if let Some(reveal) = &self.reveal {
            if reveal.started.elapsed().as_millis() as u64 >= reveal.duration_ms {
                self.reveal = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reveal_duration_ms, revealed_chars, ChatState};

    #[test]
    fn message_ids_are_monotonic() {
        let mut chat = ChatState::default();
        let a = chat.push_user("hola".into());
        let b = chat.push_bot("respuesta".into(), None);
        let c = chat.push_user("otra".into());
        assert!(a < b && b < c);
        assert_eq!(chat.messages.len(), 3);
    }

    #[test]
    fn transcript_keeps_insertion_order() {
        let mut chat = ChatState::default();
        chat.push_user("pregunta".into());
        chat.push_bot("respuesta".into(), Some("conteo".into()));
        assert!(!chat.messages[0].from_bot);
        assert!(chat.messages[1].from_bot);
        assert_eq!(chat.messages[1].tipo_consulta.as_deref(), Some("conteo"));
    }

    #[test]
    fn reveal_duration_is_proportional_and_capped() {
        assert_eq!(reveal_duration_ms(0), 500);
        assert_eq!(reveal_duration_ms(100), 1500);
        assert_eq!(reveal_duration_ms(5000), 10_000);
    }

    #[test]
    fn reveal_is_monotonic_and_completes() {
        let total = 40;
        let duration = reveal_duration_ms(total);
        let mut last = 0;
        for elapsed in (0..=duration).step_by(50) {
            let visible = revealed_chars(total, elapsed, duration);
            assert!(visible >= last);
            assert!(visible <= total);
            last = visible;
        }
        assert_eq!(revealed_chars(total, duration, duration), total);
        assert_eq!(revealed_chars(total, duration * 2, duration), total);
    }

    #[test]
    fn zero_duration_shows_everything() {
        assert_eq!(revealed_chars(12, 0, 0), 12);
    }
}

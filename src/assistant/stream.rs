//! Typewriter-style presentation of assistant answers
//!
//! An answer is cut into small chunks of 1, 3 or 6 characters, each shown
//! after a short randomized pause. Pauses stretch after punctuation and line
//! breaks. The chunk plan is computed up front so it can be tested with a
//! seeded generator.

use crate::assistant::prompts::THINKING_STEPS;
use crate::config::AssistantConfig;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use std::io::Write;
use std::time::Duration;

/// Pause before the first chunk
const FIRST_CHUNK_MS: (f64, f64) = (120.0, 300.0);
const BASE_MS: (f64, f64) = (18.0, 60.0);
const CLAUSE_PAUSE_MS: (f64, f64) = (90.0, 170.0);
const SENTENCE_PAUSE_MS: (f64, f64) = (160.0, 300.0);
const ELLIPSIS_PAUSE_MS: (f64, f64) = (120.0, 240.0);
const NEWLINE_PAUSE_MS: (f64, f64) = (220.0, 400.0);
const MICRO_THINK_MS: (f64, f64) = (220.0, 480.0);

/// Messages longer than this (in characters) get occasional micro pauses
const LONG_MESSAGE_CHARS: usize = 240;
const MICRO_THINK_PROBABILITY: f64 = 0.03;

#[derive(Debug, Clone, PartialEq)]
pub struct StreamChunk {
    pub text: String,
    /// Wait before this chunk is shown
    pub delay: Duration,
}

fn millis_between<R: Rng>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    low + rng.random::<f64>() * (high - low)
}

fn chunk_size<R: Rng>(rng: &mut R) -> usize {
    if rng.random::<f64>() < 0.12 {
        6
    } else if rng.random::<f64>() < 0.35 {
        3
    } else {
        1
    }
}

/// Extra pause earned by the text shown so far
fn pause_after<R: Rng>(shown: &str, long_message: bool, rng: &mut R) -> f64 {
    let mut delay = millis_between(rng, BASE_MS);
    let last = shown.chars().last().unwrap_or_default();

    if matches!(last, ',' | ';' | ':') {
        delay += millis_between(rng, CLAUSE_PAUSE_MS);
    }
    if matches!(last, '.' | '!' | '?') {
        delay += millis_between(rng, SENTENCE_PAUSE_MS);
    }
    if shown.ends_with("..") {
        delay += millis_between(rng, ELLIPSIS_PAUSE_MS);
    }
    if last == '\n' {
        delay += millis_between(rng, NEWLINE_PAUSE_MS);
    }
    if long_message && rng.random::<f64>() < MICRO_THINK_PROBABILITY {
        delay += millis_between(rng, MICRO_THINK_MS);
    }
    delay
}

/// Cut `message` into chunks on character boundaries with their delays.
///
/// The chunk texts always concatenate back to `message`.
pub fn plan_chunks<R: Rng>(message: &str, rng: &mut R) -> Vec<StreamChunk> {
    let long_message = message.chars().count() > LONG_MESSAGE_CHARS;
    let mut chunks = Vec::new();
    let mut delay_ms = millis_between(rng, FIRST_CHUNK_MS);
    let mut rest = message;
    let mut shown_end = 0;

    while !rest.is_empty() {
        let size = chunk_size(rng);
        let split = rest
            .char_indices()
            .nth(size)
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        let (text, tail) = rest.split_at(split);

        chunks.push(StreamChunk {
            text: text.to_string(),
            delay: Duration::from_secs_f64(delay_ms / 1000.0),
        });

        shown_end += split;
        rest = tail;
        delay_ms = pause_after(&message[..shown_end], long_message, rng);
    }

    chunks
}

/// Presents answers on the terminal according to the assistant settings
pub struct AnswerStreamer {
    streaming: bool,
    time_scale: f64,
    thinking_step: Duration,
}

impl AnswerStreamer {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            streaming: config.streaming,
            time_scale: config.time_scale.max(0.0),
            thinking_step: Duration::from_millis(config.thinking_step_ms),
        }
    }

    fn scaled(&self, delay: Duration) -> Option<Duration> {
        if self.time_scale == 0.0 || delay.is_zero() {
            None
        } else {
            Some(delay.mul_f64(self.time_scale))
        }
    }

    /// Show the thinking steps on a spinner, one step per interval
    pub async fn think(&self) {
        let Some(step) = self.scaled(self.thinking_step) else {
            return;
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(80));

        for text in THINKING_STEPS {
            spinner.set_message(text);
            tokio::time::sleep(step).await;
        }
        spinner.finish_and_clear();
    }

    /// Write `message` to `out`, chunk by chunk when streaming is on
    pub async fn stream_to<W: Write>(&self, message: &str, out: &mut W) -> Result<()> {
        if !self.streaming {
            writeln!(out, "{}", message)?;
            return Ok(());
        }

        let chunks = plan_chunks(message, &mut rand::rng());
        for chunk in chunks {
            if let Some(delay) = self.scaled(chunk.delay) {
                tokio::time::sleep(delay).await;
            }
            out.write_all(chunk.text.as_bytes())?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LONG_ANSWER: &str = "I found **12 total applicants** in your database. You can ask me about:\n• Application counts and trends\n• Candidate experience levels\n• Category breakdowns\n• Shortlisted candidates\n• Specific skills... and more, including pipeline status: new, reviewed, shortlisted!";

    #[test]
    fn test_chunks_reassemble_message() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chunks = plan_chunks(LONG_ANSWER, &mut rng);
            let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(joined, LONG_ANSWER);
        }
    }

    #[test]
    fn test_chunk_sizes_and_delays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let chunks = plan_chunks(LONG_ANSWER, &mut rng);

        let first = chunks[0].delay.as_secs_f64() * 1000.0;
        assert!((120.0..=300.0).contains(&first));

        let (last, body) = chunks.split_last().unwrap();
        for chunk in body {
            assert!(matches!(chunk.text.chars().count(), 1 | 3 | 6));
        }
        assert!(last.text.chars().count() <= 6);

        for chunk in &chunks[1..] {
            let ms = chunk.delay.as_secs_f64() * 1000.0;
            assert!(ms >= 18.0, "delay {} below base", ms);
            assert!(ms <= 60.0 + 170.0 + 300.0 + 240.0 + 400.0 + 480.0);
        }
    }

    #[test]
    fn test_multibyte_text_is_not_split() {
        let message = "Überblick: 🌞 Solar • ✅ Wind • 水";
        let mut rng = StdRng::seed_from_u64(3);
        let chunks = plan_chunks(message, &mut rng);
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(joined, message);
    }

    #[test]
    fn test_empty_message_has_no_chunks() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(plan_chunks("", &mut rng).is_empty());
    }

    #[tokio::test]
    async fn test_zero_time_scale_streams_immediately() {
        let streamer = AnswerStreamer::new(&AssistantConfig {
            streaming: true,
            time_scale: 0.0,
            thinking_step_ms: 900,
            shortlist_preselect: 5,
        });
        streamer.think().await;

        let mut out = Vec::new();
        streamer.stream_to("Hello, world.", &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hello, world.\n");
    }
}

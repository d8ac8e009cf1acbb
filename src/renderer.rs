//! # Observation Rendering
//!
//! Turns observations into terminal text: a detailed card for a single beach
//! and a compact table with a wave-height bar chart for all beaches.
//! Simulated readings are flagged so nobody paddles out on made-up data.

use crate::simulate;
use crate::Observation;

/// Bar chart scale: one block per 0.25 m, capped at 4 m.
const BAR_STEP_M: f64 = 0.25;
const BAR_MAX_M: f64 = 4.0;

/// Format a value with one decimal, dropping a trailing ".0".
fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn is_simulated(obs: &Observation) -> bool {
    obs.source == simulate::SOURCE
}

/// Horizontal bar proportional to wave height.
fn wave_bar(height_m: f64) -> String {
    let blocks = (height_m.clamp(0.0, BAR_MAX_M) / BAR_STEP_M).round() as usize;
    "█".repeat(blocks)
}

/// Multi-line report for one beach.
pub fn render_report(obs: &Observation) -> String {
    let mut out = String::new();
    if is_simulated(obs) {
        out.push_str("⚠ SIMULADO: no provider available, values are estimates\n\n");
    }
    out.push_str(&format!("{}\n", obs.location));
    out.push_str(&format!("{}\n", "─".repeat(obs.location.chars().count().max(12))));
    out.push_str(&format!(
        "Ondas:    {} m de {} ({} s)\n",
        format_measure(obs.wave_height_m),
        obs.wave_direction,
        format_measure(obs.wave_period_s)
    ));
    out.push_str(&format!(
        "Vento:    {} km/h de {}\n",
        format_measure(obs.wind_speed_kmh),
        obs.wind_direction
    ));
    out.push_str(&format!(
        "Água:     {} °C\n",
        format_measure(obs.water_temperature_c)
    ));
    out.push_str(&format!(
        "Fonte:    {} ({})\n",
        obs.source,
        obs.timestamp.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

/// One line per beach with a wave-height bar.
pub fn render_table(observations: &[Observation]) -> String {
    let name_width = observations
        .iter()
        .map(|o| o.location.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut out = String::new();
    for obs in observations {
        let padding = " ".repeat(name_width - obs.location.chars().count());
        out.push_str(&format!(
            "{}{} {:>4} m {:<2} {:>4} s │{:<16}│ vento {:>4} km/h {:<2}{}\n",
            obs.location,
            padding,
            format!("{:.1}", obs.wave_height_m),
            obs.wave_direction.abbrev(),
            format!("{:.0}", obs.wave_period_s),
            wave_bar(obs.wave_height_m),
            format!("{:.0}", obs.wind_speed_kmh),
            obs.wind_direction.abbrev(),
            if is_simulated(obs) { " ⚠" } else { "" },
        ));
    }

    let simulated = observations.iter().filter(|o| is_simulated(o)).count();
    if simulated > 0 {
        out.push_str(&format!("\n⚠ {} of {} readings simulated\n", simulated, observations.len()));
    }
    out
}

/// Print observations to stdout: a card for one, a table for several.
pub fn draw_ascii(observations: &[Observation]) {
    match observations {
        [single] => print!("{}", render_report(single)),
        many => print!("{}", render_table(many)),
    }
}

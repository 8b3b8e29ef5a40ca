use super::match_engine::MatchEngine;
use crate::models::MatchEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================
// Highlights
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightType {
    Century,
    Wicket,
    HalfCentury,
    Six,
    Four,
}

impl HighlightType {
    /// Priority for sorting (higher = more important)
    pub fn priority(&self) -> u8 {
        match self {
            HighlightType::Century => 100,
            HighlightType::Wicket => 80,
            HighlightType::HalfCentury => 70,
            HighlightType::Six => 60,
            HighlightType::Four => 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub highlight_type: HighlightType,
    pub priority: u8,
    pub innings: u8,
    /// Ball label of the delivery, e.g. `"14.3"`.
    pub ball: String,
    /// Batsman for boundaries and milestones, dismissed batsman for wickets.
    pub player_id: String,
    pub description: String,
}

impl Highlight {
    fn from_event(event: &MatchEvent, highlight_type: HighlightType, description: String) -> Self {
        Self {
            highlight_type,
            priority: highlight_type.priority(),
            innings: event.innings,
            ball: event.ball.clone(),
            player_id: event.striker.clone(),
            description,
        }
    }
}

/// Pick boundaries, wickets and batting milestones out of a chronological
/// event stream. Output is ordered by priority, chronological within a tier.
/// `player_name` resolves a player id for milestone descriptions.
pub fn generate_highlights<'a>(
    events: impl IntoIterator<Item = &'a MatchEvent>,
    player_name: impl Fn(&str) -> String,
) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    let mut tallies: HashMap<(u8, &str), u32> = HashMap::new();

    for event in events {
        if event.is_wicket {
            highlights.push(Highlight::from_event(event, HighlightType::Wicket, event.description.clone()));
            continue;
        }

        if event.is_boundary() {
            let kind = if event.runs == 6 { HighlightType::Six } else { HighlightType::Four };
            highlights.push(Highlight::from_event(event, kind, event.description.clone()));
        }

        let bat_runs = event.bat_runs();
        if bat_runs == 0 {
            continue;
        }
        let tally = tallies.entry((event.innings, event.striker.as_str())).or_insert(0);
        let before = *tally;
        *tally += bat_runs;

        for (mark, kind) in [(50, HighlightType::HalfCentury), (100, HighlightType::Century)] {
            if before < mark && *tally >= mark {
                let description = format!("{} reaches {} ({})", player_name(&event.striker), mark, event.ball);
                highlights.push(Highlight::from_event(event, kind, description));
            }
        }
    }

    // Stable: equal priorities stay in match order.
    highlights.sort_by(|a, b| b.priority.cmp(&a.priority));
    highlights
}

impl MatchEngine {
    pub fn highlights(&self) -> Vec<Highlight> {
        generate_highlights(self.events().iter().rev(), |id| self.player_name(id).to_string())
    }
}

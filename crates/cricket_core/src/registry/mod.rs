//! Process-wide registry of live matches.
//!
//! Several scorers may share one match. Each match sits behind its own
//! `Mutex`, so commands against one match are applied one at a time while
//! different matches proceed independently. The map lock is held only long
//! enough to clone the handle.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::config::ScoringConfig;
use crate::engine::MatchEngine;
use crate::error::{Result, ScoringError};
use crate::models::MatchSetup;

pub type SharedMatch = Arc<Mutex<MatchEngine>>;

/// Global match registry singleton
pub static MATCHES: Lazy<RwLock<HashMap<String, SharedMatch>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Build and register a new match. Returns its id.
pub fn create_match(setup: MatchSetup, config: ScoringConfig) -> Result<String> {
    register(MatchEngine::new(setup, config)?)
}

pub fn register(engine: MatchEngine) -> Result<String> {
    let id = engine.id().to_string();
    let mut matches = MATCHES.write().unwrap_or_else(PoisonError::into_inner);
    if matches.contains_key(&id) {
        return Err(ScoringError::InvalidSetup(format!("Match {id} is already registered")));
    }
    matches.insert(id.clone(), Arc::new(Mutex::new(engine)));
    tracing::info!(match_id = %id, live = matches.len(), "match registered");
    Ok(id)
}

pub fn get_match(match_id: &str) -> Result<SharedMatch> {
    MATCHES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(match_id)
        .cloned()
        .ok_or_else(|| ScoringError::UnknownMatch(match_id.to_string()))
}

/// Run `f` with exclusive access to one match.
pub fn with_match<R>(match_id: &str, f: impl FnOnce(&mut MatchEngine) -> R) -> Result<R> {
    let handle = get_match(match_id)?;
    // Engine commands either apply fully or not at all, so a poisoned
    // lock still guards a consistent engine.
    let mut engine = handle.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(f(&mut engine))
}

pub fn remove_match(match_id: &str) -> Result<()> {
    let removed = MATCHES.write().unwrap_or_else(PoisonError::into_inner).remove(match_id);
    match removed {
        Some(_) => {
            tracing::info!(match_id, "match removed");
            Ok(())
        }
        None => Err(ScoringError::UnknownMatch(match_id.to_string())),
    }
}

/// Registered match ids, sorted.
pub fn match_ids() -> Vec<String> {
    let mut ids: Vec<String> =
        MATCHES.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect();
    ids.sort();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_setup;
    use std::thread;

    fn fresh_setup() -> MatchSetup {
        let mut setup = make_setup(20);
        setup.id = None;
        setup
    }

    #[test]
    fn test_create_and_remove() {
        let id = create_match(fresh_setup(), ScoringConfig::default()).unwrap();
        assert!(match_ids().contains(&id));

        let phase = with_match(&id, |engine| engine.phase()).unwrap();
        assert_eq!(phase, crate::engine::MatchPhase::AwaitingOpeners);

        remove_match(&id).unwrap();
        assert!(matches!(with_match(&id, |_| ()), Err(ScoringError::UnknownMatch(_))));
        assert!(remove_match(&id).is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut setup = make_setup(20);
        setup.id = Some(format!("dup-{}", uuid::Uuid::new_v4()));
        let id = create_match(setup.clone(), ScoringConfig::default()).unwrap();
        assert!(matches!(
            create_match(setup, ScoringConfig::default()),
            Err(ScoringError::InvalidSetup(_))
        ));
        remove_match(&id).unwrap();
    }

    #[test]
    fn test_concurrent_scorers_are_serialized() {
        let id = create_match(fresh_setup(), ScoringConfig::default()).unwrap();
        with_match(&id, |engine| {
            engine.select_openers("a1", "a2").unwrap();
            engine.select_bowler("b11").unwrap();
        })
        .unwrap();

        // Four scorers each record one dot; the over count must come out exact.
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let id = id.clone();
                thread::spawn(move || with_match(&id, |engine| engine.record_runs(0)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let balls = with_match(&id, |engine| engine.current_innings().balls).unwrap();
        assert_eq!(balls, 4);
        remove_match(&id).unwrap();
    }
}

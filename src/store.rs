//! In-process data store: runs, tournament results, bracket snapshots, analyses, labs.

use crate::logic::{DifficultyAnalysis, Pagination};
use crate::models::{
    normalize_league, Bracket, Run, RunCategory, RunId, StatsError, TournamentResult, UserLabs,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use uuid::Uuid;

/// All brackets of one league's tournament on one date.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub league: String,
    pub tournament_date: NaiveDate,
    pub brackets: Vec<Bracket>,
    pub imported_at: DateTime<Utc>,
}

/// A persisted difficulty analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub discord_user_id: String,
    pub run_id: Option<RunId>,
    pub league: String,
    pub tournament_date: NaiveDate,
    pub analyzed_at: DateTime<Utc>,
    pub analysis: DifficultyAnalysis,
}

/// Which of a user's runs to list.
#[derive(Clone, Debug, Default)]
pub struct RunFilter {
    pub pagination: Pagination,
    pub category: Option<RunCategory>,
    pub session: Option<String>,
}

#[derive(Default)]
pub struct Store {
    runs: HashMap<RunId, Run>,
    tournament_results: HashMap<String, Vec<TournamentResult>>,
    /// Keyed by (normalized league, tournament date).
    brackets: BTreeMap<(String, NaiveDate), BracketSnapshot>,
    analyses: Vec<AnalysisRecord>,
    labs: HashMap<String, UserLabs>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_run(&mut self, run: Run) -> RunId {
        let id = run.id;
        self.runs.insert(id, run);
        id
    }

    /// Every run of the user, newest first.
    pub fn user_runs(&self, user: &str) -> Vec<Run> {
        let mut runs: Vec<Run> = self
            .runs
            .values()
            .filter(|r| r.is_owned_by(user))
            .cloned()
            .collect();
        runs.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        runs
    }

    /// One page of the user's runs, newest first, optionally narrowed by category/session.
    pub fn runs_for(&self, user: &str, filter: &RunFilter) -> Vec<Run> {
        self.user_runs(user)
            .into_iter()
            .filter(|r| filter.category.map_or(true, |c| r.category == Some(c)))
            .filter(|r| {
                filter
                    .session
                    .as_deref()
                    .map_or(true, |s| r.session_name.as_deref() == Some(s))
            })
            .skip(filter.pagination.offset)
            .take(filter.pagination.limit)
            .collect()
    }

    pub fn get_run(&self, id: RunId) -> Option<&Run> {
        self.runs.get(&id)
    }

    /// Remove a run. With a user given, runs owned by someone else read as missing.
    pub fn delete_run(&mut self, id: RunId, user: Option<&str>) -> Result<Run, StatsError> {
        match self.runs.get(&id) {
            Some(run) if user.map_or(true, |u| run.is_owned_by(u)) => {}
            _ => return Err(StatsError::RunNotFound(id)),
        }
        self.runs.remove(&id).ok_or(StatsError::RunNotFound(id))
    }

    pub fn set_run_category(
        &mut self,
        id: RunId,
        category: Option<RunCategory>,
        user: Option<&str>,
    ) -> Result<&Run, StatsError> {
        match self.runs.get_mut(&id) {
            Some(run) if user.map_or(true, |u| run.is_owned_by(u)) => {
                run.category = category;
                Ok(run)
            }
            _ => Err(StatsError::RunNotFound(id)),
        }
    }

    /// Distinct session names the user has used, sorted.
    pub fn sessions(&self, user: &str) -> Vec<String> {
        self.runs
            .values()
            .filter(|r| r.is_owned_by(user))
            .filter_map(|r| r.session_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn add_tournament_results(&mut self, user: &str, results: Vec<TournamentResult>) -> usize {
        let count = results.len();
        self.tournament_results
            .entry(user.to_string())
            .or_default()
            .extend(results);
        count
    }

    pub fn tournament_results(&self, user: &str) -> &[TournamentResult] {
        self.tournament_results
            .get(user)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Store a snapshot, replacing any earlier import for the same league and date.
    pub fn import_brackets(
        &mut self,
        league: &str,
        tournament_date: NaiveDate,
        brackets: Vec<Bracket>,
    ) -> &BracketSnapshot {
        let league = normalize_league(league);
        let key = (league.clone(), tournament_date);
        self.brackets.insert(
            key.clone(),
            BracketSnapshot {
                league,
                tournament_date,
                brackets,
                imported_at: Utc::now(),
            },
        );
        &self.brackets[&key]
    }

    /// Most recent snapshot for the league.
    pub fn latest_brackets(&self, league: &str) -> Option<&BracketSnapshot> {
        let league = normalize_league(league);
        self.brackets
            .iter()
            .filter(|((l, _), _)| *l == league)
            .max_by_key(|((_, date), _)| *date)
            .map(|(_, snapshot)| snapshot)
    }

    pub fn save_analysis(&mut self, record: AnalysisRecord) -> &AnalysisRecord {
        self.analyses.push(record);
        &self.analyses[self.analyses.len() - 1]
    }

    /// The user's analyses, newest first.
    pub fn analyses_for_user(&self, user: &str, limit: usize) -> Vec<&AnalysisRecord> {
        let mut records: Vec<&AnalysisRecord> = self
            .analyses
            .iter()
            .filter(|a| a.discord_user_id == user)
            .collect();
        records.sort_by(|a, b| b.analyzed_at.cmp(&a.analyzed_at));
        records.truncate(limit);
        records
    }

    /// Latest analysis linked to the run.
    pub fn analysis_for_run(&self, run_id: RunId) -> Option<&AnalysisRecord> {
        self.analyses
            .iter()
            .filter(|a| a.run_id == Some(run_id))
            .max_by_key(|a| a.analyzed_at)
    }

    pub fn upsert_labs(&mut self, labs: UserLabs) -> &UserLabs {
        let key = labs.discord_id.clone();
        self.labs.insert(key.clone(), labs);
        &self.labs[&key]
    }

    pub fn labs(&self, discord_id: &str) -> Option<&UserLabs> {
        self.labs.get(discord_id)
    }
}

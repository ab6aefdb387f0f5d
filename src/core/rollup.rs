//! Budget rollup computation - the spending-aggregation engine.
//!
//! Turns a flat list of dated expenditure records into per-team and
//! per-member totals, remaining-budget figures, and usage percentages.
//! The engine is pure: it takes snapshotted in-memory collections, performs
//! no I/O, and calling it twice with identical inputs yields identical
//! output. Unresolvable foreign keys degrade gracefully instead of
//! aborting: an expenditure pointing at a deleted member still counts
//! toward its team's total (tracked separately as "assigned-but-unknown"),
//! and an expenditure pointing at an unknown team is excluded from every
//! rollup.

use crate::entities::{expenditure, member, team};
use serde::Serialize;
use std::collections::HashMap;

/// Spending rollup for a single member of a team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRollup {
    /// The member being reported on
    pub member: member::Model,
    /// Sum of this member's expenditure amounts for the period
    pub total_spent: f64,
    /// Share of the member's individual budget used, as a percentage.
    /// `None` for leaders (unlimited budget, never divided);
    /// `Some(0.0)` when a non-leader's budget is unset.
    pub percentage_used: Option<f64>,
}

/// Spending rollup for a single team over one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRollup {
    /// The team being reported on
    pub team: team::Model,
    /// The team's configured monthly budget
    pub total_budget: f64,
    /// Sum of all expenditure amounts attributed to this team,
    /// regardless of member assignment or resolution
    pub total_spent: f64,
    /// `total_budget - total_spent`; negative means overspent
    pub remaining: f64,
    /// Share of the budget used, as a percentage; 0 when the budget is 0
    pub percentage_used: f64,
    /// Spending with no member attached (`member_id` of `None`)
    pub unassigned_spending: f64,
    /// Spending assigned to a member id that no longer resolves.
    /// Distinct from unassigned: the record is assigned, just unknown.
    pub unresolved_spending: f64,
    /// Per-member rollups, in the order the members were supplied
    pub members: Vec<MemberRollup>,
    /// This team's expenditures for the period, for display
    pub expenditures: Vec<expenditure::Model>,
}

/// Overall totals across all teams, for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Sum of all team budgets
    pub total_budget: f64,
    /// Sum of all team spending
    pub total_spent: f64,
    /// `total_budget - total_spent`
    pub total_remaining: f64,
    /// Number of teams on the dashboard
    pub team_count: usize,
}

/// Computes percentage used with a divide-by-zero guard.
///
/// Returns 0 when the budget is zero (unset or unlimited), never `NaN` or
/// `Infinity`.
#[must_use]
pub fn percentage_used(spent: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        (spent / budget) * 100.0
    } else {
        0.0
    }
}

/// Computes the spending rollup for one team.
///
/// `members` and `expenditures` may be the full collections; both are
/// partitioned by `team_id` internally, so callers that pre-filter by team
/// get identical results. Expenditures are walked exactly once:
///
/// - `member_id` of `None` accumulates into `unassigned_spending`
/// - a resolvable `member_id` accumulates into that member's total
/// - an unresolvable `member_id` accumulates into `unresolved_spending`
///
/// The team total is the sum of all three buckets, so it always equals the
/// sum of the team's expenditure amounts independent of member resolution.
#[must_use]
pub fn compute_team_rollup(
    team: &team::Model,
    members: &[member::Model],
    expenditures: &[expenditure::Model],
) -> TeamRollup {
    let team_members: Vec<&member::Model> =
        members.iter().filter(|m| m.team_id == team.id).collect();

    let mut member_totals: HashMap<&str, f64> = team_members
        .iter()
        .map(|m| (m.id.as_str(), 0.0))
        .collect();

    let mut team_expenditures = Vec::new();
    let mut unassigned_spending = 0.0;
    let mut unresolved_spending = 0.0;

    for exp in expenditures.iter().filter(|e| e.team_id == team.id) {
        match exp.member_id.as_deref() {
            None => unassigned_spending += exp.amount,
            Some(member_id) => {
                if let Some(total) = member_totals.get_mut(member_id) {
                    *total += exp.amount;
                } else {
                    unresolved_spending += exp.amount;
                }
            }
        }
        team_expenditures.push(exp.clone());
    }

    let member_rollups: Vec<MemberRollup> = team_members
        .iter()
        .map(|m| {
            let total_spent = member_totals.get(m.id.as_str()).copied().unwrap_or(0.0);
            let pct = if m.is_leader {
                None
            } else {
                Some(percentage_used(total_spent, m.budget))
            };
            MemberRollup {
                member: (*m).clone(),
                total_spent,
                percentage_used: pct,
            }
        })
        .collect();

    let member_spending: f64 = member_rollups.iter().map(|m| m.total_spent).sum();
    let total_spent = member_spending + unassigned_spending + unresolved_spending;
    let total_budget = team.budget;

    TeamRollup {
        team: team.clone(),
        total_budget,
        total_spent,
        remaining: total_budget - total_spent,
        percentage_used: percentage_used(total_spent, total_budget),
        unassigned_spending,
        unresolved_spending,
        members: member_rollups,
        expenditures: team_expenditures,
    }
}

/// Computes rollups for every team in the supplied order.
///
/// Expenditures whose `team_id` matches no known team are orphaned data and
/// appear in no rollup; they remain visible only through their historical
/// display fields.
#[must_use]
pub fn compute_rollups(
    teams: &[team::Model],
    members: &[member::Model],
    expenditures: &[expenditure::Model],
) -> Vec<TeamRollup> {
    teams
        .iter()
        .map(|team| compute_team_rollup(team, members, expenditures))
        .collect()
}

/// Aggregates team rollups into the dashboard header totals.
#[must_use]
pub fn compute_dashboard_summary(rollups: &[TeamRollup]) -> DashboardSummary {
    let total_budget: f64 = rollups.iter().map(|r| r.total_budget).sum();
    let total_spent: f64 = rollups.iter().map(|r| r.total_spent).sum();

    DashboardSummary {
        total_budget,
        total_spent,
        total_remaining: total_budget - total_spent,
        team_count: rollups.len(),
    }
}

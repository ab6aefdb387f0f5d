//! JSON-file fallback record store.
//!
//! Used when no `DATABASE_URL` is configured, mirroring the original
//! deployment's browser-local fallback. The whole dataset lives in one
//! JSON document, loaded at open and rewritten after every mutation.
//! Behavior matches [`super::DatabaseStore`]: same validation, same
//! cascade and historical-stamping semantics, same ordering.

use crate::core::dates::month_bounds;
use crate::entities::{expenditure, member, team};
use crate::errors::{Error, Result};
use crate::store::{
    ExpenditurePatch, MemberPatch, NewExpenditure, NewMember, NewTeam, RecordStore, TeamPatch,
    compute_amount, initial_member_budget, new_id, validate_money, validate_name,
    validate_quantity,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// On-disk document holding the whole dataset.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct LocalData {
    teams: Vec<team::Model>,
    members: Vec<member::Model>,
    expenditures: Vec<expenditure::Model>,
}

/// Record store backed by a single JSON file.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    data: Mutex<LocalData>,
}

impl LocalStore {
    /// Opens the store at `path`, loading existing data if the file exists.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            LocalData::default()
        };
        debug!(path = %path.display(), "opened local store");
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    fn guard(&self) -> Result<MutexGuard<'_, LocalData>> {
        self.data.lock().map_err(|_| Error::Config {
            message: "local store lock poisoned".to_string(),
        })
    }

    fn persist(&self, data: &LocalData) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl RecordStore for LocalStore {
    async fn list_teams(&self) -> Result<Vec<team::Model>> {
        let data = self.guard()?;
        let mut teams = data.teams.clone();
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(teams)
    }

    async fn get_team(&self, id: &str) -> Result<Option<team::Model>> {
        let data = self.guard()?;
        Ok(data.teams.iter().find(|t| t.id == id).cloned())
    }

    async fn create_team(&self, new: NewTeam) -> Result<team::Model> {
        let name = validate_name(&new.name, "Team")?;
        let budget = validate_money(new.budget)?;

        let model = team::Model {
            id: new_id(),
            name,
            budget,
            color: new.color,
            created_at: chrono::Utc::now(),
        };

        let mut data = self.guard()?;
        data.teams.push(model.clone());
        self.persist(&data)?;
        Ok(model)
    }

    async fn update_team(&self, id: &str, patch: TeamPatch) -> Result<team::Model> {
        let name = match patch.name {
            Some(n) => Some(validate_name(&n, "Team")?),
            None => None,
        };
        let budget = match patch.budget {
            Some(b) => Some(validate_money(b)?),
            None => None,
        };

        let mut data = self.guard()?;
        let team = data
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TeamNotFound { id: id.to_string() })?;

        if let Some(name) = name {
            team.name = name;
        }
        if let Some(budget) = budget {
            team.budget = budget;
        }
        if let Some(color) = patch.color {
            team.color = color;
        }

        let updated = team.clone();
        self.persist(&data)?;
        Ok(updated)
    }

    async fn delete_team(&self, id: &str) -> Result<()> {
        let mut data = self.guard()?;
        if !data.teams.iter().any(|t| t.id == id) {
            return Err(Error::TeamNotFound { id: id.to_string() });
        }

        data.teams.retain(|t| t.id != id);
        data.members.retain(|m| m.team_id != id);
        data.expenditures.retain(|e| e.team_id != id);
        self.persist(&data)
    }

    async fn list_members(&self, team_id: Option<&str>) -> Result<Vec<member::Model>> {
        let data = self.guard()?;
        let mut members: Vec<member::Model> = data
            .members
            .iter()
            .filter(|m| team_id.is_none_or(|id| m.team_id == id))
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    async fn create_member(&self, new: NewMember) -> Result<member::Model> {
        let name = validate_name(&new.name, "Member")?;

        let mut data = self.guard()?;
        if !data.teams.iter().any(|t| t.id == new.team_id) {
            return Err(Error::TeamNotFound { id: new.team_id });
        }

        let model = member::Model {
            id: new_id(),
            team_id: new.team_id,
            name,
            is_leader: new.is_leader,
            budget: initial_member_budget(new.is_leader),
        };

        data.members.push(model.clone());
        self.persist(&data)?;
        Ok(model)
    }

    async fn update_member(&self, id: &str, patch: MemberPatch) -> Result<member::Model> {
        let name = match patch.name {
            Some(n) => Some(validate_name(&n, "Member")?),
            None => None,
        };
        let budget = match patch.budget {
            Some(b) => Some(validate_money(b)?),
            None => None,
        };

        let mut data = self.guard()?;
        let member = data
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::MemberNotFound { id: id.to_string() })?;

        if budget.is_some() && member.is_leader {
            return Err(Error::Config {
                message: "Leaders carry no budget cap".to_string(),
            });
        }

        if let Some(name) = name {
            member.name = name;
        }
        if let Some(budget) = budget {
            member.budget = budget;
        }

        let updated = member.clone();
        self.persist(&data)?;
        Ok(updated)
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        let mut data = self.guard()?;
        let position = data
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Error::MemberNotFound { id: id.to_string() })?;
        let removed = data.members.remove(position);

        // Keep the expenditures; stamp the display fallback
        for exp in data
            .expenditures
            .iter_mut()
            .filter(|e| e.member_id.as_deref() == Some(id))
        {
            exp.member_name_historical = Some(removed.name.clone());
        }

        self.persist(&data)
    }

    async fn list_expenditures(
        &self,
        month: Option<(i32, u32)>,
    ) -> Result<Vec<expenditure::Model>> {
        let bounds = match month {
            Some((year, m)) => Some(month_bounds(year, m)?),
            None => None,
        };

        let data = self.guard()?;
        let mut expenditures: Vec<expenditure::Model> = data
            .expenditures
            .iter()
            .filter(|e| bounds.is_none_or(|(first, last)| e.date >= first && e.date <= last))
            .cloned()
            .collect();
        expenditures.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(expenditures)
    }

    async fn create_expenditure(&self, new: NewExpenditure) -> Result<expenditure::Model> {
        let unit_price = validate_money(new.unit_price)?;
        let quantity = validate_quantity(new.quantity)?;
        let description = validate_name(&new.description, "Expenditure")?;

        let mut data = self.guard()?;
        if !data.teams.iter().any(|t| t.id == new.team_id) {
            return Err(Error::TeamNotFound { id: new.team_id });
        }
        if let Some(member_id) = &new.member_id {
            let member = data
                .members
                .iter()
                .find(|m| &m.id == member_id)
                .ok_or_else(|| Error::MemberNotFound {
                    id: member_id.clone(),
                })?;
            if member.team_id != new.team_id {
                return Err(Error::Config {
                    message: format!(
                        "Member {member_id} does not belong to team {}",
                        new.team_id
                    ),
                });
            }
        }

        let model = expenditure::Model {
            id: new_id(),
            team_id: new.team_id,
            member_id: new.member_id,
            unit_price,
            quantity,
            amount: compute_amount(unit_price, quantity),
            description,
            date: new.date,
            created_at: chrono::Utc::now(),
            team_name_historical: None,
            member_name_historical: None,
        };

        data.expenditures.push(model.clone());
        self.persist(&data)?;
        Ok(model)
    }

    async fn update_expenditure(
        &self,
        id: &str,
        patch: ExpenditurePatch,
    ) -> Result<expenditure::Model> {
        let mut data = self.guard()?;
        let position = data
            .expenditures
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::ExpenditureNotFound { id: id.to_string() })?;

        if let Some(Some(member_id)) = &patch.member_id {
            let team_id = &data.expenditures[position].team_id;
            let member = data
                .members
                .iter()
                .find(|m| &m.id == member_id)
                .ok_or_else(|| Error::MemberNotFound {
                    id: member_id.clone(),
                })?;
            if &member.team_id != team_id {
                return Err(Error::Config {
                    message: format!("Member {member_id} does not belong to team {team_id}"),
                });
            }
        }

        // Validate everything before touching the record so a failed patch
        // leaves the in-memory state untouched.
        let unit_price = match patch.unit_price {
            Some(p) => Some(validate_money(p)?),
            None => None,
        };
        let quantity = match patch.quantity {
            Some(q) => Some(validate_quantity(q)?),
            None => None,
        };
        let description = match patch.description {
            Some(d) => Some(validate_name(&d, "Expenditure")?),
            None => None,
        };

        let exp = &mut data.expenditures[position];
        if let Some(assignment) = patch.member_id {
            exp.member_id = assignment;
            exp.member_name_historical = None;
        }
        if let Some(unit_price) = unit_price {
            exp.unit_price = unit_price;
        }
        if let Some(quantity) = quantity {
            exp.quantity = quantity;
        }
        if let Some(description) = description {
            exp.description = description;
        }
        if let Some(date) = patch.date {
            exp.date = date;
        }
        exp.amount = compute_amount(exp.unit_price, exp.quantity);

        let updated = exp.clone();
        self.persist(&data)?;
        Ok(updated)
    }

    async fn delete_expenditure(&self, id: &str) -> Result<()> {
        let mut data = self.guard()?;
        let position = data
            .expenditures
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::ExpenditureNotFound { id: id.to_string() })?;
        data.expenditures.remove(position);
        self.persist(&data)
    }
}

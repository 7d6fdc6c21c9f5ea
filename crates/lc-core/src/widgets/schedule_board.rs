//! Repayment schedule table with per-row agent assignment.
//!
//! Schedules and agents come from one composite fetch. Assignment is
//! two-phase: `begin_assign` validates and marks the row busy, the caller
//! dispatches the request, `finish_assign` applies the confirmed agent.

use std::collections::HashMap;

use lc_api_types::{Agent, AgentId, AssignResponse, LoanSchedule, ScheduleId};

use crate::error::{ApiError, ValidationError};
use crate::format::{display_date, rupees, PLACEHOLDER};
use crate::mutation::InFlight;
use crate::notice::Notice;
use crate::resource::{FetchTicket, Resource, ResourceState};

pub const SCHEDULES_FAILED: &str = "Failed to fetch repayment schedules.";
pub const ASSIGN_FAILED: &str = "Failed to assign agent.";

/// Result of the composite schedules + agents fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardData {
    pub schedules: Vec<LoanSchedule>,
    pub agents: Vec<Agent>,
}

impl From<(Vec<LoanSchedule>, Vec<Agent>)> for BoardData {
    fn from((schedules, agents): (Vec<LoanSchedule>, Vec<Agent>)) -> Self {
        Self { schedules, agents }
    }
}

impl BoardData {
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_by_username(&self, username: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.username == username)
    }
}

/// An assignment ready to be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignDispatch {
    pub schedule: ScheduleId,
    pub agent: AgentId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub id: ScheduleId,
    pub loan: String,
    pub installment_no: String,
    pub due_date: String,
    pub principal: String,
    pub interest: String,
    pub total_due: String,
    pub remaining_principal: String,
    pub status: String,
    pub assigned_agent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleBoard {
    data: Resource<BoardData>,
    selections: HashMap<ScheduleId, AgentId>,
    assigning: InFlight<ScheduleId>,
}

impl Default for ScheduleBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBoard {
    pub fn new() -> Self {
        Self {
            data: Resource::new(SCHEDULES_FAILED),
            selections: HashMap::new(),
            assigning: InFlight::new(),
        }
    }

    pub fn state(&self) -> &ResourceState<BoardData> {
        self.data.state()
    }

    pub fn data(&self) -> Option<&BoardData> {
        self.data.data()
    }

    pub fn activate(&mut self) -> FetchTicket {
        self.data.activate()
    }

    pub fn deactivate(&mut self) {
        self.data.deactivate();
    }

    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        result: Result<(Vec<LoanSchedule>, Vec<Agent>), ApiError>,
    ) -> bool {
        self.data.settle(ticket, result.map(BoardData::from))
    }

    /// Pick (or clear) the target agent for one row.
    pub fn select_agent(&mut self, schedule: ScheduleId, agent: Option<AgentId>) {
        match agent {
            Some(agent) => {
                self.selections.insert(schedule, agent);
            }
            None => {
                self.selections.remove(&schedule);
            }
        }
    }

    pub fn selection(&self, schedule: ScheduleId) -> Option<AgentId> {
        self.selections.get(&schedule).copied()
    }

    pub fn is_busy(&self, schedule: ScheduleId) -> bool {
        self.assigning.is_busy(&schedule)
    }

    /// Validate and mark the row busy.
    ///
    /// `Ok(None)` means an assignment for this row is already in flight and
    /// nothing should be sent.
    pub fn begin_assign(
        &mut self,
        schedule: ScheduleId,
    ) -> Result<Option<AssignDispatch>, ValidationError> {
        let agent = self
            .selection(schedule)
            .ok_or(ValidationError::NoAgentSelected)?;
        if !self.assigning.try_begin(schedule) {
            return Ok(None);
        }
        Ok(Some(AssignDispatch { schedule, agent }))
    }

    /// Clear the busy mark and, on success only, record the confirmed agent
    /// on the matching schedule.
    pub fn finish_assign(
        &mut self,
        dispatch: AssignDispatch,
        result: Result<AssignResponse, ApiError>,
    ) -> Notice {
        self.assigning.finish(&dispatch.schedule);
        match result {
            Ok(response) => {
                let confirmed = response.assigned_to.unwrap_or(dispatch.agent);
                let mut installment = None;
                self.data.patch(|board| {
                    if let Some(s) = board.schedules.iter_mut().find(|s| s.id == dispatch.schedule) {
                        s.assigned_to = Some(confirmed);
                        installment = Some(s.installment_no);
                    }
                });
                let agent = self
                    .data()
                    .and_then(|b| b.agent(confirmed))
                    .map(|a| a.username.clone())
                    .unwrap_or_else(|| format!("agent #{confirmed}"));
                let message = response.message.unwrap_or_else(|| match installment {
                    Some(n) => format!("Installment #{n} assigned to {agent}."),
                    None => format!("Schedule #{} assigned to {agent}.", dispatch.schedule),
                });
                tracing::info!(schedule = dispatch.schedule, agent = confirmed, "schedule assigned");
                Notice::success(message)
            }
            Err(err) => {
                tracing::warn!(schedule = dispatch.schedule, error = %err, "assignment failed");
                Notice::error(err.action_message(ASSIGN_FAILED))
            }
        }
    }

    pub fn rows(&self) -> Option<Vec<ScheduleRow>> {
        let board = self.data()?;
        Some(
            board
                .schedules
                .iter()
                .map(|s| ScheduleRow {
                    id: s.id,
                    loan: s.loan.to_string(),
                    installment_no: s.installment_no.to_string(),
                    due_date: display_date(&s.due_date),
                    principal: rupees(&s.principal_amount),
                    interest: rupees(&s.interest_amount),
                    total_due: rupees(&s.total_due),
                    remaining_principal: rupees(&s.remaining_principal),
                    status: if s.status.is_empty() {
                        "Pending".to_string()
                    } else {
                        s.status.clone()
                    },
                    assigned_agent: s
                        .assigned_to
                        .map(|id| {
                            board
                                .agent(id)
                                .map(|a| a.username.clone())
                                .unwrap_or_else(|| id.to_string())
                        })
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                })
                .collect(),
        )
    }
}

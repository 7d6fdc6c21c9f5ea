use lc_api_types::{Agent, LoanSchedule};

use crate::error::ApiError;
use crate::resource::{FetchTicket, Resource, ResourceState};
use crate::widgets::schedule_board::BoardData;

pub const ASSIGNED_FAILED: &str = "Failed to load assigned loan schedules.";
pub const NONE_ASSIGNED: &str = "No loan schedules have been assigned to you.";

/// The signed-in collection agent's own installments.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedLoans {
    board: Resource<BoardData>,
    username: Option<String>,
}

impl AssignedLoans {
    pub fn new(username: Option<String>) -> Self {
        Self {
            board: Resource::new(ASSIGNED_FAILED),
            username,
        }
    }

    pub fn state(&self) -> &ResourceState<BoardData> {
        self.board.state()
    }

    pub fn activate(&mut self) -> FetchTicket {
        self.board.activate()
    }

    pub fn deactivate(&mut self) {
        self.board.deactivate();
    }

    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        result: Result<(Vec<LoanSchedule>, Vec<Agent>), ApiError>,
    ) -> bool {
        self.board.settle(ticket, result.map(BoardData::from))
    }

    /// The agent record matching the session user.
    pub fn current_agent(&self) -> Option<&Agent> {
        let username = self.username.as_deref()?;
        self.board.data()?.agent_by_username(username)
    }

    /// Schedules assigned to the current agent. Empty when the user is not
    /// a known agent.
    pub fn assigned(&self) -> Option<Vec<LoanSchedule>> {
        let board = self.board.data()?;
        let Some(agent) = self.current_agent() else {
            return Some(Vec::new());
        };
        Some(
            board
                .schedules
                .iter()
                .filter(|s| s.assigned_to == Some(agent.id))
                .cloned()
                .collect(),
        )
    }
}

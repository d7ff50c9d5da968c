use std::fmt;

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TurnoverPolicy {
    /// Percentage of occupied seats vacated per month, in [0, 100].
    Rate(f64),
    /// Absolute seat count vacated per month.
    Seats(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthInput {
    pub membership_fee: f64,
    pub total_seats: u32,
    pub occupied_seats: u32,
    pub turnover: TurnoverPolicy,
    pub growth_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    pub month: u32,
    pub total_members_beginning: u32,
    pub total_members_end: u32,
    pub new_members: u32,
    pub available_seats_beginning: u32,
    pub available_seats_end: u32,
    pub mrr_beginning: f64,
    pub mrr_end: f64,
    pub net_new_revenue: f64,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_seats: u32,
    pub available_seats: u32,
    pub currently_occupied_seats: u32,
    pub member_revenue: f64,
    pub membership_fee: f64,
    pub turnover_seats_per_month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub summary: Summary,
    pub linear_growth: Vec<MonthRow>,
    pub steady_growth: Vec<MonthRow>,
    pub exponential_growth: Vec<MonthRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    InvalidInput { field: &'static str, reason: String },
    Overflow { month: u32 },
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::InvalidInput { field, reason } => {
                write!(f, "invalid {field}: {reason}")
            }
            ProjectError::Overflow { month } => {
                write!(f, "member count overflow in month {month}")
            }
        }
    }
}

impl std::error::Error for ProjectError {}

use super::types::{GrowthInput, MonthRow, ProjectError, Projection, Summary, TurnoverPolicy};

pub const HORIZON_MONTHS: u32 = 12;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Scenario {
    Linear,
    Steady,
    Exponential,
}

pub fn project(input: &GrowthInput) -> Result<Projection, ProjectError> {
    validate(input)?;
    Ok(Projection {
        summary: build_summary(input),
        linear_growth: run_scenario(input, Scenario::Linear)?,
        steady_growth: run_scenario(input, Scenario::Steady)?,
        exponential_growth: run_scenario(input, Scenario::Exponential)?,
    })
}

pub fn validate(input: &GrowthInput) -> Result<(), ProjectError> {
    if !input.membership_fee.is_finite() || input.membership_fee <= 0.0 {
        return Err(ProjectError::InvalidInput {
            field: "membershipFee",
            reason: "must be a finite positive amount".to_string(),
        });
    }

    if input.occupied_seats > input.total_seats {
        return Err(ProjectError::InvalidInput {
            field: "occupiedSeats",
            reason: format!(
                "cannot exceed totalSeats ({} > {})",
                input.occupied_seats, input.total_seats
            ),
        });
    }

    if let TurnoverPolicy::Rate(rate) = input.turnover {
        if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
            return Err(ProjectError::InvalidInput {
                field: "turnoverRate",
                reason: "must be between 0 and 100".to_string(),
            });
        }
    }

    if !input.growth_factor.is_finite() || input.growth_factor < 0.0 {
        return Err(ProjectError::InvalidInput {
            field: "growthFactor",
            reason: "must be a finite non-negative multiplier".to_string(),
        });
    }

    Ok(())
}

fn run_scenario(input: &GrowthInput, scenario: Scenario) -> Result<Vec<MonthRow>, ProjectError> {
    let total_seats = input.total_seats;
    let initial_available = total_seats - input.occupied_seats;
    // Even distribution of the month-0 free capacity across the horizon.
    let linear_intake = initial_available.div_ceil(HORIZON_MONTHS);

    let mut rows = Vec::with_capacity(HORIZON_MONTHS as usize);
    let mut members = input.occupied_seats;

    for month in 1..=HORIZON_MONTHS {
        let beginning = members;
        let vacated = vacated_seats(input.turnover, beginning);
        let after_turnover = beginning - vacated;
        let remaining_capacity = total_seats - after_turnover;

        let demanded = match scenario {
            Scenario::Linear => linear_intake,
            Scenario::Steady => vacated,
            Scenario::Exponential => {
                round_seats(f64::from(beginning) * input.growth_factor / 100.0)
            }
        };
        // Demand beyond remaining capacity is unfulfilled, not carried forward.
        let new_members = demanded.min(remaining_capacity);

        let end = after_turnover
            .checked_add(new_members)
            .filter(|end| *end <= total_seats)
            .ok_or(ProjectError::Overflow { month })?;

        let mrr_beginning = f64::from(beginning) * input.membership_fee;
        let mrr_end = f64::from(end) * input.membership_fee;
        let net_new_revenue = mrr_end - mrr_beginning;
        let growth_rate = if mrr_beginning == 0.0 {
            0.0
        } else {
            (mrr_end - mrr_beginning) / mrr_beginning * 100.0
        };

        rows.push(MonthRow {
            month,
            total_members_beginning: beginning,
            total_members_end: end,
            new_members,
            available_seats_beginning: total_seats - beginning,
            available_seats_end: total_seats - end,
            mrr_beginning,
            mrr_end,
            net_new_revenue,
            growth_rate,
        });

        members = end;
    }

    Ok(rows)
}

fn build_summary(input: &GrowthInput) -> Summary {
    Summary {
        total_seats: input.total_seats,
        available_seats: input.total_seats - input.occupied_seats,
        currently_occupied_seats: input.occupied_seats,
        member_revenue: f64::from(input.occupied_seats) * input.membership_fee,
        membership_fee: input.membership_fee,
        turnover_seats_per_month: vacated_seats(input.turnover, input.occupied_seats),
    }
}

// A fixed seat turnover cannot vacate more members than currently exist.
fn vacated_seats(policy: TurnoverPolicy, members_beginning: u32) -> u32 {
    let raw = match policy {
        TurnoverPolicy::Seats(seats) => seats,
        TurnoverPolicy::Rate(rate) => round_seats(f64::from(members_beginning) * rate / 100.0),
    };
    raw.min(members_beginning)
}

fn round_seats(value: f64) -> u32 {
    value.round() as u32
}

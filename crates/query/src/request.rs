use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{QueryError, Result};

const MIN_PASSENGERS: u32 = 1;
const MAX_PASSENGERS: u32 = 100;

/// Input to one route query (§4.H). `deadline` is an optional per-query
/// timeout (§5 "queries carry a deadline"); `None` means no enforced limit.
#[derive(Debug, Clone)]
pub struct RouteQueryRequest {
    pub from_city: String,
    pub to_city: String,
    pub date: NaiveDate,
    pub passengers: u32,
    pub deadline: Option<Duration>,
}

impl RouteQueryRequest {
    pub fn new(from_city: impl Into<String>, to_city: impl Into<String>, date: NaiveDate, passengers: u32) -> Self {
        Self { from_city: from_city.into(), to_city: to_city.into(), date, passengers, deadline: None }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.from_city.trim().is_empty() {
            return Err(QueryError::validation("fromCity must not be empty"));
        }
        if self.to_city.trim().is_empty() {
            return Err(QueryError::validation("toCity must not be empty"));
        }
        if !(MIN_PASSENGERS..=MAX_PASSENGERS).contains(&self.passengers) {
            return Err(QueryError::validation(format!(
                "passengers must be in [{MIN_PASSENGERS},{MAX_PASSENGERS}], got {}",
                self.passengers
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(passengers: u32) -> RouteQueryRequest {
        RouteQueryRequest::new("Якутск", "Москва", NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(), passengers)
    }

    #[test]
    fn rejects_zero_passengers() {
        assert!(request(0).validate().is_err());
    }

    #[test]
    fn rejects_over_capacity() {
        assert!(request(101).validate().is_err());
    }

    #[test]
    fn accepts_boundary_passenger_counts() {
        assert!(request(1).validate().is_ok());
        assert!(request(100).validate().is_ok());
    }

    #[test]
    fn rejects_empty_city() {
        let mut req = request(1);
        req.from_city = "  ".to_string();
        assert!(req.validate().is_err());
    }
}

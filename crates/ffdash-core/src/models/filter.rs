//! Query filters parsed from request parameters

use std::str::FromStr;

use crate::error::FilterError;

/// Token meaning "no filter" for both year and coach
pub const ALL: &str = "all";

/// Restrict a query to one season
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearFilter {
    #[default]
    All,
    Year(i64),
}

impl YearFilter {
    /// Parse an optional query parameter; missing, empty and `all` mean no filter
    pub fn from_param(value: Option<&str>) -> Result<Self, FilterError> {
        match value {
            None => Ok(Self::All),
            Some(v) => v.parse(),
        }
    }

    /// Value to bind into `(?N IS NULL OR year = ?N)`
    pub fn as_param(&self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Year(year) => Some(*year),
        }
    }
}

impl FromStr for YearFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        s.parse::<i64>()
            .map(Self::Year)
            .map_err(|_| FilterError::InvalidYear(s.to_string()))
    }
}

/// Restrict a query to one coach
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CoachFilter {
    #[default]
    All,
    Coach(String),
}

impl CoachFilter {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => Self::All,
            Some(v) if v.is_empty() || v == ALL => Self::All,
            Some(v) => Self::Coach(v.to_string()),
        }
    }

    pub fn as_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Coach(coach) => Some(coach),
        }
    }
}

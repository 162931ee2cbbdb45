use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::record::{Pedigree, PedigreeRecord};

const MALE: u8 = 1;
const FEMALE: u8 = 2;

/// Which sex counts as live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenderFilter {
    #[default]
    Both,
    Male,
    Female,
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Self::Both),
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!(
                "unrecognized gender `{other}`, expected both, male or female"
            )),
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Both => "both",
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

/// Rule deciding which individuals of a pedigree are live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LivenessFilter {
    /// Individuals born before this year are not live. A missing birth year
    /// never disqualifies.
    pub min_year: i32,
    pub gender: GenderFilter,
}

impl LivenessFilter {
    pub fn is_live(&self, record: &PedigreeRecord) -> bool {
        let excluded_gender = match self.gender {
            GenderFilter::Both => None,
            GenderFilter::Male => Some(FEMALE),
            GenderFilter::Female => Some(MALE),
        };
        if excluded_gender.is_some() && record.gender == excluded_gender {
            return false;
        }
        record.birth_year.is_none_or(|year| year >= self.min_year)
    }
}

impl Pedigree {
    /// Overwrites every record's `live` flag using `filter`.
    pub fn mark_live(&mut self, filter: &LivenessFilter) {
        let mut live = 0;
        for record in &mut self.records {
            let is_live = filter.is_live(record);
            live += usize::from(is_live);
            record.live = Some(is_live);
        }
        self.has_live = true;
        info!(
            live,
            total = self.records.len(),
            min_year = filter.min_year,
            gender = %filter.gender,
            "liveness marked"
        );
    }
}

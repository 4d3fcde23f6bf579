// 💵 Typed records - compensation, grants, ownership, governance, provenance
//
// Records reference entities by id only. The repository owns everything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// NATURAL KEYS
// ============================================================================

/// (company, person, fiscal-year-end): upsert key for compensation records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompensationKey {
    pub company_id: String,
    pub person_id: String,
    pub fiscal_year_end: NaiveDate,
}

// ============================================================================
// EXECUTIVE PAY
// ============================================================================

/// One Summary Compensation Table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveCompensation {
    pub company_id: String,
    pub person_id: String,
    pub fiscal_year_end: NaiveDate,

    pub salary_usd: f64,
    pub bonus_usd: f64,
    pub stock_awards_usd: f64,
    pub option_awards_usd: f64,
    pub non_equity_incentive_usd: f64,
    pub pension_change_usd: f64,
    pub all_other_comp_usd: f64,
    pub total_comp_usd: f64,

    pub source: String,
}

impl ExecutiveCompensation {
    pub fn key(&self) -> CompensationKey {
        CompensationKey {
            company_id: self.company_id.clone(),
            person_id: self.person_id.clone(),
            fiscal_year_end: self.fiscal_year_end,
        }
    }

    pub fn components_sum(&self) -> f64 {
        self.salary_usd
            + self.bonus_usd
            + self.stock_awards_usd
            + self.option_awards_usd
            + self.non_equity_incentive_usd
            + self.pension_change_usd
            + self.all_other_comp_usd
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveEquityGrant {
    pub company_id: String,
    pub person_id: String,
    pub grant_date: NaiveDate,
    /// "PSU", "RSU", "Option", ...
    pub award_type: String,
    pub threshold_units: i64,
    pub target_units: i64,
    pub max_units: i64,
    pub grant_date_fair_value_usd: f64,
    pub vesting_schedule_short: Option<String>,
    pub source: String,
}

// ============================================================================
// OWNERSHIP
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficialOwnershipRecord {
    pub company_id: String,
    pub person_id: String,
    pub role: String,
    pub total_shares: i64,
    pub sole_voting_power: i64,
    pub shared_voting_power: i64,
    pub percent_of_class: f64,
    pub as_of_date: NaiveDate,
    pub notes: Option<String>,
}

// ============================================================================
// BOARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorCompensation {
    pub company_id: String,
    pub person_id: String,
    pub fiscal_year_end: NaiveDate,
    pub fees_cash_usd: f64,
    pub stock_awards_usd: f64,
    pub all_other_comp_usd: f64,
    pub total_usd: f64,
    pub source: String,
}

impl DirectorCompensation {
    pub fn key(&self) -> CompensationKey {
        CompensationKey {
            company_id: self.company_id.clone(),
            person_id: self.person_id.clone(),
            fiscal_year_end: self.fiscal_year_end,
        }
    }

    pub fn components_sum(&self) -> f64 {
        self.fees_cash_usd + self.stock_awards_usd + self.all_other_comp_usd
    }
}

/// Governance metadata for one director at one company.
/// Not keyed: duplicates across files are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorProfile {
    pub company_id: String,
    pub person_id: String,
    pub role: String,
    pub independent: bool,
    pub director_since: Option<i64>,
    pub lead_independent_director: bool,
    pub committees: Option<String>,
    pub primary_occupation: Option<String>,
    pub other_public_boards: Option<String>,
}

/// One line of a board pay policy ("Annual Cash Retainer", 100000, "USD/yr")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorCompPolicy {
    pub company_id: String,
    pub component: String,
    pub amount_usd: f64,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

// ============================================================================
// PROVENANCE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceManifestEntry {
    pub company_id: String,
    pub file_path: String,
    pub description: String,
    pub last_updated: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Company,
    Person,
}

/// Two different display names landed on the same identifier.
/// The entities were merged anyway; this records that it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugCollision {
    pub kind: EntityKind,
    pub identifier: String,
    pub existing_name: String,
    pub incoming_name: String,
    pub source: String,
}

impl SlugCollision {
    pub fn describe(&self) -> String {
        format!(
            "{:?} id '{}' already belongs to '{}' but '{}' resolved to it ({})",
            self.kind, self.identifier, self.existing_name, self.incoming_name, self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(salary: f64, bonus: f64) -> ExecutiveCompensation {
        ExecutiveCompensation {
            company_id: "acme".into(),
            person_id: "jane_doe".into(),
            fiscal_year_end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            salary_usd: salary,
            bonus_usd: bonus,
            stock_awards_usd: 0.0,
            option_awards_usd: 0.0,
            non_equity_incentive_usd: 10.0,
            pension_change_usd: 0.0,
            all_other_comp_usd: 1.0,
            total_comp_usd: 0.0,
            source: "test".into(),
        }
    }

    #[test]
    fn test_components_sum() {
        let c = comp(100.0, 50.0);
        assert_eq!(c.components_sum(), 161.0);
    }

    #[test]
    fn test_key_ignores_amounts() {
        assert_eq!(comp(1.0, 2.0).key(), comp(3.0, 4.0).key());
    }
}

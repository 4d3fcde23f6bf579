//! Column alias catalog for every record category.
//!
//! Source files disagree on header names (`base_salary` vs `salary` vs
//! `salary_usd`). Each logical field gets one ordered alias list here; the
//! first present, non-empty column wins. Importers never spell header names
//! inline.

/// Ordered list of acceptable header names for one logical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aliases(pub &'static [&'static str]);

impl Aliases {
    pub const fn names(&self) -> &'static [&'static str] {
        self.0
    }

    /// Canonical (first) header name, used in diagnostics
    pub fn primary(&self) -> &'static str {
        self.0.first().copied().unwrap_or("")
    }
}

/// Columns any person-bearing row may carry
pub mod person {
    use super::Aliases;

    pub const PERSON_ID: Aliases = Aliases(&["person_id"]);
    pub const BIO_SHORT: Aliases = Aliases(&["bio_short"]);
    pub const LINKEDIN_URL: Aliases = Aliases(&["linkedin_url"]);
    pub const PHOTO_URL: Aliases = Aliases(&["photo_url"]);
    pub const YEARS_EXPERIENCE: Aliases = Aliases(&["years_experience", "experience_years"]);
    pub const EDUCATION: Aliases = Aliases(&["education", "education_background"]);
    pub const STATUS: Aliases = Aliases(&["status", "employment_status"]);
    pub const IS_EXECUTIVE: Aliases = Aliases(&["is_executive"]);
    pub const IS_DIRECTOR: Aliases = Aliases(&["is_director"]);
}

/// Company-level columns (manifest rows, and compensation rows that repeat them)
pub mod company {
    use super::Aliases;

    pub const NAME: Aliases = Aliases(&["company_name", "name"]);
    pub const TICKER: Aliases = Aliases(&["ticker", "symbol", "stock_ticker"]);
    pub const FISCAL_YEAR_END: Aliases = Aliases(&["fiscal_year_end", "year_end"]);
    pub const SOURCE_URL: Aliases = Aliases(&["source_url"]);
    pub const NOTES: Aliases = Aliases(&["notes"]);
    pub const SECTOR: Aliases = Aliases(&["sector"]);
    pub const MARKET_CAP: Aliases = Aliases(&["market_cap_usd", "market_cap"]);
    pub const REVENUE: Aliases = Aliases(&["revenue_usd", "revenue"]);
    pub const CAP_BUDGET: Aliases = Aliases(&["cap_budget_usd", "exec_budget_usd", "exec_budget"]);
    pub const FOUNDED_YEAR: Aliases = Aliases(&["founded_year", "founded"]);
}

pub mod manifest {
    use super::Aliases;

    pub const FILE_PATH: Aliases = Aliases(&["file_path", "file"]);
    pub const DESCRIPTION: Aliases = Aliases(&["description", "what"]);
    pub const LAST_UPDATED: Aliases = Aliases(&["last_updated"]);
}

pub mod executive_compensation {
    use super::Aliases;

    pub const FULL_NAME: Aliases = Aliases(&["full_name", "executive_name", "name"]);
    pub const TITLE: Aliases = Aliases(&["current_title", "title", "position"]);
    pub const COMPANY_NAME: Aliases = Aliases(&["company_name"]);
    pub const TICKER: Aliases = Aliases(&["ticker"]);
    pub const SOURCE_URL: Aliases = Aliases(&["source_url"]);
    pub const FISCAL_YEAR_END: Aliases = Aliases(&["fiscal_year_end"]);

    pub const SALARY: Aliases =
        Aliases(&["salary_usd", "base_salary_usd", "base_salary", "salary"]);
    pub const BONUS: Aliases = Aliases(&["bonus_usd", "cash_bonus_usd", "bonus", "cash_bonus"]);
    pub const STOCK_AWARDS: Aliases = Aliases(&[
        "stock_awards_usd",
        "stock_awards_fair_value_usd",
        "stock_awards",
        "stock_awards_value",
    ]);
    pub const OPTION_AWARDS: Aliases = Aliases(&[
        "option_awards_usd",
        "options_awards_usd",
        "option_awards",
        "options_awards",
    ]);
    pub const NON_EQUITY_INCENTIVE: Aliases = Aliases(&[
        "non_equity_incentive_usd",
        "non_equity_incentive_plan_usd",
        "non_equity_incentive",
    ]);
    pub const PENSION_CHANGE: Aliases = Aliases(&[
        "pension_change_usd",
        "change_in_pension_and_defcomp_earnings_usd",
        "pension_change",
    ]);
    pub const ALL_OTHER: Aliases = Aliases(&[
        "all_other_comp_usd",
        "all_other_compensation_usd",
        "other_compensation_usd",
        "all_other_comp",
    ]);
    pub const TOTAL: Aliases =
        Aliases(&["total_comp_usd", "total_compensation_usd", "total_compensation"]);
    pub const SOURCE: Aliases = Aliases(&["source"]);
}

pub mod equity_grants {
    use super::Aliases;

    pub const FULL_NAME: Aliases = Aliases(&["full_name", "executive_name", "name"]);
    pub const TITLE: Aliases = Aliases(&["current_title", "title"]);
    pub const GRANT_DATE: Aliases = Aliases(&["grant_date"]);
    pub const AWARD_TYPE: Aliases = Aliases(&["type", "award_type"]);
    pub const THRESHOLD_UNITS: Aliases = Aliases(&["threshold_units"]);
    pub const TARGET_UNITS: Aliases = Aliases(&["target_units", "rsu_units"]);
    /// Fallback for RSU rows that report a zero target
    pub const RSU_UNITS: Aliases = Aliases(&["rsu_units"]);
    pub const MAX_UNITS: Aliases = Aliases(&["max_units"]);
    pub const FAIR_VALUE: Aliases =
        Aliases(&["grant_date_fair_value_usd", "grant_date_value_usd"]);
    pub const VESTING: Aliases = Aliases(&["vesting_schedule_short", "vesting_schedule"]);
    pub const SOURCE: Aliases = Aliases(&["source"]);
}

pub mod beneficial_ownership {
    use super::Aliases;

    pub const FULL_NAME: Aliases = Aliases(&["full_name", "name"]);
    pub const TITLE: Aliases = Aliases(&["current_title", "role", "title"]);
    pub const ROLE: Aliases = Aliases(&["role", "title"]);
    pub const TOTAL_SHARES: Aliases = Aliases(&[
        "total_shares",
        "total_shares_owned",
        "total_beneficial_ownership",
    ]);
    pub const SOLE_VOTING: Aliases = Aliases(&[
        "sole_voting_power",
        "direct_or_indirect_sole_voting",
        "ownership_of_common_stock",
    ]);
    pub const SHARED_VOTING: Aliases = Aliases(&[
        "shared_voting_power",
        "indirect_shared_voting",
        "equity_awards_exercisable_or_vesting_within_60d",
    ]);
    pub const PERCENT_OF_CLASS: Aliases = Aliases(&["percent_of_class", "percent_class"]);
    pub const AS_OF_DATE: Aliases = Aliases(&["as_of_date"]);
    pub const NOTES: Aliases = Aliases(&["notes"]);
}

pub mod director_compensation {
    use super::Aliases;

    pub const FULL_NAME: Aliases = Aliases(&["full_name", "director_name", "name"]);
    pub const TITLE: Aliases = Aliases(&["role", "title"]);
    pub const FISCAL_YEAR_END: Aliases = Aliases(&["fiscal_year_end"]);
    pub const FEES_CASH: Aliases =
        Aliases(&["fees_cash_usd", "cash_fees_usd", "cash_retainers_usd"]);
    pub const STOCK_AWARDS: Aliases = Aliases(&["stock_awards_usd", "stock_grant_usd"]);
    pub const ALL_OTHER: Aliases = Aliases(&["all_other_comp_usd", "all_other_compensation_usd"]);
    pub const TOTAL: Aliases =
        Aliases(&["total_usd", "total_comp_usd", "total_compensation_usd"]);
    pub const SOURCE: Aliases = Aliases(&["source"]);
}

pub mod director_profiles {
    use super::Aliases;

    pub const FULL_NAME: Aliases = Aliases(&["full_name", "director_name", "name"]);
    pub const ROLE: Aliases = Aliases(&["role", "title"]);
    pub const INDEPENDENT: Aliases = Aliases(&["independent", "is_independent"]);
    pub const DIRECTOR_SINCE: Aliases = Aliases(&["director_since"]);
    pub const LEAD_INDEPENDENT: Aliases =
        Aliases(&["lead_independent_director", "lead_independent"]);
    pub const COMMITTEES: Aliases = Aliases(&["committees"]);
    pub const PRIMARY_OCCUPATION: Aliases = Aliases(&["primary_occupation", "occupation"]);
    pub const OTHER_PUBLIC_BOARDS: Aliases = Aliases(&["other_public_boards"]);
}

pub mod director_policy {
    use super::Aliases;

    pub const COMPONENT: Aliases = Aliases(&["component", "policy_item"]);
    pub const AMOUNT: Aliases = Aliases(&["amount_usd", "value_usd"]);
    pub const UNIT: Aliases = Aliases(&["unit"]);
    pub const NOTES: Aliases = Aliases(&["notes"]);
}

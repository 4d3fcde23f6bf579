// 🏢 Company Entity - stable slug identity + mergeable values
//
// "Identity persists, values change": the slug never changes, every other
// field may be refined by later files. Numeric fields stay unset (None)
// until a real value shows up, so a partial file never zeroes known data.

use crate::coercion::year_end;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ticker used when no source file names one
pub const UNKNOWN_TICKER: &str = "UNK";

// ============================================================================
// COMPANY ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Stable identity (slug) - NEVER changes
    pub company_id: String,

    pub company_name: String,
    pub ticker: String,
    pub fiscal_year_end: NaiveDate,
    pub sector: Option<String>,

    pub market_cap_usd: Option<f64>,
    pub revenue_usd: Option<f64>,
    /// Declared executive-compensation budget ("cap")
    pub cap_budget_usd: Option<f64>,
    pub founded_year: Option<i32>,

    pub notes: Option<String>,
    pub source_url: Option<String>,
}

impl Company {
    /// New company with defaults derived from the slug and the folder year
    pub fn new(company_id: impl Into<String>, year: i32) -> Self {
        let company_id = company_id.into();
        Company {
            company_name: display_name_from_slug(&company_id),
            company_id,
            ticker: UNKNOWN_TICKER.to_string(),
            fiscal_year_end: year_end(year),
            sector: None,
            market_cap_usd: None,
            revenue_usd: None,
            cap_budget_usd: None,
            founded_year: None,
            notes: None,
            source_url: None,
        }
    }

    /// Merge-on-conflict: only non-empty incoming values overwrite
    pub fn merge(&mut self, attrs: &CompanyAttributes) {
        if let Some(name) = non_empty(&attrs.company_name) {
            self.company_name = name;
        }
        if let Some(ticker) = non_empty(&attrs.ticker) {
            self.ticker = ticker;
        }
        if let Some(fye) = attrs.fiscal_year_end {
            self.fiscal_year_end = fye;
        }
        if let Some(sector) = non_empty(&attrs.sector) {
            self.sector = Some(sector);
        }
        if let Some(notes) = non_empty(&attrs.notes) {
            self.notes = Some(notes);
        }
        if let Some(url) = non_empty(&attrs.source_url) {
            self.source_url = Some(url);
        }

        // Zero is how the sources spell "unknown" for money columns
        if let Some(v) = non_zero(attrs.market_cap_usd) {
            self.market_cap_usd = Some(v);
        }
        if let Some(v) = non_zero(attrs.revenue_usd) {
            self.revenue_usd = Some(v);
        }
        if let Some(v) = non_zero(attrs.cap_budget_usd) {
            self.cap_budget_usd = Some(v);
        }
        if let Some(year) = attrs.founded_year.filter(|y| *y != 0) {
            self.founded_year = Some(year);
        }
    }

    /// Declared budget, if any non-zero budget was ever supplied
    pub fn declared_budget(&self) -> Option<f64> {
        self.cap_budget_usd.filter(|b| *b > 0.0)
    }

    /// Market cap for ranking purposes (unset ranks as zero)
    pub fn market_cap_or_zero(&self) -> f64 {
        self.market_cap_usd.unwrap_or(0.0)
    }
}

// ============================================================================
// INCOMING ATTRIBUTES
// ============================================================================

/// Partial company description carried by one source row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyAttributes {
    pub company_name: Option<String>,
    pub ticker: Option<String>,
    pub fiscal_year_end: Option<NaiveDate>,
    pub sector: Option<String>,
    pub market_cap_usd: Option<f64>,
    pub revenue_usd: Option<f64>,
    pub cap_budget_usd: Option<f64>,
    pub founded_year: Option<i32>,
    pub notes: Option<String>,
    pub source_url: Option<String>,
}

impl CompanyAttributes {
    pub fn is_empty(&self) -> bool {
        *self == CompanyAttributes::default()
    }
}

/// "acme-corp" / "acme_corp" → "Acme Corp"
pub fn display_name_from_slug(slug: &str) -> String {
    slug.split(|c| c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_defaults() {
        let company = Company::new("acme-corp", 2024);

        assert_eq!(company.company_id, "acme-corp");
        assert_eq!(company.company_name, "Acme Corp");
        assert_eq!(company.ticker, "UNK");
        assert_eq!(
            company.fiscal_year_end,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert_eq!(company.market_cap_usd, None);
        assert_eq!(company.declared_budget(), None);
    }

    #[test]
    fn test_merge_fills_and_overwrites_present_values() {
        let mut company = Company::new("acme", 2024);
        company.merge(&CompanyAttributes {
            company_name: Some("Acme Inc.".into()),
            ticker: Some("ACM".into()),
            market_cap_usd: Some(1.5e9),
            cap_budget_usd: Some(2.0e7),
            ..Default::default()
        });

        assert_eq!(company.company_name, "Acme Inc.");
        assert_eq!(company.ticker, "ACM");
        assert_eq!(company.market_cap_usd, Some(1.5e9));
        assert_eq!(company.declared_budget(), Some(2.0e7));
    }

    #[test]
    fn test_merge_never_clobbers_with_absence() {
        let mut company = Company::new("acme", 2024);
        company.merge(&CompanyAttributes {
            ticker: Some("ACM".into()),
            revenue_usd: Some(10.0),
            sector: Some("Industrials".into()),
            ..Default::default()
        });

        company.merge(&CompanyAttributes {
            ticker: Some("   ".into()),
            revenue_usd: Some(0.0),
            sector: None,
            ..Default::default()
        });

        assert_eq!(company.ticker, "ACM");
        assert_eq!(company.revenue_usd, Some(10.0));
        assert_eq!(company.sector.as_deref(), Some("Industrials"));
    }

    #[test]
    fn test_display_name_from_slug() {
        assert_eq!(display_name_from_slug("general_motors"), "General Motors");
        assert_eq!(display_name_from_slug("x"), "X");
        assert_eq!(display_name_from_slug(""), "");
    }

    #[test]
    fn test_attributes_is_empty() {
        assert!(CompanyAttributes::default().is_empty());
        let attrs = CompanyAttributes {
            notes: Some("n".into()),
            ..Default::default()
        };
        assert!(!attrs.is_empty());
    }
}

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use stockbeads_core::{DomainError, DomainResult};

/// Filter criteria for the sales history listing.
///
/// Date bounds are normalized at parse time: `start_date` becomes midnight of
/// that day, `end_date` becomes an exclusive bound at midnight of the next
/// day so the end date is included in full.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleFilter {
    pub start: Option<DateTime<Utc>>,
    pub end_exclusive: Option<DateTime<Utc>>,
    pub product_id: Option<i64>,
    pub payment_method: Option<String>,
    pub sale_status: Option<String>,
}

impl SaleFilter {
    pub fn parse(
        start_date: Option<&str>,
        end_date: Option<&str>,
        product_id: Option<i64>,
        payment_method: Option<String>,
        sale_status: Option<String>,
    ) -> DomainResult<Self> {
        let start = start_date
            .map(|s| parse_day(s).map(day_start))
            .transpose()?;
        let end_exclusive = end_date
            .map(|s| {
                let day = parse_day(s)?;
                day.checked_add_days(Days::new(1))
                    .map(day_start)
                    .ok_or_else(invalid_date)
            })
            .transpose()?;

        Ok(Self {
            start,
            end_exclusive,
            product_id,
            payment_method,
            sale_status,
        })
    }
}

fn parse_day(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid_date())
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn invalid_date() -> DomainError {
    DomainError::validation("Invalid date format. Use YYYY-MM-DD")
}

use chrono::{Datelike, Days, NaiveDate};

/// Parses the DD/MM/YY dates sent by the tablets, the century is
/// assumed to be 2000
pub fn transform_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('/');

    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Expands a MM/YY month selector into its first and last day
pub fn month_window(date: &str) -> Option<(NaiveDate, NaiveDate)> {
    let start = transform_date(&format!("01/{}", date))?;

    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)?
    };

    let end = next_month.checked_sub_days(Days::new(1))?;

    Some((start, end))
}

/// The bill total is the office price per kilogram at charge time
/// applied to the delivered mass
pub fn compute_total(kilogram_value: f64, masa_total: f64) -> f64 {
    kilogram_value * masa_total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tablet_dates() {
        assert_eq!(
            transform_date("01/06/24"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(
            transform_date("31/12/25"),
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );

        assert_eq!(transform_date("31/02/24"), None);
        assert_eq!(transform_date("2024-06-01"), None);
        assert_eq!(transform_date("01/06/24/99"), None);
    }

    #[test]
    fn expands_month_selectors() {
        assert_eq!(
            month_window("06/24"),
            Some((
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            ))
        );

        // february and december are the tricky ones
        assert_eq!(
            month_window("02/24"),
            Some((
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ))
        );
        assert_eq!(
            month_window("12/25"),
            Some((
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            ))
        );
    }

    #[test]
    fn totals_scale_with_the_delivered_mass() {
        assert_eq!(compute_total(2_500.0, 100.0), 250_000.0);
        assert_eq!(compute_total(2_500.0, 0.0), 0.0);
    }
}

//! Spanish (`es-ES`) date formatting.

use chrono::{Datelike as _, NaiveDate};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long-form date, e.g. `15 de enero de 2024`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Numeric date without zero padding, e.g. `5/2/2024`.
#[must_use]
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(long_date(date), "15 de enero de 2024");
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(long_date(date), "1 de septiembre de 2024");
    }

    #[test]
    fn short_dates_are_unpadded() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(short_date(date), "5/2/2024");
    }
}

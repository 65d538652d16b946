//! Flattening Notion pages into expense rows
//!
//! Each configured property is looked up by name and read according to its
//! kind tag. A missing, empty, mistyped or undecodable property degrades that
//! one field to its default; the row itself is always produced.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use super::property::PropertyValue;
use super::query::RawRecord;
use crate::config::PropertyNames;
use crate::models::{ExpenseRecord, Money};

/// Converts raw records using a fixed set of property names
#[derive(Debug, Clone)]
pub struct Flattener {
    names: PropertyNames,
    offset: FixedOffset,
}

impl Flattener {
    /// Create a flattener
    ///
    /// `utc_offset_minutes` is the local offset used to turn timestamps into
    /// calendar dates; an out-of-range offset falls back to UTC.
    pub fn new(names: PropertyNames, utc_offset_minutes: i32) -> Self {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                warn!(utc_offset_minutes, "UTC offset out of range, using UTC");
                utc()
            });
        Self { names, offset }
    }

    /// Flatten one record into an expense row
    pub fn flatten(&self, record: &RawRecord) -> ExpenseRecord {
        let names = &self.names;

        let name = self
            .lookup(record, &names.name)
            .and_then(|p| expect_kind(record, &names.name, &p, p.text()))
            .unwrap_or_default();

        let date = self
            .lookup(record, &names.date)
            .and_then(|p| {
                let start = p.date_start().map(|s| s.map(str::to_string));
                expect_kind(record, &names.date, &p, start)
            })
            .flatten()
            .and_then(|raw| {
                let parsed = parse_date(&raw, self.offset);
                if parsed.is_none() {
                    warn!(page = %record.id, value = %raw, "Unparseable date, leaving it empty");
                }
                parsed
            });

        let category = self
            .lookup(record, &names.category)
            .and_then(|p| expect_kind(record, &names.category, &p, p.label()))
            .unwrap_or_default();

        let amount = self
            .lookup(record, &names.amount)
            .and_then(|p| expect_kind(record, &names.amount, &p, p.number()))
            .flatten()
            .and_then(|value| {
                let money = Money::from_f64(value);
                if money.is_none() {
                    warn!(
                        page = %record.id,
                        value,
                        "Amount is not finite or out of range, using zero"
                    );
                }
                money
            })
            .unwrap_or_default();

        let description = self
            .lookup(record, &names.description)
            .and_then(|p| expect_kind(record, &names.description, &p, p.text()))
            .unwrap_or_default();

        ExpenseRecord {
            page_id: record.id.clone(),
            name: name.trim().to_string(),
            date,
            category: category.trim().to_string(),
            amount,
            description: description.trim().to_string(),
        }
    }

    /// Flatten a batch, preserving order
    pub fn flatten_all(&self, records: &[RawRecord]) -> Vec<ExpenseRecord> {
        records.iter().map(|r| self.flatten(r)).collect()
    }

    fn lookup(&self, record: &RawRecord, property: &str) -> Option<PropertyValue> {
        let raw = match record.property(property) {
            Some(Value::Null) | None => {
                debug!(page = %record.id, property, "Property missing, using default");
                return None;
            }
            Some(raw) => raw,
        };

        match serde_json::from_value::<PropertyValue>(raw.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(page = %record.id, property, error = %e, "Malformed property, using default");
                None
            }
        }
    }
}

/// Log when a property holds a kind that cannot supply the wanted field
fn expect_kind<T>(
    record: &RawRecord,
    property: &str,
    value: &PropertyValue,
    extracted: Option<T>,
) -> Option<T> {
    if extracted.is_none() {
        warn!(
            page = %record.id,
            property,
            kind = value.kind(),
            "Unexpected property kind, using default"
        );
    }
    extracted
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse a Notion date or datetime into a calendar date at `offset`
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to `offset`), and
/// naive timestamps (taken as UTC). Falls back to the part before `T`.
pub fn parse_date(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&offset).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().with_timezone(&offset).date_naive());
        }
    }

    raw.split('T')
        .next()
        .and_then(|day| NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    fn record(properties: Value) -> RawRecord {
        serde_json::from_value(json!({ "id": "page-1", "properties": properties })).unwrap()
    }

    fn flattener() -> Flattener {
        Flattener::new(PropertyNames::default(), 330)
    }

    fn full_properties() -> Value {
        json!({
            "Name": { "type": "title", "title": [{ "plain_text": "Sandwich" }] },
            "Date": { "type": "date", "date": { "start": "2024-01-05", "end": null } },
            "Category": { "type": "select", "select": { "name": "Food" } },
            "Amount": { "type": "number", "number": 23.50 },
            "Comment": { "type": "rich_text", "rich_text": [{ "plain_text": "Lunch" }] }
        })
    }

    #[test]
    fn test_flatten_fully_populated() {
        let row = flattener().flatten(&record(full_properties()));

        assert_eq!(row.page_id, "page-1");
        assert_eq!(row.name, "Sandwich");
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(row.category, "Food");
        assert_eq!(row.amount, Money::from_cents(2350));
        assert_eq!(row.description, "Lunch");
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let mut properties = full_properties();
        properties.as_object_mut().unwrap().remove("Comment");

        let row = flattener().flatten(&record(properties));

        assert_eq!(row.description, "");
        assert_eq!(row.category, "Food");
        assert_eq!(row.amount, Money::from_cents(2350));
        assert!(row.date.is_some());
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let mut properties = full_properties();
        properties.as_object_mut().unwrap().remove("Amount");
        assert_eq!(flattener().flatten(&record(properties)).amount, Money::zero());

        let mut properties = full_properties();
        properties["Amount"] = json!({ "type": "number", "number": null });
        assert_eq!(flattener().flatten(&record(properties)).amount, Money::zero());
    }

    #[test]
    fn test_out_of_range_amount_defaults_to_zero() {
        for huge in [5.0e16, -9.223372036854776e16] {
            let mut properties = full_properties();
            properties["Amount"] = json!({ "type": "number", "number": huge });

            let row = flattener().flatten(&record(properties));

            assert_eq!(row.amount, Money::zero());
            assert_eq!(row.category, "Food");
        }
    }

    #[test]
    fn test_unexpected_kind_degrades_single_field() {
        let mut properties = full_properties();
        properties["Amount"] = json!({ "type": "rich_text", "rich_text": [{ "plain_text": "12" }] });
        properties["Date"] = json!({ "type": "checkbox", "checkbox": true });

        let row = flattener().flatten(&record(properties));

        assert_eq!(row.amount, Money::zero());
        assert_eq!(row.date, None);
        assert_eq!(row.category, "Food");
        assert_eq!(row.description, "Lunch");
    }

    #[test]
    fn test_malformed_property_degrades_single_field() {
        let mut properties = full_properties();
        properties["Category"] = json!({ "type": "select", "select": "not-an-object" });
        properties["Comment"] = json!(42);

        let row = flattener().flatten(&record(properties));

        assert_eq!(row.category, "");
        assert_eq!(row.description, "");
        assert_eq!(row.amount, Money::from_cents(2350));
    }

    #[test]
    fn test_empty_record() {
        let row = flattener().flatten(&RawRecord::default());
        assert_eq!(row, ExpenseRecord::new(None, Money::zero()));
    }

    #[test]
    fn test_custom_property_names() {
        let names = PropertyNames {
            amount: "Cost".into(),
            ..PropertyNames::default()
        };
        let row = Flattener::new(names, 0).flatten(&record(json!({
            "Cost": { "type": "number", "number": 7 }
        })));
        assert_eq!(row.amount, Money::from_cents(700));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(parse_date("2024-01-05", ist()), expected);
        assert_eq!(parse_date("2024-01-05T10:00:00.000+05:30", ist()), expected);
        assert_eq!(parse_date("2024-01-05T10:00:00", ist()), expected);
        assert_eq!(parse_date("garbage", ist()), None);
        assert_eq!(parse_date("", ist()), None);
    }

    #[test]
    fn test_parse_date_converts_to_local_offset() {
        // 20:00 UTC is 01:30 the next day at +05:30
        assert_eq!(
            parse_date("2024-01-05T20:00:00Z", ist()),
            NaiveDate::from_ymd_opt(2024, 1, 6)
        );
        assert_eq!(
            parse_date("2024-01-05T20:00:00", ist()),
            NaiveDate::from_ymd_opt(2024, 1, 6)
        );
        assert_eq!(
            parse_date("2024-01-05T20:00:00Z", utc()),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_parse_date_falls_back_to_day_part() {
        assert_eq!(
            parse_date("2024-01-05Tnonsense", ist()),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }
}

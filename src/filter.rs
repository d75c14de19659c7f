//! Filter pipeline: free-text search and month-of-year date filtering.
//!
//! A [`FilterPipeline`] is an ordered list of predicates combined with
//! logical AND. Because every predicate is pure, the result is independent of
//! the order predicates were added in, and applying a pipeline twice yields
//! the same items as applying it once.
//!
//! ```rust
//! use backoffice_widgets::filter::{filter, FilterCriteria, MonthFilter};
//! use backoffice_widgets::item::Record;
//!
//! let items = vec![
//!     Record::new("1").with_field("name", "John Smith"),
//!     Record::new("2").with_field("name", "Jane Doe").with_field("email", "smith@x.com"),
//!     Record::new("3").with_field("name", "Bob"),
//! ];
//! let criteria = FilterCriteria::new("smith", MonthFilter::All);
//!
//! let found = filter(&items, &criteria, &["name", "email"], "createdAt");
//! let ids: Vec<&str> = found.iter().map(|r| r.id.as_str()).collect();
//! assert_eq!(ids, ["1", "2"]);
//! ```

use crate::item::Item;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    #[allow(missing_docs)]
    January,
    #[allow(missing_docs)]
    February,
    #[allow(missing_docs)]
    March,
    #[allow(missing_docs)]
    April,
    #[allow(missing_docs)]
    May,
    #[allow(missing_docs)]
    June,
    #[allow(missing_docs)]
    July,
    #[allow(missing_docs)]
    August,
    #[allow(missing_docs)]
    September,
    #[allow(missing_docs)]
    October,
    #[allow(missing_docs)]
    November,
    #[allow(missing_docs)]
    December,
}

impl Month {
    /// All months in calendar order; position equals [`Month::index`].
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    const NAMES: [&'static str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Zero-based month index (January = 0).
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Canonical English name.
    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Looks a month up by zero-based index.
    pub fn from_index(index: u32) -> Option<Month> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parses a full month name or its three-letter abbreviation,
    /// ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Month> {
        let wanted = s.trim().to_lowercase();
        if wanted.len() < 3 {
            return None;
        }
        Self::ALL.into_iter().find(|m| {
            let name = m.name().to_lowercase();
            name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
        })
    }

    /// The following month, wrapping December to January.
    pub fn succ(self) -> Month {
        Self::ALL[(self as usize + 1) % 12]
    }

    /// The preceding month, wrapping January to December.
    pub fn pred(self) -> Month {
        Self::ALL[(self as usize + 11) % 12]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Month-of-year date filter.
///
/// `All` disables date filtering. It is a distinct variant rather than a
/// thirteenth month name, so the value `"All"` can never be mistaken for a
/// month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// No date filter.
    #[default]
    All,
    /// Keep items whose date falls in this month, in any year.
    Month(Month),
}

impl MonthFilter {
    /// Parses user input. `"all"`, the empty string and anything that is not
    /// a month name all mean [`MonthFilter::All`].
    ///
    /// ```rust
    /// use backoffice_widgets::filter::{Month, MonthFilter};
    ///
    /// assert_eq!(MonthFilter::parse("March"), MonthFilter::Month(Month::March));
    /// assert_eq!(MonthFilter::parse("all"), MonthFilter::All);
    /// assert_eq!(MonthFilter::parse(""), MonthFilter::All);
    /// assert_eq!(MonthFilter::parse("Smarch"), MonthFilter::All);
    /// ```
    pub fn parse(s: &str) -> MonthFilter {
        match Month::parse(s) {
            Some(month) => MonthFilter::Month(month),
            None => MonthFilter::All,
        }
    }

    /// Returns true when no date filter is active.
    pub fn is_all(&self) -> bool {
        matches!(self, MonthFilter::All)
    }

    /// Steps forward through `All, January, ..., December, All`.
    pub fn next(self) -> MonthFilter {
        match self {
            MonthFilter::All => MonthFilter::Month(Month::January),
            MonthFilter::Month(Month::December) => MonthFilter::All,
            MonthFilter::Month(m) => MonthFilter::Month(m.succ()),
        }
    }

    /// Steps backward through `All, December, ..., January, All`.
    pub fn prev(self) -> MonthFilter {
        match self {
            MonthFilter::All => MonthFilter::Month(Month::December),
            MonthFilter::Month(Month::January) => MonthFilter::All,
            MonthFilter::Month(m) => MonthFilter::Month(m.pred()),
        }
    }

    /// Tests a raw date string against this filter using the local timezone.
    pub fn matches(&self, date: Option<&str>) -> bool {
        self.matches_in(date, &Local)
    }

    /// Tests a raw date string against this filter in the given timezone.
    ///
    /// With a month selected, a missing or unparseable date never matches.
    pub fn matches_in<Tz: TimeZone>(&self, date: Option<&str>, tz: &Tz) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(month) => date
                .and_then(|raw| month_index_in(raw, tz))
                .is_some_and(|index| index == month.index()),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Month(m) => f.write_str(m.name()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MonthFilter::parse(s))
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(MonthFilter::parse(&raw))
    }
}

/// Returns the zero-based month of an ISO-8601 date string as seen in `tz`.
///
/// - RFC 3339 timestamps are converted into `tz`, as are the looser ISO forms
///   browsers accept: minutes-only times (`2024-03-10T10:00Z`) and offsets
///   without a colon (`2024-03-10T10:00:00.000+0000`).
/// - Date-times without an offset are taken as already local.
/// - Date-only strings are read as UTC midnight and then converted, which is
///   how browsers interpret them.
pub fn month_index_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).month0());
    }
    for format in ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(tz).month0());
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.month0());
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    Some(midnight.with_timezone(tz).month0())
}

/// User-facing filter state for a list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free-text search term. Blank means no search.
    #[serde(default)]
    pub search_term: String,
    /// Month-of-year filter.
    #[serde(default)]
    pub selected_month: MonthFilter,
}

impl FilterCriteria {
    /// Creates criteria from a search term and a month filter.
    pub fn new(search_term: &str, selected_month: MonthFilter) -> Self {
        Self {
            search_term: search_term.to_string(),
            selected_month,
        }
    }

    /// Returns true when neither a search term nor a month is set.
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && self.selected_month.is_all()
    }
}

/// A pure, deterministic test applied to each item.
pub type Predicate<I> = Box<dyn Fn(&I) -> bool + Send + Sync>;

/// Builds a case-insensitive substring search over `fields`.
///
/// An item matches when any field contains the term. Returns `None` for a
/// blank term, meaning "no search".
pub fn search_predicate<I, S>(term: &str, fields: &[S]) -> Option<Predicate<I>>
where
    I: Item,
    S: AsRef<str>,
{
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
    Some(Box::new(move |item: &I| {
        fields.iter().any(|field| {
            item.field_text(field)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }))
}

/// Builds a month-of-year filter over `date_field`, evaluated in `tz`.
///
/// Returns `None` for [`MonthFilter::All`].
pub fn month_predicate_in<I, Tz>(
    month: MonthFilter,
    date_field: &str,
    tz: Tz,
) -> Option<Predicate<I>>
where
    I: Item,
    Tz: TimeZone + Send + Sync + 'static,
{
    if month.is_all() {
        return None;
    }
    let field = date_field.to_string();
    Some(Box::new(move |item: &I| {
        month.matches_in(item.field_text(&field).as_deref(), &tz)
    }))
}

/// Builds a month-of-year filter over `date_field` in the local timezone.
pub fn month_predicate<I: Item>(month: MonthFilter, date_field: &str) -> Option<Predicate<I>> {
    month_predicate_in(month, date_field, Local)
}

/// An ordered, AND-combined list of predicates.
pub struct FilterPipeline<I> {
    predicates: Vec<Predicate<I>>,
}

impl<I> Default for FilterPipeline<I> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<I> fmt::Debug for FilterPipeline<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

impl<I: Item> FilterPipeline<I> {
    /// Creates an empty pipeline, which passes every item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the standard search + month pipeline for a screen.
    pub fn from_criteria<S: AsRef<str>>(
        criteria: &FilterCriteria,
        search_fields: &[S],
        date_field: &str,
    ) -> Self {
        Self::new()
            .with_search(&criteria.search_term, search_fields)
            .with_month(criteria.selected_month, date_field)
    }

    /// Appends a custom predicate (builder pattern).
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Appends a free-text search. A blank term adds nothing.
    pub fn with_search<S: AsRef<str>>(mut self, term: &str, fields: &[S]) -> Self {
        self.predicates.extend(search_predicate(term, fields));
        self
    }

    /// Appends a local-time month filter. [`MonthFilter::All`] adds nothing.
    pub fn with_month(mut self, month: MonthFilter, date_field: &str) -> Self {
        self.predicates.extend(month_predicate(month, date_field));
        self
    }

    /// Appends a month filter evaluated in a specific timezone.
    pub fn with_month_in<Tz>(mut self, month: MonthFilter, date_field: &str, tz: Tz) -> Self
    where
        Tz: TimeZone + Send + Sync + 'static,
    {
        self.predicates.extend(month_predicate_in(month, date_field, tz));
        self
    }

    /// Number of active predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns true when the pipeline passes every item.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Tests one item against every predicate.
    pub fn matches(&self, item: &I) -> bool {
        self.predicates.iter().all(|p| p(item))
    }

    /// Returns the passing items, cloned, in source order.
    pub fn apply(&self, items: &[I]) -> Vec<I> {
        if self.is_empty() {
            return items.to_vec();
        }
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }

    /// Returns the source positions of the passing items.
    pub fn apply_indices(&self, items: &[I]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Filters `items` by search term (over `search_fields`) and month (over
/// `date_field`, local timezone).
pub fn filter<I, S>(
    items: &[I],
    criteria: &FilterCriteria,
    search_fields: &[S],
    date_field: &str,
) -> Vec<I>
where
    I: Item,
    S: AsRef<str>,
{
    FilterPipeline::from_criteria(criteria, search_fields, date_field).apply(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Record;
    use chrono::FixedOffset;

    const FIELDS: [&str; 2] = ["name", "email"];

    fn dated(id: &str, name: &str, created_at: &str) -> Record {
        Record::new(id)
            .with_field("name", name)
            .with_field("createdAt", created_at)
    }

    fn year_of_items() -> Vec<Record> {
        // January through December, mid-month at noon UTC so the local month
        // is the same in every timezone. November is swapped for a second
        // March item from another year.
        let mut items: Vec<Record> = (1..=12)
            .map(|m| {
                dated(
                    &format!("m{m}"),
                    &format!("Client {m}"),
                    &format!("2024-{m:02}-15T12:00:00Z"),
                )
            })
            .collect();
        items[10] = dated("m11", "Client 11", "2021-03-14T12:00:00Z");
        items
    }

    fn ids(items: &[Record]) -> Vec<String> {
        items.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_month_names_and_indices() {
        assert_eq!(Month::January.index(), 0);
        assert_eq!(Month::December.index(), 11);
        assert_eq!(Month::from_index(2), Some(Month::March));
        assert_eq!(Month::from_index(12), None);
        assert_eq!(Month::parse("  MARCH "), Some(Month::March));
        assert_eq!(Month::parse("sep"), Some(Month::September));
        assert_eq!(Month::parse("ma"), None);
        assert_eq!(Month::December.succ(), Month::January);
        assert_eq!(Month::January.pred(), Month::December);
    }

    #[test]
    fn test_all_is_not_a_month() {
        assert_eq!(MonthFilter::parse("All"), MonthFilter::All);
        assert_eq!(MonthFilter::parse("ALL"), MonthFilter::All);
        assert!(MonthFilter::All.matches(None));
        assert!(MonthFilter::All.matches(Some("garbage")));
    }

    #[test]
    fn test_month_filter_cycles() {
        let mut filter = MonthFilter::All;
        for _ in 0..13 {
            filter = filter.next();
        }
        assert_eq!(filter, MonthFilter::All);
        assert_eq!(MonthFilter::All.prev(), MonthFilter::Month(Month::December));
        assert_eq!(MonthFilter::Month(Month::January).prev(), MonthFilter::All);
    }

    #[test]
    fn test_month_uses_given_timezone() {
        let raw = "2024-03-31T23:30:00Z";
        assert_eq!(month_index_in(raw, &Utc), Some(2));
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(month_index_in(raw, &tokyo), Some(3));
        let filter = MonthFilter::Month(Month::April);
        assert!(filter.matches_in(Some(raw), &tokyo));
        assert!(!filter.matches_in(Some(raw), &Utc));
    }

    #[test]
    fn test_date_formats() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        // Offset-less date-time is already local.
        assert_eq!(month_index_in("2024-05-01T00:10:00", &new_york), Some(4));
        assert_eq!(month_index_in("2024-05-01 00:10:00", &new_york), Some(4));
        // Date-only strings are UTC midnight.
        assert_eq!(month_index_in("2024-05-01", &new_york), Some(3));
        assert_eq!(month_index_in("2024-05-01", &Utc), Some(4));
        assert_eq!(month_index_in("yesterday", &Utc), None);
    }

    #[test]
    fn test_loose_iso_offsets() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(month_index_in("2024-03-10T10:00Z", &Utc), Some(2));
        assert_eq!(month_index_in("2024-03-31T20:00Z", &tokyo), Some(3));
        assert_eq!(month_index_in("2024-03-10T10:00:00.000+0000", &Utc), Some(2));
        assert_eq!(month_index_in("2024-03-10T10:00:00+0530", &Utc), Some(2));
        assert_eq!(month_index_in("2024-03-31T20:00:00.000+0000", &tokyo), Some(3));

        let march = MonthFilter::Month(Month::March);
        assert!(march.matches_in(Some("2024-03-10T10:00Z"), &Utc));
    }

    #[test]
    fn test_unparseable_dates_never_match_a_month() {
        let filter = MonthFilter::Month(Month::March);
        assert!(!filter.matches_in(None, &Utc));
        assert!(!filter.matches_in(Some("not a date"), &Utc));
    }

    #[test]
    fn test_search_matches_any_field_case_insensitive() {
        let items = vec![
            Record::new("1").with_field("name", "John Smith"),
            Record::new("2")
                .with_field("name", "Jane Doe")
                .with_field("email", "smith@x.com"),
            Record::new("3").with_field("name", "Bob"),
        ];
        let criteria = FilterCriteria::new("SMITH", MonthFilter::All);
        assert_eq!(ids(&filter(&items, &criteria, &FIELDS, "createdAt")), ["1", "2"]);
    }

    #[test]
    fn test_search_through_nested_fields() {
        let items = vec![
            Record::new("t1").with_field("property", serde_json::json!({"name": "Sea Villa"})),
            Record::new("t2").with_field("property", serde_json::json!({})),
            Record::new("t3"),
        ];
        let pipeline = FilterPipeline::new().with_search("villa", &["property.name"]);
        assert_eq!(ids(&pipeline.apply(&items)), ["t1"]);
    }

    #[test]
    fn test_blank_search_is_noop() {
        let items = year_of_items();
        for term in ["", "   ", "\t"] {
            let criteria = FilterCriteria::new(term, MonthFilter::All);
            assert!(criteria.is_empty());
            assert_eq!(filter(&items, &criteria, &FIELDS, "createdAt"), items);
        }
    }

    #[test]
    fn test_month_filter_any_year() {
        let items = year_of_items();
        let criteria = FilterCriteria::new("", MonthFilter::parse("March"));
        let found = filter(&items, &criteria, &FIELDS, "createdAt");
        assert_eq!(ids(&found), ["m3", "m11"]);

        let december = FilterCriteria::new("", MonthFilter::Month(Month::December));
        assert_eq!(ids(&filter(&items, &december, &FIELDS, "createdAt")), ["m12"]);
        let november = FilterCriteria::new("", MonthFilter::Month(Month::November));
        assert!(filter(&items, &november, &FIELDS, "createdAt").is_empty());
    }

    #[test]
    fn test_search_and_month_are_anded() {
        let items = year_of_items();
        let criteria = FilterCriteria::new("client 1", MonthFilter::Month(Month::March));
        let found = filter(&items, &criteria, &FIELDS, "createdAt");
        assert_eq!(ids(&found), ["m11"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = year_of_items();
        let criteria = FilterCriteria::new("client", MonthFilter::Month(Month::March));
        let once = filter(&items, &criteria, &FIELDS, "createdAt");
        let twice = filter(&once, &criteria, &FIELDS, "createdAt");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_is_commutative() {
        let items = year_of_items();
        let search = FilterCriteria::new("client 1", MonthFilter::All);
        let month = FilterCriteria::new("", MonthFilter::Month(Month::March));

        let search_then_month = filter(
            &filter(&items, &search, &FIELDS, "createdAt"),
            &month,
            &FIELDS,
            "createdAt",
        );
        let month_then_search = filter(
            &filter(&items, &month, &FIELDS, "createdAt"),
            &search,
            &FIELDS,
            "createdAt",
        );
        assert_eq!(search_then_month, month_then_search);

        let combined = FilterCriteria::new("client 1", MonthFilter::Month(Month::March));
        assert_eq!(search_then_month, filter(&items, &combined, &FIELDS, "createdAt"));
    }

    #[test]
    fn test_custom_predicates_compose() {
        let items = vec![
            Record::new("a").with_field("status", "sold").with_field("name", "A"),
            Record::new("b").with_field("status", "listed").with_field("name", "AB"),
            Record::new("c").with_field("status", "listed").with_field("name", "C"),
        ];
        let pipeline = FilterPipeline::new()
            .with_search("a", &["name"])
            .with_predicate(|r: &Record| r.field_text("status").as_deref() == Some("listed"));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(ids(&pipeline.apply(&items)), ["b"]);
        assert_eq!(pipeline.apply_indices(&items), vec![1]);
    }

    #[test]
    fn test_criteria_serde() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"searchTerm": "ada", "selectedMonth": "all"}"#).unwrap();
        assert_eq!(criteria, FilterCriteria::new("ada", MonthFilter::All));
        let json = serde_json::to_string(&FilterCriteria::new("", MonthFilter::Month(Month::May)))
            .unwrap();
        assert_eq!(json, r#"{"searchTerm":"","selectedMonth":"May"}"#);
    }
}

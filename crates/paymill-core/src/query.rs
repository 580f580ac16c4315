//! # Query Builders
//!
//! List filters and sort orders shared by every resource.
//!
//! `Filter<R>` and `Order<R>` are generic over the resource they query; the
//! `by_*` methods for a given resource live next to its model. Both builders
//! consume and return `self` so calls chain:
//!
//! ```rust,ignore
//! let filter = Transaction::create_filter()
//!     .by_amount_greater_than(4100)
//!     .by_created_at(Some(from), Some(to))?;
//! let order = Transaction::create_order().by_amount().desc();
//! ```
//!
//! Outbound parameters contain only the predicates that were set, keyed by
//! the field's wire name. The order renders as one `order=<field>_<dir>`.

use crate::error::{PaymillError, PaymillResult};
use crate::mapping::{FilterKind, Params, Resource};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Date predicate: one exact day-time or an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build from a required start and optional end.
    ///
    /// Without an end the predicate matches `start` exactly.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> PaymillResult<Self> {
        let start = start.ok_or_else(|| {
            PaymillError::InvalidArgument("date range requires a start date".to_string())
        })?;

        if let Some(end) = end {
            if end < start {
                return Err(PaymillError::InvalidArgument(format!(
                    "date range ends ({}) before it starts ({})",
                    end, start
                )));
            }
        }

        Ok(Self { start, end })
    }

    /// Exact-match predicate
    pub fn exact(date: DateTime<Utc>) -> Self {
        Self {
            start: date,
            end: None,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Wire token: `"<secs>"` or `"<startSecs>_<endSecs>"`
    pub fn token(&self) -> String {
        match self.end {
            Some(end) => format!("{}_{}", self.start.timestamp(), end.timestamp()),
            None => self.start.timestamp().to_string(),
        }
    }
}

/// The single amount slot of a filter.
///
/// Equality and bounds exclude each other; the two bounds combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountPredicate {
    Equal(i64),
    Bounded {
        greater_than: Option<i64>,
        less_than: Option<i64>,
    },
}

impl AmountPredicate {
    fn with_greater_than(current: Option<&Self>, value: i64) -> Self {
        match current {
            Some(AmountPredicate::Bounded { less_than, .. }) => AmountPredicate::Bounded {
                greater_than: Some(value),
                less_than: *less_than,
            },
            _ => AmountPredicate::Bounded {
                greater_than: Some(value),
                less_than: None,
            },
        }
    }

    fn with_less_than(current: Option<&Self>, value: i64) -> Self {
        match current {
            Some(AmountPredicate::Bounded { greater_than, .. }) => AmountPredicate::Bounded {
                greater_than: *greater_than,
                less_than: Some(value),
            },
            _ => AmountPredicate::Bounded {
                greater_than: None,
                less_than: Some(value),
            },
        }
    }

    /// Wire tokens: `"4200"`, `">4100"`, `"<4300"`
    pub fn tokens(&self) -> Vec<String> {
        match self {
            AmountPredicate::Equal(v) => vec![v.to_string()],
            AmountPredicate::Bounded {
                greater_than,
                less_than,
            } => greater_than
                .map(|v| format!(">{}", v))
                .into_iter()
                .chain(less_than.map(|v| format!("<{}", v)))
                .collect(),
        }
    }
}

/// One filter predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Text, id or plain number, sent verbatim
    Value(String),
    Amount(AmountPredicate),
    Dates(DateRange),
}

impl Predicate {
    fn tokens(&self) -> Vec<String> {
        match self {
            Predicate::Value(v) => vec![v.clone()],
            Predicate::Amount(amount) => amount.tokens(),
            Predicate::Dates(range) => vec![range.token()],
        }
    }
}

/// Sparse set of list predicates for resource `R`
pub struct Filter<R> {
    predicates: BTreeMap<&'static str, Predicate>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Filter<R> {
    pub fn new() -> Self {
        Self {
            predicates: BTreeMap::new(),
            _resource: PhantomData,
        }
    }

    /// Predicate currently set for a wire field
    pub fn predicate(&self, wire: &str) -> Option<&Predicate> {
        self.predicates.get(wire)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Outbound query parameters, one entry per token
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        for (wire, predicate) in &self.predicates {
            for token in predicate.tokens() {
                params.push(*wire, token);
            }
        }
        params
    }
}

impl<R: Resource> Filter<R> {
    fn set(mut self, wire: &'static str, kind: FilterKind, predicate: Predicate) -> Self {
        debug_assert!(
            R::field(wire).and_then(|f| f.filter) == Some(kind),
            "{}.{} is not filterable as {:?}",
            R::NAME,
            wire,
            kind
        );
        self.predicates.insert(wire, predicate);
        self
    }

    pub(crate) fn text(self, wire: &'static str, value: impl Into<String>) -> Self {
        self.set(wire, FilterKind::Text, Predicate::Value(value.into()))
    }

    pub(crate) fn number(self, wire: &'static str, value: i64) -> Self {
        self.set(wire, FilterKind::Number, Predicate::Value(value.to_string()))
    }

    pub(crate) fn amount_equal(self, wire: &'static str, value: i64) -> Self {
        self.set(
            wire,
            FilterKind::Amount,
            Predicate::Amount(AmountPredicate::Equal(value)),
        )
    }

    /// Sets the `>` bound, keeping an existing `<` bound. Both go out as
    /// separate `amount` parameters.
    pub(crate) fn amount_greater_than(self, wire: &'static str, value: i64) -> Self {
        let next = AmountPredicate::with_greater_than(self.amount_slot(wire), value);
        self.set(wire, FilterKind::Amount, Predicate::Amount(next))
    }

    /// Sets the `<` bound, keeping an existing `>` bound
    pub(crate) fn amount_less_than(self, wire: &'static str, value: i64) -> Self {
        let next = AmountPredicate::with_less_than(self.amount_slot(wire), value);
        self.set(wire, FilterKind::Amount, Predicate::Amount(next))
    }

    pub(crate) fn dates(
        self,
        wire: &'static str,
        date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> PaymillResult<Self> {
        let range = DateRange::new(date, end_date)?;
        Ok(self.set(wire, FilterKind::Date, Predicate::Dates(range)))
    }

    fn amount_slot(&self, wire: &str) -> Option<&AmountPredicate> {
        match self.predicates.get(wire) {
            Some(Predicate::Amount(amount)) => Some(amount),
            _ => None,
        }
    }
}

impl<R> Default for Filter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Filter<R> {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Filter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("predicates", &self.predicates)
            .finish()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Asc
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Single-field sort order for resource `R`.
///
/// Starts as `created_at` ascending; `by_*` replaces the field and keeps the
/// direction.
pub struct Order<R> {
    field: &'static str,
    direction: Direction,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Order<R> {
    pub fn new() -> Self {
        Self {
            field: "created_at",
            direction: Direction::Asc,
            _resource: PhantomData,
        }
    }

    pub fn asc(mut self) -> Self {
        self.direction = Direction::Asc;
        self
    }

    pub fn desc(mut self) -> Self {
        self.direction = Direction::Desc;
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Wire token: `"<field>_<asc|desc>"`
    pub fn token(&self) -> String {
        format!("{}_{}", self.field, self.direction.as_str())
    }

    pub fn params(&self) -> Params {
        Params::new().with("order", self.token())
    }
}

impl<R: Resource> Order<R> {
    pub(crate) fn by(mut self, wire: &'static str) -> Self {
        debug_assert!(
            R::field(wire).map(|f| f.sortable).unwrap_or(false),
            "{}.{} is not sortable",
            R::NAME,
            wire
        );
        self.field = wire;
        self
    }

    /// Sort by creation time (available on every resource)
    pub fn by_created_at(self) -> Self {
        self.by("created_at")
    }
}

impl<R> Default for Order<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Order<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            direction: self.direction,
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Order<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("field", &self.field)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Page window for list calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub count: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn new(count: u32, offset: u32) -> Self {
        Self {
            count: Some(count),
            offset: Some(offset),
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("count", self.count.map(|c| c.to_string()));
        params.push_opt("offset", self.offset.map(|o| o.to_string()));
        params
    }
}

/// Merge optional filter, order and page into list query parameters
pub fn list_params<R>(
    filter: Option<&Filter<R>>,
    order: Option<&Order<R>>,
    page: Option<Pagination>,
) -> Params {
    let mut params = Params::new();
    if let Some(filter) = filter {
        params.extend(filter.params());
    }
    if let Some(order) = order {
        params.extend(order.params());
    }
    if let Some(page) = page {
        params.extend(page.params());
    }
    params
}

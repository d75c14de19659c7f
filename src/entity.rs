//! Per-entity defaults for the back-office list screens.
//!
//! Every screen follows the same pattern and differs only in the collection
//! it talks to, which fields are searchable, which field carries the date,
//! the page size, the realtime events that trigger a refresh, and the table
//! columns. [`Entity`] bundles those choices.

use crate::table::Column;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The entity types that have a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    #[allow(missing_docs)]
    Customers,
    #[allow(missing_docs)]
    Owners,
    #[allow(missing_docs)]
    Properties,
    #[allow(missing_docs)]
    Transactions,
    #[allow(missing_docs)]
    Reviews,
    #[allow(missing_docs)]
    Orders,
}

impl Entity {
    /// Every entity, in menu order.
    pub const ALL: [Entity; 6] = [
        Entity::Customers,
        Entity::Owners,
        Entity::Properties,
        Entity::Transactions,
        Entity::Reviews,
        Entity::Orders,
    ];

    /// Screen title.
    pub fn title(self) -> &'static str {
        match self {
            Entity::Customers => "Customers",
            Entity::Owners => "Owners",
            Entity::Properties => "Properties",
            Entity::Transactions => "Transactions",
            Entity::Reviews => "Reviews",
            Entity::Orders => "Orders",
        }
    }

    /// REST collection path segment.
    pub fn collection(self) -> &'static str {
        match self {
            Entity::Customers => "customers",
            Entity::Owners => "owners",
            Entity::Properties => "properties",
            Entity::Transactions => "transactions",
            Entity::Reviews => "reviews",
            Entity::Orders => "orders",
        }
    }

    /// Fields matched by the free-text search.
    pub fn search_fields(self) -> &'static [&'static str] {
        match self {
            Entity::Customers => &["name", "email", "phone"],
            Entity::Owners => &["name", "email", "phone"],
            Entity::Properties => &["title", "location", "owner.name"],
            Entity::Transactions => &["property.name", "customer.name", "status"],
            Entity::Reviews => &["customer.name", "property.name", "comment"],
            Entity::Orders => &["orderNumber", "customer.name", "status"],
        }
    }

    /// Field the month filter reads.
    pub fn date_field(self) -> &'static str {
        match self {
            Entity::Transactions => "date",
            Entity::Orders => "orderDate",
            _ => "createdAt",
        }
    }

    /// Rows per page.
    pub fn page_size(self) -> usize {
        match self {
            Entity::Customers | Entity::Orders => 8,
            Entity::Owners | Entity::Transactions => 6,
            Entity::Properties | Entity::Reviews => 5,
        }
    }

    /// Realtime event types that trigger a silent refresh.
    pub fn refresh_events(self) -> &'static [&'static str] {
        match self {
            Entity::Customers => &["customer-updated"],
            Entity::Owners => &["owner-stats-updated"],
            Entity::Properties => &["property-updated"],
            Entity::Transactions => &["transaction-updated"],
            Entity::Reviews => &["review-updated"],
            Entity::Orders => &["order-updated"],
        }
    }

    /// Table columns.
    pub fn columns(self) -> Vec<Column> {
        match self {
            Entity::Customers => vec![
                Column::new("Name", "name").with_width(20),
                Column::new("Email", "email").with_width(24),
                Column::new("Phone", "phone").with_width(14),
                Column::new("Joined", "createdAt").with_width(10),
            ],
            Entity::Owners => vec![
                Column::new("Name", "name").with_width(20),
                Column::new("Email", "email").with_width(24),
                Column::new("Phone", "phone").with_width(14),
                Column::new("Properties", "propertyCount").with_width(10),
            ],
            Entity::Properties => vec![
                Column::new("Title", "title").with_width(22),
                Column::new("Location", "location").with_width(16),
                Column::new("Price", "price").with_width(10),
                Column::new("Owner", "owner.name").with_width(16),
            ],
            Entity::Transactions => vec![
                Column::new("Property", "property.name").with_width(20),
                Column::new("Customer", "customer.name").with_width(18),
                Column::new("Amount", "amount").with_width(10),
                Column::new("Status", "status").with_width(10),
                Column::new("Date", "date").with_width(10),
            ],
            Entity::Reviews => vec![
                Column::new("Customer", "customer.name").with_width(18),
                Column::new("Property", "property.name").with_width(18),
                Column::new("Rating", "rating").with_width(6),
                Column::new("Comment", "comment").with_width(28),
            ],
            Entity::Orders => vec![
                Column::new("Order", "orderNumber").with_width(10),
                Column::new("Customer", "customer.name").with_width(18),
                Column::new("Total", "total").with_width(10),
                Column::new("Status", "status").with_width(10),
                Column::new("Date", "orderDate").with_width(10),
            ],
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Entity::ALL
            .into_iter()
            .find(|e| e.collection().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown entity: {wanted}"))
    }
}

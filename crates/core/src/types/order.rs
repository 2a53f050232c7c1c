//! Orders and delivery progress tracking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{BookId, OrderId};
use super::price::Price;

/// Delivery stage of an order, in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStage {
    #[default]
    Placed,
    Confirmed,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl OrderStage {
    /// Every stage, first to last.
    pub const ALL: [Self; 5] = [
        Self::Placed,
        Self::Confirmed,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// 1-based position of this stage.
    #[must_use]
    pub const fn step(self) -> u8 {
        match self {
            Self::Placed => 1,
            Self::Confirmed => 2,
            Self::Shipped => 3,
            Self::OutForDelivery => 4,
            Self::Delivered => 5,
        }
    }

    /// Stage for a 1-based step, if in range.
    #[must_use]
    pub const fn from_step(step: u8) -> Option<Self> {
        match step {
            1 => Some(Self::Placed),
            2 => Some(Self::Confirmed),
            3 => Some(Self::Shipped),
            4 => Some(Self::OutForDelivery),
            5 => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Confirmed => "Order Confirmed",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }
}

/// Completion state of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatus {
    pub stage: OrderStage,
    pub step: u8,
    pub label: String,
    pub completed: bool,
}

/// Snapshot of how far an order has progressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProgress {
    pub current: OrderStage,
    /// Whole-number percentage, `step / 5 * 100`.
    pub percent: u8,
    pub stages: Vec<StageStatus>,
}

impl OrderProgress {
    /// Build the progress view for the given current stage.
    #[must_use]
    pub fn for_stage(current: OrderStage) -> Self {
        let total = u8::try_from(OrderStage::ALL.len()).unwrap_or(u8::MAX);
        let stages = OrderStage::ALL
            .iter()
            .map(|&stage| StageStatus {
                stage,
                step: stage.step(),
                label: stage.label().to_owned(),
                completed: stage <= current,
            })
            .collect();

        Self {
            current,
            percent: current.step() * 100 / total,
            stages,
        }
    }
}

/// One purchased book within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub cover_image: String,
}

impl OrderLine {
    /// `price * quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub placed_on: NaiveDate,
    pub estimated_delivery: NaiveDate,
    pub stage: OrderStage,
    pub lines: Vec<OrderLine>,
    pub shipping: Price,
    pub shipping_address: ShippingAddress,
}

impl Order {
    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.shipping
    }

    /// Delivery progress for the current stage.
    #[must_use]
    pub fn progress(&self) -> OrderProgress {
        OrderProgress::for_stage(self.stage)
    }
}

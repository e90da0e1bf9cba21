//! Pure dataset assembly for the dashboard charts.

use crate::api::CategoryBookingStat;

/// Heading rendered above the category bookings bar chart.
pub const CATEGORY_CHART_TITLE: &str = "Category-wise Completed vs Cancelled Bookings";

/// Headline and detail for the no-data card.
pub const EMPTY_STATE_HEADLINE: &str = "No booking data available";
pub const EMPTY_STATE_DETAIL: &str = "No completed or cancelled bookings found.";

/// One bar group of the chart: a category with its two series values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBar {
    pub category: String,
    pub completed: u64,
    pub cancelled: u64,
}

impl CategoryBar {
    /// Total bookings in this category, both outcomes.
    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.completed + self.cancelled
    }
}

/// The assembled completed-vs-cancelled bar chart dataset.
///
/// Bars are sorted by booking volume, busiest category first, so the chart
/// reads the same regardless of backend ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBookingsChart {
    bars: Vec<CategoryBar>,
}

impl CategoryBookingsChart {
    /// Assemble the chart dataset from backend aggregate rows.
    #[must_use]
    pub fn from_stats(stats: Vec<CategoryBookingStat>) -> Self {
        let mut bars: Vec<CategoryBar> = stats
            .into_iter()
            .map(|stat| CategoryBar {
                category: stat.service_category,
                completed: stat.completed_count,
                cancelled: stat.cancelled_count,
            })
            .collect();
        bars.sort_by(|a, b| b.volume().cmp(&a.volume()));
        Self { bars }
    }

    /// Whether the no-data card should render instead of the chart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() || self.bars.iter().all(|bar| bar.volume() == 0)
    }

    #[must_use]
    pub fn bars(&self) -> &[CategoryBar] {
        &self.bars
    }

    /// X-axis labels, in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|bar| bar.category.as_str()).collect()
    }

    /// The completed series, aligned with [`Self::labels`].
    #[must_use]
    pub fn completed_series(&self) -> Vec<u64> {
        self.bars.iter().map(|bar| bar.completed).collect()
    }

    /// The cancelled series, aligned with [`Self::labels`].
    #[must_use]
    pub fn cancelled_series(&self) -> Vec<u64> {
        self.bars.iter().map(|bar| bar.cancelled).collect()
    }

    #[must_use]
    pub fn total_completed(&self) -> u64 {
        self.bars.iter().map(|bar| bar.completed).sum()
    }

    #[must_use]
    pub fn total_cancelled(&self) -> u64 {
        self.bars.iter().map(|bar| bar.cancelled).sum()
    }

    /// Completed share of all bookings, as a fraction in `0.0..=1.0`.
    /// Zero when there is no data at all.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_rate(&self) -> f64 {
        let completed = self.total_completed();
        let total = completed + self.total_cancelled();
        if total == 0 {
            return 0.0;
        }
        completed as f64 / total as f64
    }
}

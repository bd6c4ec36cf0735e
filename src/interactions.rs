use crate::page::{Page, WidgetId};
use crate::widgets::escape_html;
use tracing::info;

pub const DATE_RANGES: [&str; 6] = [
    "Today",
    "Yesterday",
    "Last 7 days",
    "Last 30 days",
    "This Month",
    "Last Month",
];

pub const DEFAULT_DATE_RANGE: &str = "Last 30 days";

// Range after `current`, wrapping; an unknown label restarts at the first.
pub fn next_date_range(current: &str) -> &'static str {
    let next = DATE_RANGES
        .iter()
        .position(|range| *range == current)
        .map_or(0, |idx| (idx + 1) % DATE_RANGES.len());
    DATE_RANGES[next]
}

pub fn cycle_date_range(page: &mut Page) -> Option<&'static str> {
    let current = page.text(WidgetId::DateRange)?;
    let next = next_date_range(current);
    page.set_text(WidgetId::DateRange, next);
    Some(next)
}

pub fn toggle_sidebar(page: &mut Page) -> Option<bool> {
    page.toggle_class(WidgetId::Sidebar, "active", None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    Performance,
    Revenue,
}

impl FilterTarget {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "performance" => Some(FilterTarget::Performance),
            "revenue" => Some(FilterTarget::Revenue),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterTarget::Performance => "performance",
            FilterTarget::Revenue => "revenue",
        }
    }
}

// Highlight state for the chart filter controls. Selecting a filter never
// changes the data behind the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFilters {
    performance: Vec<String>,
    active: Option<usize>,
    revenue: String,
}

impl Default for ChartFilters {
    fn default() -> Self {
        Self {
            performance: ["Weekly", "Monthly", "Yearly"].map(String::from).to_vec(),
            active: Some(1),
            revenue: "This Year".to_string(),
        }
    }
}

impl ChartFilters {
    pub fn active_performance(&self) -> Option<&str> {
        self.active.map(|idx| self.performance[idx].as_str())
    }

    pub fn revenue(&self) -> &str {
        &self.revenue
    }

    pub fn select(&mut self, page: &mut Page, target: FilterTarget, value: &str) {
        info!(chart = target.as_str(), filter = value, "filter changed");
        match target {
            FilterTarget::Performance => {
                self.active = self.performance.iter().position(|label| label == value);
            }
            FilterTarget::Revenue => {
                self.revenue = value.to_string();
            }
        }
        self.render(page);
    }

    pub fn render(&self, page: &mut Page) {
        let buttons: String = self
            .performance
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let class = if self.active == Some(idx) { " class=\"active\"" } else { "" };
                format!("<button{class}>{}</button>", escape_html(label))
            })
            .collect();
        page.set_markup(WidgetId::PerformanceFilter, buttons);
        page.set_text(WidgetId::RevenueFilter, self.revenue.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_cycles_wrap_back() {
        let mut page = Page::full();
        page.set_text(WidgetId::DateRange, DEFAULT_DATE_RANGE);
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(cycle_date_range(&mut page).unwrap());
        }
        assert_eq!(
            seen,
            [
                "This Month",
                "Last Month",
                "Today",
                "Yesterday",
                "Last 7 days",
                "Last 30 days",
            ]
        );
        assert_eq!(page.text(WidgetId::DateRange), Some(DEFAULT_DATE_RANGE));
    }

    #[test]
    fn unknown_range_restarts_at_today() {
        assert_eq!(next_date_range("Next Year"), "Today");
    }

    #[test]
    fn cycling_without_widget_is_a_no_op() {
        let mut page = Page::full().without(WidgetId::DateRange);
        assert_eq!(cycle_date_range(&mut page), None);
    }

    #[test]
    fn sidebar_toggles_active_class() {
        let mut page = Page::full();
        assert_eq!(toggle_sidebar(&mut page), Some(true));
        assert_eq!(toggle_sidebar(&mut page), Some(false));
        assert!(!page.has_class(WidgetId::Sidebar, "active"));
    }

    #[test]
    fn performance_filter_marks_single_button() {
        let mut page = Page::full();
        let mut filters = ChartFilters::default();
        filters.select(&mut page, FilterTarget::Performance, "Yearly");
        assert_eq!(filters.active_performance(), Some("Yearly"));
        let markup = page.text(WidgetId::PerformanceFilter).unwrap();
        assert_eq!(markup.matches("class=\"active\"").count(), 1);
        assert!(markup.contains("<button class=\"active\">Yearly</button>"));

        filters.select(&mut page, FilterTarget::Performance, "Hourly");
        assert_eq!(filters.active_performance(), None);
        assert_eq!(page.text(WidgetId::PerformanceFilter).unwrap().matches("active").count(), 0);
    }

    #[test]
    fn revenue_filter_records_selection() {
        let mut page = Page::full();
        let mut filters = ChartFilters::default();
        filters.select(&mut page, FilterTarget::Revenue, "Last Month");
        assert_eq!(filters.revenue(), "Last Month");
        assert_eq!(page.text(WidgetId::RevenueFilter), Some("Last Month"));
        assert_eq!(filters.active_performance(), Some("Monthly"));
    }

    #[test]
    fn filter_targets_parse() {
        assert_eq!(FilterTarget::parse("performance"), Some(FilterTarget::Performance));
        assert_eq!(FilterTarget::parse(" revenue "), Some(FilterTarget::Revenue));
        assert_eq!(FilterTarget::parse("orders"), None);
    }
}

use crate::charts::Charts;
use crate::counter::CounterSurface;
use crate::interactions::{self, ChartFilters, DEFAULT_DATE_RANGE, FilterTarget};
use crate::models::{DashboardData, Summary};
use crate::page::{Page, WidgetId};
use crate::stats::{CountryStats, Region};
use crate::theme::Theme;
use crate::widgets;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub theme: Theme,
    pub country: String,
    pub counter_running: bool,
    pub rendered_at: String,
    pub widgets: Page,
}

#[derive(Debug)]
pub struct Dashboard {
    data: DashboardData,
    page: Page,
    charts: Charts,
    theme: Theme,
    filters: ChartFilters,
    country: Region,
}

impl Dashboard {
    pub fn new(data: DashboardData, page: Page, theme: Theme) -> Self {
        Self {
            data,
            page,
            charts: Charts::new(),
            theme,
            filters: ChartFilters::default(),
            country: Region::Global,
        }
    }

    pub fn init(&mut self) {
        self.page.set_markup(WidgetId::ThemeToggle, self.theme.toggle_glyph());
        widgets::render_all(&mut self.page, &self.data);
        self.init_charts();
        self.page.set_text(WidgetId::DateRange, DEFAULT_DATE_RANGE);
        self.filters.render(&mut self.page);
        self.page.set_text(WidgetId::CovidCountry, self.country.as_str());
    }

    pub fn init_charts(&mut self) {
        self.charts
            .init_line_chart(&mut self.page, &self.data.monthly, self.theme);
        self.charts
            .init_doughnut_chart(&mut self.page, &self.data.categories, self.theme);
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn charts(&self) -> &Charts {
        &self.charts
    }

    pub fn charts_mut(&mut self) -> &mut Charts {
        &mut self.charts
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filters(&self) -> &ChartFilters {
        &self.filters
    }

    pub fn country(&self) -> &Region {
        &self.country
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.page
            .set_markup(WidgetId::ThemeToggle, self.theme.toggle_glyph());
        self.charts.refresh(&mut self.page, self.theme);
        info!(theme = self.theme.as_str(), "theme toggled");
        self.theme
    }

    pub fn toggle_sidebar(&mut self) -> Option<bool> {
        interactions::toggle_sidebar(&mut self.page)
    }

    pub fn cycle_date_range(&mut self) -> Option<&'static str> {
        interactions::cycle_date_range(&mut self.page)
    }

    pub fn select_filter(&mut self, target: FilterTarget, value: &str) {
        self.filters.select(&mut self.page, target, value);
    }

    pub fn select_country(&mut self, raw: &str) -> Region {
        self.country = Region::parse(raw);
        self.page
            .set_text(WidgetId::CovidCountry, self.country.as_str());
        self.country.clone()
    }

    pub fn apply_stats(&mut self, stats: &CountryStats) {
        stats.apply(&mut self.page);
    }

    pub fn snapshot(&self, counter_running: bool) -> DashboardSnapshot {
        DashboardSnapshot {
            theme: self.theme,
            country: self.country.as_str().to_string(),
            counter_running,
            rendered_at: Utc::now().to_rfc3339(),
            widgets: self.page.clone(),
        }
    }
}

impl CounterSurface for Dashboard {
    fn summary(&self) -> Summary {
        self.data.summary
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetId {
    TotalUsers,
    Revenue,
    Engagement,
    NewOrders,
    LineChart,
    DoughnutChart,
    ActivityBody,
    TopProducts,
    TrafficSources,
    ThemeToggle,
    Sidebar,
    DateRange,
    PerformanceFilter,
    RevenueFilter,
    CovidCountry,
    CovidConfirmed,
    CovidRecovered,
    CovidDeaths,
    CovidUpdated,
}

impl WidgetId {
    pub const ALL: [WidgetId; 19] = [
        WidgetId::TotalUsers,
        WidgetId::Revenue,
        WidgetId::Engagement,
        WidgetId::NewOrders,
        WidgetId::LineChart,
        WidgetId::DoughnutChart,
        WidgetId::ActivityBody,
        WidgetId::TopProducts,
        WidgetId::TrafficSources,
        WidgetId::ThemeToggle,
        WidgetId::Sidebar,
        WidgetId::DateRange,
        WidgetId::PerformanceFilter,
        WidgetId::RevenueFilter,
        WidgetId::CovidCountry,
        WidgetId::CovidConfirmed,
        WidgetId::CovidRecovered,
        WidgetId::CovidDeaths,
        WidgetId::CovidUpdated,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            WidgetId::TotalUsers => "total-users",
            WidgetId::Revenue => "revenue",
            WidgetId::Engagement => "engagement",
            WidgetId::NewOrders => "new-orders",
            WidgetId::LineChart => "line-chart",
            WidgetId::DoughnutChart => "doughnut-chart",
            WidgetId::ActivityBody => "activity-body",
            WidgetId::TopProducts => "top-products",
            WidgetId::TrafficSources => "traffic-sources",
            WidgetId::ThemeToggle => "theme-toggle",
            WidgetId::Sidebar => "sidebar",
            WidgetId::DateRange => "date-range",
            WidgetId::PerformanceFilter => "performance-filter",
            WidgetId::RevenueFilter => "revenue-filter",
            WidgetId::CovidCountry => "covid-country",
            WidgetId::CovidConfirmed => "covid-confirmed",
            WidgetId::CovidRecovered => "covid-recovered",
            WidgetId::CovidDeaths => "covid-deaths",
            WidgetId::CovidUpdated => "covid-updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Content {
    Empty,
    Text(String),
    Markup(String),
    Chart(serde_json::Value),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) | Content::Markup(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub content: Content,
    pub classes: BTreeSet<String>,
}

impl Default for Widget {
    fn default() -> Self {
        Self {
            content: Content::Empty,
            classes: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Page {
    widgets: BTreeMap<WidgetId, Widget>,
}

impl Page {
    pub fn full() -> Self {
        Self::with_mounts(WidgetId::ALL)
    }

    pub fn with_mounts(ids: impl IntoIterator<Item = WidgetId>) -> Self {
        Self {
            widgets: ids.into_iter().map(|id| (id, Widget::default())).collect(),
        }
    }

    pub fn without(mut self, id: WidgetId) -> Self {
        self.widgets.remove(&id);
        self
    }

    pub fn has(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.widgets.get(&id).and_then(|w| w.content.as_text())
    }

    pub fn set_text(&mut self, id: WidgetId, text: impl Into<String>) -> bool {
        self.set(id, Content::Text(text.into()))
    }

    pub fn set_markup(&mut self, id: WidgetId, markup: impl Into<String>) -> bool {
        self.set(id, Content::Markup(markup.into()))
    }

    pub fn set_chart(&mut self, id: WidgetId, config: serde_json::Value) -> bool {
        self.set(id, Content::Chart(config))
    }

    pub fn set(&mut self, id: WidgetId, content: Content) -> bool {
        match self.widgets.get_mut(&id) {
            Some(widget) => {
                widget.content = content;
                true
            }
            None => {
                debug!(widget = id.dom_id(), "widget not mounted, skipping write");
                false
            }
        }
    }

    // Flips `class` on the widget, or forces it when `force` is set.
    // Returns the resulting state, `None` when the widget is not mounted.
    pub fn toggle_class(&mut self, id: WidgetId, class: &str, force: Option<bool>) -> Option<bool> {
        let Some(widget) = self.widgets.get_mut(&id) else {
            debug!(widget = id.dom_id(), class, "widget not mounted, skipping class toggle");
            return None;
        };
        let enable = force.unwrap_or(!widget.classes.contains(class));
        if enable {
            widget.classes.insert(class.to_string());
        } else {
            widget.classes.remove(class);
        }
        Some(enable)
    }

    pub fn has_class(&self, id: WidgetId, class: &str) -> bool {
        self.widgets
            .get(&id)
            .is_some_and(|w| w.classes.contains(class))
    }
}

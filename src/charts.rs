use crate::format::{format_value, format_value_currency};
use crate::models::{CategoryShare, MonthlySeries};
use crate::page::{Page, WidgetId};
use crate::theme::{Palette, Theme};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

const REVENUE_LABEL: &str = "Revenue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    pub fill: Option<String>,
    pub axis: Option<&'static str>,
}

impl Series {
    fn is_currency(&self) -> bool {
        self.label == REVENUE_LABEL
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    id: u64,
    kind: ChartKind,
    canvas: WidgetId,
    labels: Vec<String>,
    series: Vec<Series>,
    palette: Palette,
    revision: u64,
}

impl ChartInstance {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn canvas(&self) -> WidgetId {
        self.canvas
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn set_value(&mut self, series: usize, index: usize, value: f64) -> bool {
        match self.series.get_mut(series).and_then(|s| s.values.get_mut(index)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn tooltip(&self, series: usize, index: usize) -> Option<String> {
        let data = self.series.get(series)?;
        match self.kind {
            ChartKind::Line => {
                let value = data.values.get(index).copied();
                Some(line_tooltip_label(&data.label, value))
            }
            ChartKind::Doughnut => {
                let label = self.labels.get(index)?;
                let value = data.values.get(index).copied().unwrap_or(0.0);
                Some(doughnut_tooltip_label(label, value, &data.values))
            }
        }
    }

    pub fn config(&self) -> Value {
        let mut config = match self.kind {
            ChartKind::Line => self.line_config(),
            ChartKind::Doughnut => self.doughnut_config(),
        };
        config["meta"] = json!({ "id": self.id, "revision": self.revision });
        config
    }

    fn render(&self, page: &mut Page) -> bool {
        page.set_chart(self.canvas, self.config())
    }

    fn tooltip_options(&self) -> Value {
        json!({
            "backgroundColor": self.palette.surface,
            "titleColor": self.palette.text,
            "bodyColor": self.palette.text,
            "borderColor": self.palette.border,
            "borderWidth": 1,
            "padding": 12,
        })
    }

    fn line_config(&self) -> Value {
        let p = self.palette;
        let datasets: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                let color = s.colors.first().map(String::as_str).unwrap_or("#4361ee");
                json!({
                    "label": s.label,
                    "data": s.values,
                    "borderColor": color,
                    "backgroundColor": s.fill,
                    "borderWidth": 2,
                    "tension": 0.3,
                    "fill": true,
                    "pointBackgroundColor": color,
                    "pointRadius": 4,
                    "pointHoverRadius": 6,
                    "yAxisID": s.axis,
                    "currency": s.is_currency(),
                })
            })
            .collect();

        json!({
            "type": "line",
            "data": { "labels": self.labels, "datasets": datasets },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "interaction": { "mode": "index", "intersect": false },
                "plugins": {
                    "legend": {
                        "display": true,
                        "position": "top",
                        "labels": { "boxWidth": 12, "padding": 20, "color": p.text },
                    },
                    "tooltip": self.tooltip_options(),
                },
                "scales": {
                    "x": {
                        "grid": { "display": false, "color": p.grid },
                        "ticks": { "color": p.ticks },
                        "border": { "display": false },
                    },
                    "y": {
                        "type": "linear",
                        "display": true,
                        "position": "left",
                        "grid": { "color": p.grid, "borderDash": [5, 5], "drawBorder": false },
                        "ticks": { "color": p.ticks, "format": "number" },
                    },
                    "y1": {
                        "type": "linear",
                        "display": true,
                        "position": "right",
                        "grid": { "drawOnChartArea": false, "drawBorder": false },
                        "ticks": { "color": p.ticks, "format": "currency" },
                    },
                },
            },
        })
    }

    fn doughnut_config(&self) -> Value {
        let datasets: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                json!({
                    "data": s.values,
                    "backgroundColor": s.colors,
                    "borderWidth": 0,
                    "hoverOffset": 10,
                })
            })
            .collect();

        json!({
            "type": "doughnut",
            "data": { "labels": self.labels, "datasets": datasets },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "cutout": "70%",
                "plugins": {
                    "legend": {
                        "position": "right",
                        "labels": {
                            "boxWidth": 12,
                            "padding": 20,
                            "color": self.palette.text,
                            "font": { "size": 12 },
                        },
                    },
                    "tooltip": self.tooltip_options(),
                },
            },
        })
    }
}

pub fn line_tooltip_label(series_label: &str, value: Option<f64>) -> String {
    let mut label = series_label.to_string();
    if !label.is_empty() {
        label.push_str(": ");
    }
    if let Some(value) = value {
        if series_label == REVENUE_LABEL {
            label.push_str(&format_value_currency(value));
        } else {
            label.push_str(&format_value(value));
        }
    }
    label
}

// The share is taken against the sum of `values` as they are now.
pub fn doughnut_tooltip_label(label: &str, value: f64, values: &[f64]) -> String {
    let total: f64 = values.iter().sum();
    let percentage = if total == 0.0 {
        0
    } else {
        ((value / total) * 100.0).round() as i64
    };
    format!("{label}: {}% ({percentage}% of total)", format_value(value))
}

#[derive(Debug, Default)]
pub struct Charts {
    line: Option<ChartInstance>,
    doughnut: Option<ChartInstance>,
    bindings: Vec<(WidgetId, u64)>,
    next_id: u64,
}

impl Charts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_line_chart(
        &mut self,
        page: &mut Page,
        monthly: &MonthlySeries,
        theme: Theme,
    ) -> Option<u64> {
        if let Some(previous) = self.line.take() {
            self.destroy(previous);
        }
        if !page.has(WidgetId::LineChart) {
            debug!("line chart canvas not mounted, skipping");
            return None;
        }

        let series = vec![
            Series {
                label: "Users".to_string(),
                values: to_f64(&monthly.users),
                colors: vec!["#4361ee".to_string()],
                fill: Some("rgba(67, 97, 238, 0.1)".to_string()),
                axis: Some("y"),
            },
            Series {
                label: REVENUE_LABEL.to_string(),
                values: to_f64(&monthly.revenue),
                colors: vec!["#4bb543".to_string()],
                fill: Some("rgba(75, 181, 67, 0.1)".to_string()),
                axis: Some("y1"),
            },
        ];
        let instance = self.construct(
            ChartKind::Line,
            WidgetId::LineChart,
            monthly.labels.clone(),
            series,
            theme,
        );
        instance.render(page);
        let id = instance.id;
        self.line = Some(instance);
        Some(id)
    }

    pub fn init_doughnut_chart(
        &mut self,
        page: &mut Page,
        categories: &[CategoryShare],
        theme: Theme,
    ) -> Option<u64> {
        if let Some(previous) = self.doughnut.take() {
            self.destroy(previous);
        }
        if !page.has(WidgetId::DoughnutChart) {
            debug!("doughnut chart canvas not mounted, skipping");
            return None;
        }

        let labels = categories.iter().map(|c| c.name.clone()).collect();
        let series = vec![Series {
            label: String::new(),
            values: categories.iter().map(|c| c.value as f64).collect(),
            colors: categories.iter().map(|c| c.color.clone()).collect(),
            fill: None,
            axis: None,
        }];
        let instance = self.construct(
            ChartKind::Doughnut,
            WidgetId::DoughnutChart,
            labels,
            series,
            theme,
        );
        instance.render(page);
        let id = instance.id;
        self.doughnut = Some(instance);
        Some(id)
    }

    pub fn refresh(&mut self, page: &mut Page, theme: Theme) {
        for instance in [self.line.as_mut(), self.doughnut.as_mut()].into_iter().flatten() {
            instance.palette = theme.palette();
            instance.revision += 1;
            instance.render(page);
        }
    }

    pub fn line(&self) -> Option<&ChartInstance> {
        self.line.as_ref()
    }

    pub fn line_mut(&mut self) -> Option<&mut ChartInstance> {
        self.line.as_mut()
    }

    pub fn doughnut(&self) -> Option<&ChartInstance> {
        self.doughnut.as_ref()
    }

    pub fn doughnut_mut(&mut self) -> Option<&mut ChartInstance> {
        self.doughnut.as_mut()
    }

    pub fn bound_to(&self, canvas: WidgetId) -> usize {
        self.bindings.iter().filter(|(c, _)| *c == canvas).count()
    }

    fn construct(
        &mut self,
        kind: ChartKind,
        canvas: WidgetId,
        labels: Vec<String>,
        series: Vec<Series>,
        theme: Theme,
    ) -> ChartInstance {
        self.next_id += 1;
        let id = self.next_id;
        self.bindings.push((canvas, id));
        debug!(chart = id, canvas = canvas.dom_id(), "chart constructed");
        ChartInstance {
            id,
            kind,
            canvas,
            labels,
            series,
            palette: theme.palette(),
            revision: 0,
        }
    }

    fn destroy(&mut self, instance: ChartInstance) {
        self.bindings.retain(|(_, id)| *id != instance.id);
        debug!(chart = instance.id, canvas = instance.canvas.dom_id(), "chart destroyed");
    }
}

fn to_f64(values: &[u64]) -> Vec<f64> {
    values.iter().map(|v| *v as f64).collect()
}

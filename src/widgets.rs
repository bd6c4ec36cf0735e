use crate::format::{format_currency, format_number};
use crate::models::{ActivityRecord, DashboardData, ProductSales, Summary, TrafficSource};
use crate::page::{Page, WidgetId};

pub fn update_summary_cards(page: &mut Page, summary: &Summary) {
    page.set_text(WidgetId::TotalUsers, format_number(summary.total_users));
    page.set_text(WidgetId::Revenue, format_currency(summary.revenue));
    page.set_text(WidgetId::Engagement, format!("{}%", summary.engagement_percent));
    page.set_text(WidgetId::NewOrders, format_number(summary.new_orders));
}

pub fn populate_recent_activities(page: &mut Page, activities: &[ActivityRecord]) {
    let rows: String = activities.iter().map(activity_row).collect();
    page.set_markup(WidgetId::ActivityBody, rows);
}

pub fn populate_top_products(page: &mut Page, products: &[ProductSales]) {
    let items: String = products.iter().map(product_item).collect();
    page.set_markup(WidgetId::TopProducts, items);
}

pub fn populate_traffic_sources(page: &mut Page, sources: &[TrafficSource]) {
    let items: String = sources.iter().map(traffic_item).collect();
    page.set_markup(WidgetId::TrafficSources, items);
}

pub fn render_all(page: &mut Page, data: &DashboardData) {
    update_summary_cards(page, &data.summary);
    populate_recent_activities(page, &data.recent_activities);
    populate_top_products(page, &data.top_products);
    populate_traffic_sources(page, &data.traffic_sources);
}

fn activity_row(activity: &ActivityRecord) -> String {
    let user = escape_html(&activity.user);
    let status = activity.status.as_str();
    format!(
        r#"<tr class="fade-in">
  <td>#{id}</td>
  <td>
    <div class="d-flex align-center">
      <img src="https://ui-avatars.com/api/?name={avatar}&background=random" alt="{user}" class="user-avatar">
      <span>{user}</span>
    </div>
  </td>
  <td>{action}</td>
  <td>{time}</td>
  <td><span class="status {status}">{status}</span></td>
  <td>
    <button class="btn-icon" title="View Details"><i class="fas fa-ellipsis-v"></i></button>
  </td>
</tr>
"#,
        id = activity.id,
        avatar = urlencoding::encode(&activity.user),
        action = escape_html(&activity.action),
        time = escape_html(&activity.relative_time),
    )
}

fn product_item(product: &ProductSales) -> String {
    let revenue = format_currency(product.revenue);
    format!(
        r#"<div class="product-item">
  <div class="product-info">
    <div class="product-name">{name}</div>
    <div class="product-sales">{units} sales • {revenue}</div>
  </div>
  <div class="product-amount">{revenue}</div>
</div>
"#,
        name = escape_html(&product.name),
        units = format_number(product.units_sold),
    )
}

fn traffic_item(source: &TrafficSource) -> String {
    let class = source.name.to_lowercase().replacen(' ', "-", 1);
    format!(
        r#"<div class="traffic-source">
  <div class="source-header">
    <span class="source-name">{name}</span>
    <span class="source-percent">{percent}%</span>
  </div>
  <div class="progress-bar">
    <div class="progress {class}" style="width: {percent}%; background: {color};"></div>
  </div>
</div>
"#,
        name = escape_html(&source.name),
        class = escape_html(&class),
        percent = source.percent,
        color = escape_html(&source.color),
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

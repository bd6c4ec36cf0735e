use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_users: u64,
    pub revenue: u64,
    pub engagement_percent: u8,
    pub new_orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub users: Vec<u64>,
    pub revenue: Vec<u64>,
    pub engagement: Vec<u64>,
    pub orders: Vec<u64>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSource {
    pub name: String,
    pub percent: u64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Completed,
    Pending,
    Failed,
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityStatus::Completed => "completed",
            ActivityStatus::Pending => "pending",
            ActivityStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: u64,
    pub user: String,
    pub action: String,
    pub relative_time: String,
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub name: String,
    pub units_sold: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: Summary,
    pub monthly: MonthlySeries,
    pub categories: Vec<CategoryShare>,
    pub recent_activities: Vec<ActivityRecord>,
    pub top_products: Vec<ProductSales>,
    pub traffic_sources: Vec<TrafficSource>,
}

impl DashboardData {
    pub fn sample() -> Self {
        Self {
            summary: Summary {
                total_users: 12_453,
                revenue: 89_432,
                engagement_percent: 67,
                new_orders: 342,
            },
            monthly: MonthlySeries {
                labels: ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                users: vec![8200, 9350, 10480, 11650, 12800, 13950, 15100, 16300, 17453],
                revenue: vec![48000, 51500, 55500, 60500, 67500, 75200, 82500, 86900, 89432],
                engagement: vec![62, 65, 63, 67, 66, 69, 68, 66, 67],
                orders: vec![280, 310, 290, 320, 340, 360, 350, 365, 380],
            },
            categories: vec![
                category("Electronics", 35, "#4361ee"),
                category("Fashion", 25, "#4cc9f0"),
                category("Home & Garden", 20, "#4bb543"),
                category("Books", 12, "#f9c74f"),
                category("Others", 8, "#ef476f"),
            ],
            recent_activities: vec![
                activity(1001, "John Doe", "Purchase", "2 mins ago", ActivityStatus::Completed),
                activity(
                    1002,
                    "Jane Smith",
                    "Account Update",
                    "15 mins ago",
                    ActivityStatus::Completed,
                ),
                activity(1003, "Bob Johnson", "Login", "32 mins ago", ActivityStatus::Completed),
                activity(
                    1004,
                    "Alice Brown",
                    "Password Reset",
                    "1 hour ago",
                    ActivityStatus::Pending,
                ),
                activity(
                    1005,
                    "Charlie Wilson",
                    "Purchase",
                    "2 hours ago",
                    ActivityStatus::Completed,
                ),
            ],
            top_products: vec![
                product("Wireless Earbuds", 1245, 18675),
                product("Smart Watch", 987, 24675),
                product("Bluetooth Speaker", 756, 15120),
                product("Laptop Backpack", 543, 8145),
                product("Phone Case", 432, 2160),
            ],
            traffic_sources: vec![
                traffic("Organic Search", 45, "#4361ee"),
                traffic("Direct", 30, "#4bb543"),
                traffic("Social", 15, "#f9c74f"),
                traffic("Email", 10, "#ef476f"),
            ],
        }
    }
}

fn category(name: &str, value: u64, color: &str) -> CategoryShare {
    CategoryShare {
        name: name.to_string(),
        value,
        color: color.to_string(),
    }
}

fn traffic(name: &str, percent: u64, color: &str) -> TrafficSource {
    TrafficSource {
        name: name.to_string(),
        percent,
        color: color.to_string(),
    }
}

fn activity(
    id: u64,
    user: &str,
    action: &str,
    time: &str,
    status: ActivityStatus,
) -> ActivityRecord {
    ActivityRecord {
        id,
        user: user.to_string(),
        action: action.to_string(),
        relative_time: time.to_string(),
        status,
    }
}

fn product(name: &str, units_sold: u64, revenue: u64) -> ProductSales {
    ProductSales {
        name: name.to_string(),
        units_sold,
        revenue,
    }
}

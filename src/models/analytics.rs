use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub followers: u32,
    pub engagement: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub trend: String,
}

/// Static analytics shown on the overview screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: Vec<StatCard>,
    pub weekly: Vec<ChartDataPoint>,
}

impl DashboardSnapshot {
    pub fn mock() -> Self {
        let weekly = [
            ("Mon", 4000, 2400),
            ("Tue", 4500, 2800),
            ("Wed", 5100, 3200),
            ("Thu", 4800, 2900),
            ("Fri", 5400, 3600),
            ("Sat", 6000, 4200),
            ("Sun", 6500, 4800),
        ]
        .into_iter()
        .map(|(name, followers, engagement)| ChartDataPoint {
            name: name.to_string(),
            followers,
            engagement,
        })
        .collect();

        let stats = [
            ("Total Followers", "124.5K", "12%"),
            ("Impressions", "1.2M", "8.5%"),
            ("Engagement Rate", "4.8%", "2.1%"),
            ("Content Reach", "850K", "15%"),
        ]
        .into_iter()
        .map(|(title, value, trend)| StatCard {
            title: title.to_string(),
            value: value.to_string(),
            trend: trend.to_string(),
        })
        .collect();

        Self { stats, weekly }
    }

    pub fn follower_growth(&self) -> i64 {
        match (self.weekly.first(), self.weekly.last()) {
            (Some(first), Some(last)) => last.followers as i64 - first.followers as i64,
            _ => 0,
        }
    }

    pub fn peak_engagement_day(&self) -> Option<&ChartDataPoint> {
        self.weekly.iter().max_by_key(|p| p.engagement)
    }
}

use serde::{Deserialize, Serialize};

/// Counters shown on the overview page (`GET /dashboard/stats`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_charge_points: u32,
    #[serde(default)]
    pub online_charge_points: u32,
    #[serde(default)]
    pub offline_charge_points: u32,
    #[serde(default)]
    pub today_transactions: u32,
}

impl DashboardStats {
    /// Share of online charge points in percent, `None` without any.
    pub fn online_percent(&self) -> Option<f64> {
        if self.total_charge_points == 0 {
            return None;
        }
        Some(self.online_charge_points as f64 * 100.0 / self.total_charge_points as f64)
    }
}

/// Seven-day chart (`GET /dashboard/weekly-chart`), one label per day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyChart {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<ChartDataset>,
}

impl WeeklyChart {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.iter().all(|d| d.data.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default)]
    pub border_color: String,
    #[serde(default)]
    pub fill: bool,
}

impl ChartDataset {
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_weekly_chart() {
        let chart: WeeklyChart = serde_json::from_value(json!({
            "labels": ["Sen", "Sel", "Rab", "Kam", "Jum", "Sab", "Min"],
            "datasets": [
                { "label": "Sesi", "data": [1, 0, 3, 2, 0, 0, 4], "borderColor": "#1976d2", "fill": false },
                { "label": "Energi (kWh)", "data": [4.5, 0, 12.25, 8, 0, 0, 20], "borderColor": "#43a047", "fill": false }
            ]
        }))
        .unwrap();

        assert_eq!(chart.labels.len(), 7);
        assert_eq!(chart.datasets[0].max_value(), 4.0);
        assert_eq!(chart.datasets[1].total(), 44.75);
        assert_eq!(chart.datasets[1].border_color, "#43a047");
        assert!(!chart.is_empty());
    }

    #[test]
    fn missing_stats_fields_default_to_zero() {
        let stats: DashboardStats = serde_json::from_value(json!({ "totalChargePoints": 4, "onlineChargePoints": 3 })).unwrap();
        assert_eq!(stats.offline_charge_points, 0);
        assert_eq!(stats.online_percent(), Some(75.0));
        assert_eq!(DashboardStats::default().online_percent(), None);
    }
}

//! 统计摘要的展示计算

use crate::AnalyticsSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryCategory {
    Active,
    Done,
    Overdue,
}

impl SummaryCategory {
    pub const ALL: [SummaryCategory; 3] = [
        SummaryCategory::Active,
        SummaryCategory::Done,
        SummaryCategory::Overdue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SummaryCategory::Active => "Active",
            SummaryCategory::Done => "Done",
            SummaryCategory::Overdue => "Overdue",
        }
    }
}

/// 某一类别在总数中的占比
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
    pub category: SummaryCategory,
    pub value: u64,
    /// 0.0 ..= 1.0
    pub share: f64,
}

impl CategoryShare {
    /// 进度条宽度，例如 `"37.5%"`
    pub fn width_percent(&self) -> String {
        format!("{:.1}%", self.share * 100.0)
    }
}

impl AnalyticsSummary {
    pub fn value(&self, category: SummaryCategory) -> u64 {
        match category {
            SummaryCategory::Active => self.active,
            SummaryCategory::Done => self.done,
            SummaryCategory::Overdue => self.overdue,
        }
    }

    pub fn total(&self) -> u64 {
        self.active + self.done + self.overdue
    }

    /// 各类别占比；总数为 0 时全部为 0
    pub fn shares(&self) -> [CategoryShare; 3] {
        let total = self.total();
        SummaryCategory::ALL.map(|category| {
            let value = self.value(category);
            let share = if total == 0 {
                0.0
            } else {
                value as f64 / total as f64
            };
            CategoryShare {
                category,
                value,
                share,
            }
        })
    }
}

use super::types::{Category, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Everything the manager dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub urgent: usize,
    pub negative: usize,
    pub categories: Vec<CategoryCount>,
}

impl DashboardStats {
    /// Largest bar, at least 1 so bar widths never divide by zero
    pub fn max_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.count)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    categories: Vec<Category>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(Category::ALL.to_vec())
    }
}

impl Aggregator {
    /// `categories` fixes which rows appear and how ties are ordered
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// One row per category (zero counts included), busiest first
    pub fn aggregate(&self, tickets: &[Ticket]) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = self
            .categories
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: tickets.iter().filter(|t| t.category == category).count(),
            })
            .collect();
        // stable, so ties stay in declaration order
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    pub fn dashboard(&self, tickets: &[Ticket]) -> DashboardStats {
        DashboardStats {
            total: tickets.len(),
            urgent: tickets.iter().filter(|t| t.priority.is_urgent()).count(),
            negative: tickets.iter().filter(|t| t.is_negative()).count(),
            categories: self.aggregate(tickets),
        }
    }
}

use crate::models::{CategoryTotal, Goal, GoalProgress, StatsSummary};

pub fn build_summary(goals: &[Goal]) -> StatsSummary {
    StatsSummary {
        goal_count: goals.len(),
        completed_count: goals.iter().filter(|goal| goal.is_completed()).count(),
        total_target: total_target(goals),
        total_saved: total_saved(goals),
        remaining: remaining(goals),
        overall_progress_percent: overall_progress_percent(goals),
        by_category: by_category(goals),
        goals: goals
            .iter()
            .map(|goal| GoalProgress {
                id: goal.id.clone(),
                name: goal.name.clone(),
                progress_percent: per_goal_progress_percent(goal),
                completed: goal.is_completed(),
            })
            .collect(),
    }
}

pub fn total_target(goals: &[Goal]) -> f64 {
    goals.iter().map(|goal| goal.target_amount).sum()
}

pub fn total_saved(goals: &[Goal]) -> f64 {
    goals.iter().map(|goal| goal.current_amount).sum()
}

/// Negative when the goals are collectively over-saved.
pub fn remaining(goals: &[Goal]) -> f64 {
    total_target(goals) - total_saved(goals)
}

/// Unclamped; exceeds 100 when the aggregate saved passes the aggregate target.
pub fn overall_progress_percent(goals: &[Goal]) -> f64 {
    let target = total_target(goals);
    if target == 0.0 {
        return 0.0;
    }
    total_saved(goals) / target * 100.0
}

/// Display progress for one goal, clamped to 100. Expects `target_amount > 0`.
pub fn per_goal_progress_percent(goal: &Goal) -> f64 {
    (goal.current_amount / goal.target_amount * 100.0).min(100.0)
}

/// Target sums per category, in order of first appearance.
pub fn by_category(goals: &[Goal]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for goal in goals {
        match totals.iter_mut().find(|total| total.category == goal.category) {
            Some(total) => total.target_sum += goal.target_amount,
            None => totals.push(CategoryTotal {
                category: goal.category,
                target_sum: goal.target_amount,
            }),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn goal(category: Category, target: f64, current: f64) -> Goal {
        Goal {
            id: format!("{category}-{target}-{current}"),
            name: format!("{category} goal"),
            target_amount: target,
            current_amount: current,
            category,
            created_at: 0,
            notes: None,
        }
    }

    #[test]
    fn empty_collection_has_zero_progress() {
        assert_eq!(total_target(&[]), 0.0);
        assert_eq!(total_saved(&[]), 0.0);
        assert_eq!(remaining(&[]), 0.0);
        assert_eq!(overall_progress_percent(&[]), 0.0);
        assert!(by_category(&[]).is_empty());

        let summary = build_summary(&[]);
        assert_eq!(summary.goal_count, 0);
        assert_eq!(summary.overall_progress_percent, 0.0);
    }

    #[test]
    fn totals_and_remaining() {
        let goals = vec![
            goal(Category::Travel, 1000.0, 250.0),
            goal(Category::Home, 500.0, 500.0),
        ];
        assert_eq!(total_target(&goals), 1500.0);
        assert_eq!(total_saved(&goals), 750.0);
        assert_eq!(remaining(&goals), 750.0);
        assert_eq!(overall_progress_percent(&goals), 50.0);
    }

    #[test]
    fn overall_progress_is_unclamped() {
        let goals = vec![goal(Category::Travel, 100.0, 250.0)];
        assert_eq!(overall_progress_percent(&goals), 250.0);
        assert_eq!(remaining(&goals), -150.0);
    }

    #[test]
    fn per_goal_progress_is_clamped_to_100() {
        assert_eq!(per_goal_progress_percent(&goal(Category::Other, 200.0, 50.0)), 25.0);
        assert_eq!(per_goal_progress_percent(&goal(Category::Other, 200.0, 0.0)), 0.0);
        assert_eq!(per_goal_progress_percent(&goal(Category::Other, 200.0, 200.0)), 100.0);
        assert_eq!(per_goal_progress_percent(&goal(Category::Other, 200.0, 9000.0)), 100.0);
    }

    #[test]
    fn by_category_keeps_first_seen_order() {
        let goals = vec![
            goal(Category::Travel, 100.0, 0.0),
            goal(Category::Technology, 50.0, 0.0),
            goal(Category::Travel, 200.0, 0.0),
        ];
        let totals = by_category(&goals);
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: Category::Travel,
                    target_sum: 300.0,
                },
                CategoryTotal {
                    category: Category::Technology,
                    target_sum: 50.0,
                },
            ]
        );
    }

    #[test]
    fn summary_counts_completed_goals() {
        let goals = vec![
            goal(Category::Vehicle, 300.0, 300.0),
            goal(Category::Education, 400.0, 100.0),
            goal(Category::Vehicle, 100.0, 150.0),
        ];
        let summary = build_summary(&goals);
        assert_eq!(summary.goal_count, 3);
        assert_eq!(summary.completed_count, 2);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.goals[1].progress_percent, 25.0);
        assert!(summary.goals[2].completed);
        assert_eq!(summary.goals[2].progress_percent, 100.0);
    }
}

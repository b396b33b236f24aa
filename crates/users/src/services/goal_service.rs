//! Goals: creation, progress tracking with the completion rule, and statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use nutri_database::{Goal, GoalProgressUpdate, GoalRepo, NewGoal};
use tracing::info;

use super::ensure_owner;
use crate::types::{GoalStats, GoalTypeStats, NewGoalRequest, UserError, UserResult};

/// A goal is complete whenever progress has reached the target. Re-evaluated
/// on every update, so lowering the progress reopens the goal.
pub fn is_completed(current_value: f64, target_value: f64) -> bool {
    current_value >= target_value
}

pub fn summarize(goals: &[Goal]) -> GoalStats {
    let total = goals.len();
    let completed = goals.iter().filter(|goal| goal.completed).count();
    let rate = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let mut by_kind: BTreeMap<String, GoalTypeStats> = BTreeMap::new();
    for goal in goals {
        let entry = by_kind.entry(goal.kind.clone()).or_default();
        entry.total += 1;
        if goal.completed {
            entry.concluidas += 1;
        }
    }

    GoalStats {
        total_metas: total,
        metas_concluidas: completed,
        taxa_conclusao: (rate * 100.0).round() / 100.0,
        por_tipo: by_kind,
    }
}

#[derive(Clone)]
pub struct GoalService {
    goals: Arc<dyn GoalRepo>,
}

impl GoalService {
    pub fn new(goals: Arc<dyn GoalRepo>) -> Self {
        Self { goals }
    }

    pub async fn list(&self, caller_id: &str, user_id: &str) -> UserResult<Vec<Goal>> {
        ensure_owner(caller_id, user_id)?;
        Ok(self.goals.list_for_user(user_id).await?)
    }

    pub async fn create(&self, caller_id: &str, request: NewGoalRequest) -> UserResult<Goal> {
        ensure_owner(caller_id, &request.usuario_id)?;

        let kind = request
            .tipo
            .filter(|kind| !kind.trim().is_empty())
            .ok_or_else(|| UserError::InvalidInput("tipo and valor_alvo are required".to_string()))?;
        let target = request
            .valor_alvo
            .filter(|target| *target > 0.0)
            .ok_or_else(|| UserError::InvalidInput("tipo and valor_alvo are required".to_string()))?;

        let goal = NewGoal {
            user_id: request.usuario_id,
            kind,
            target_value: target,
            current_value: 0.0,
            deadline: request.data_limite,
            description: request.descricao,
            completed: false,
            created_at: Utc::now().to_rfc3339(),
        };
        let created = self.goals.create(&goal).await?;
        Ok(created)
    }

    pub async fn update_progress(
        &self,
        caller_id: &str,
        goal_id: &str,
        current_value: Option<f64>,
    ) -> UserResult<Goal> {
        let current_value = current_value
            .ok_or_else(|| UserError::InvalidInput("valor_atual is required".to_string()))?;
        let goal = self.owned_goal(caller_id, goal_id).await?;

        let update = GoalProgressUpdate {
            current_value,
            completed: is_completed(current_value, goal.target_value),
            updated_at: Utc::now().to_rfc3339(),
        };
        let updated = self
            .goals
            .update_progress(goal_id, &update)
            .await?
            .ok_or(UserError::NotFound("Goal"))?;

        if updated.completed != goal.completed {
            info!(%goal_id, completed = updated.completed, "goal completion changed");
        }
        Ok(updated)
    }

    pub async fn delete(&self, caller_id: &str, goal_id: &str) -> UserResult<()> {
        self.owned_goal(caller_id, goal_id).await?;
        self.goals.delete(goal_id).await?;
        Ok(())
    }

    pub async fn stats(&self, caller_id: &str, user_id: &str) -> UserResult<GoalStats> {
        ensure_owner(caller_id, user_id)?;
        let goals = self.goals.list_for_user(user_id).await?;
        Ok(summarize(&goals))
    }

    async fn owned_goal(&self, caller_id: &str, goal_id: &str) -> UserResult<Goal> {
        let goal = self
            .goals
            .find_by_id(goal_id)
            .await?
            .ok_or(UserError::NotFound("Goal"))?;
        ensure_owner(caller_id, &goal.user_id)?;
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutri_database::test_support::InMemoryStore;

    fn request(user: &str, kind: Option<&str>, target: Option<f64>) -> NewGoalRequest {
        NewGoalRequest {
            usuario_id: user.to_string(),
            tipo: kind.map(str::to_string),
            valor_alvo: target,
            data_limite: None,
            descricao: None,
        }
    }

    fn goal(id: &str, kind: &str, completed: bool) -> Goal {
        Goal {
            id: id.to_string(),
            user_id: "ana".to_string(),
            kind: kind.to_string(),
            target_value: 10.0,
            current_value: 0.0,
            deadline: None,
            description: None,
            completed,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_completion_rule() {
        assert!(is_completed(10.0, 10.0));
        assert!(is_completed(12.5, 10.0));
        assert!(!is_completed(9.99, 10.0));
    }

    #[test]
    fn test_summarize_groups_by_kind() {
        let stats = summarize(&[
            goal("1", "peso", true),
            goal("2", "peso", false),
            goal("3", "agua", false),
        ]);

        assert_eq!(stats.total_metas, 3);
        assert_eq!(stats.metas_concluidas, 1);
        assert_eq!(stats.taxa_conclusao, 33.33);
        assert_eq!(
            stats.por_tipo.get("peso"),
            Some(&GoalTypeStats {
                total: 2,
                concluidas: 1
            })
        );
        assert_eq!(stats.por_tipo.get("agua").map(|s| s.concluidas), Some(0));
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_metas, 0);
        assert_eq!(stats.taxa_conclusao, 0.0);
        assert!(stats.por_tipo.is_empty());
    }

    #[tokio::test]
    async fn test_progress_flips_completion_both_ways() {
        let service = GoalService::new(Arc::new(InMemoryStore::new()));
        let created = service
            .create("ana", request("ana", Some("peso"), Some(5.0)))
            .await
            .unwrap();
        assert!(!created.completed);
        assert_eq!(created.current_value, 0.0);

        let reached = service
            .update_progress("ana", &created.id, Some(5.0))
            .await
            .unwrap();
        assert!(reached.completed);
        assert!(reached.updated_at.is_some());

        let reopened = service
            .update_progress("ana", &created.id, Some(4.0))
            .await
            .unwrap();
        assert!(!reopened.completed);
    }

    #[tokio::test]
    async fn test_create_validates_kind_and_target() {
        let service = GoalService::new(Arc::new(InMemoryStore::new()));

        for bad in [
            request("ana", None, Some(5.0)),
            request("ana", Some("peso"), None),
            request("ana", Some("peso"), Some(0.0)),
            request("ana", Some("  "), Some(3.0)),
        ] {
            assert!(matches!(
                service.create("ana", bad).await,
                Err(UserError::InvalidInput(_))
            ));
        }

        assert!(matches!(
            service
                .create("bob", request("ana", Some("peso"), Some(5.0)))
                .await,
            Err(UserError::AccessDenied)
        ));
    }

    #[tokio::test]
    async fn test_foreign_goals_are_protected() {
        let store = InMemoryStore::new();
        store.seed_goal(goal("7", "peso", false)).await;
        let service = GoalService::new(Arc::new(store.clone()));

        assert!(matches!(
            service.update_progress("bob", "7", Some(1.0)).await,
            Err(UserError::AccessDenied)
        ));
        assert!(matches!(
            service.delete("bob", "7").await,
            Err(UserError::AccessDenied)
        ));
        assert_eq!(store.goals().await.len(), 1);

        assert!(matches!(
            service.update_progress("ana", "missing", Some(1.0)).await,
            Err(UserError::NotFound("Goal"))
        ));
        assert!(matches!(
            service.update_progress("ana", "7", None).await,
            Err(UserError::InvalidInput(_))
        ));

        service.delete("ana", "7").await.unwrap();
        assert!(store.goals().await.is_empty());
    }
}

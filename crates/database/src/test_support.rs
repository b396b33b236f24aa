//! In-memory store implementing every repository trait
//!
//! Used by service and router tests in place of the hosted backend. Ordering
//! and limits mirror the queries the Supabase repositories issue.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{
    ChatMessage, Goal, GoalProgressUpdate, HealthMetric, NewChatMessage, NewGoal,
    NewHealthMetric, NewNutritionist, NewUserProfile, Nutritionist, NutritionistUpdate,
    NutritionistWithUser, PatientLink, PatientSummary, UserProfile, UserProfileUpdate,
    UserSummary,
};
use crate::repos::{GoalRepo, MessageRepo, MetricRepo, NutritionistRepo, UserRepo};
use crate::types::{StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    users: Vec<UserProfile>,
    metrics: Vec<HealthMetric>,
    nutritionists: Vec<Nutritionist>,
    patient_links: Vec<(String, PatientLink)>,
    messages: Vec<ChatMessage>,
    goals: Vec<Goal>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    next_id: Arc<AtomicU64>,
    fail_mark_read: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> String {
        (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    /// Make every read-marking call fail with a store error
    pub fn fail_mark_read(&self, fail: bool) {
        self.fail_mark_read.store(fail, Ordering::SeqCst);
    }

    pub async fn seed_user(&self, profile: UserProfile) {
        self.tables.write().await.users.push(profile);
    }

    pub async fn seed_nutritionist(&self, nutritionist: Nutritionist) {
        self.tables.write().await.nutritionists.push(nutritionist);
    }

    pub async fn seed_patient(&self, nutritionist_id: &str, patient: PatientSummary) {
        let link = PatientLink {
            id: self.allocate_id(),
            patient: Some(patient),
        };
        self.tables
            .write()
            .await
            .patient_links
            .push((nutritionist_id.to_string(), link));
    }

    pub async fn seed_message(&self, message: ChatMessage) {
        self.tables.write().await.messages.push(message);
    }

    pub async fn seed_metric(&self, metric: HealthMetric) {
        self.tables.write().await.metrics.push(metric);
    }

    pub async fn seed_goal(&self, goal: Goal) {
        self.tables.write().await.goals.push(goal);
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.tables.read().await.messages.clone()
    }

    pub async fn goals(&self) -> Vec<Goal> {
        self.tables.read().await.goals.clone()
    }
}

/// Build a minimal profile row for seeding
pub fn profile(id: &str, name: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        name: name.to_string(),
        email: Some(format!("{id}@example.com")),
        cpf: None,
        birth_date: None,
        phone: None,
        height: None,
        weight: None,
        gender: None,
        objective: None,
        created_at: None,
    }
}

#[async_trait]
impl UserRepo for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|user| user.id == id).cloned())
    }

    async fn create(&self, new: &NewUserProfile) -> StoreResult<UserProfile> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|user| user.id == new.id) {
            return Err(StoreError::Api {
                status: 409,
                message: "duplicate key value violates unique constraint".to_string(),
            });
        }
        let created = UserProfile {
            id: new.id.clone(),
            name: new.name.clone(),
            email: Some(new.email.clone()),
            cpf: new.cpf.clone(),
            birth_date: new.birth_date.clone(),
            phone: new.phone.clone(),
            height: new.height,
            weight: new.weight,
            gender: new.gender.clone(),
            objective: new.objective.clone(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        update: &UserProfileUpdate,
    ) -> StoreResult<Option<UserProfile>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if update.birth_date.is_some() {
            user.birth_date = update.birth_date.clone();
        }
        if update.phone.is_some() {
            user.phone = update.phone.clone();
        }
        if update.height.is_some() {
            user.height = update.height;
        }
        if update.weight.is_some() {
            user.weight = update.weight;
        }
        if update.gender.is_some() {
            user.gender = update.gender.clone();
        }
        if update.objective.is_some() {
            user.objective = update.objective.clone();
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl MetricRepo for InMemoryStore {
    async fn list_recent(&self, user_id: &str, limit: usize) -> StoreResult<Vec<HealthMetric>> {
        let tables = self.tables.read().await;
        let mut metrics: Vec<HealthMetric> = tables
            .metrics
            .iter()
            .filter(|metric| metric.user_id == user_id)
            .cloned()
            .collect();
        metrics.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        metrics.truncate(limit);
        Ok(metrics)
    }

    async fn create(&self, new: &NewHealthMetric) -> StoreResult<HealthMetric> {
        let created = HealthMetric {
            id: self.allocate_id(),
            user_id: new.user_id.clone(),
            values: new.values.clone(),
            recorded_at: new.recorded_at.clone(),
        };
        self.tables.write().await.metrics.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl NutritionistRepo for InMemoryStore {
    async fn list_active(&self) -> StoreResult<Vec<NutritionistWithUser>> {
        let tables = self.tables.read().await;
        Ok(tables
            .nutritionists
            .iter()
            .filter(|nutritionist| nutritionist.active)
            .map(|nutritionist| NutritionistWithUser {
                nutritionist: nutritionist.clone(),
                user: tables
                    .users
                    .iter()
                    .find(|user| user.id == nutritionist.user_id)
                    .map(|user| UserSummary {
                        id: user.id.clone(),
                        email: user.email.clone(),
                        name: Some(user.name.clone()),
                        phone: user.phone.clone(),
                    }),
            })
            .collect())
    }

    async fn find_by_user_id(&self, user_id: &str) -> StoreResult<Option<Nutritionist>> {
        let tables = self.tables.read().await;
        Ok(tables
            .nutritionists
            .iter()
            .find(|nutritionist| nutritionist.user_id == user_id)
            .cloned())
    }

    async fn create(&self, new: &NewNutritionist) -> StoreResult<Nutritionist> {
        let created = Nutritionist {
            id: self.allocate_id(),
            user_id: new.user_id.clone(),
            name: new.name.clone(),
            crn: Some(new.crn.clone()),
            phone: new.phone.clone(),
            specialty: new.specialty.clone(),
            active: new.active,
        };
        self.tables.write().await.nutritionists.push(created.clone());
        Ok(created)
    }

    async fn update_by_user_id(
        &self,
        user_id: &str,
        update: &NutritionistUpdate,
    ) -> StoreResult<Option<Nutritionist>> {
        let mut tables = self.tables.write().await;
        let Some(nutritionist) = tables
            .nutritionists
            .iter_mut()
            .find(|nutritionist| nutritionist.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            nutritionist.name = name.clone();
        }
        if update.crn.is_some() {
            nutritionist.crn = update.crn.clone();
        }
        if update.phone.is_some() {
            nutritionist.phone = update.phone.clone();
        }
        if update.specialty.is_some() {
            nutritionist.specialty = update.specialty.clone();
        }
        Ok(Some(nutritionist.clone()))
    }

    async fn list_patients(&self, nutritionist_id: &str) -> StoreResult<Vec<PatientLink>> {
        let tables = self.tables.read().await;
        Ok(tables
            .patient_links
            .iter()
            .filter(|(owner, _)| owner == nutritionist_id)
            .map(|(_, link)| link.clone())
            .collect())
    }
}

#[async_trait]
impl MessageRepo for InMemoryStore {
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let tables = self.tables.read().await;
        let mut messages: Vec<ChatMessage> = tables
            .messages
            .iter()
            .filter(|message| message.sender_id == user_id || message.recipient_id == user_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(messages)
    }

    async fn list_between(&self, first: &str, second: &str) -> StoreResult<Vec<ChatMessage>> {
        let tables = self.tables.read().await;
        let mut messages: Vec<ChatMessage> = tables
            .messages
            .iter()
            .filter(|message| {
                (message.sender_id == first && message.recipient_id == second)
                    || (message.sender_id == second && message.recipient_id == first)
            })
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
        Ok(messages)
    }

    async fn create(&self, new: &NewChatMessage) -> StoreResult<ChatMessage> {
        let created = ChatMessage {
            id: self.allocate_id(),
            sender_id: new.sender_id.clone(),
            recipient_id: new.recipient_id.clone(),
            content: new.content.clone(),
            kind: new.kind.clone(),
            read: new.read,
            sent_at: new.sent_at.clone(),
        };
        self.tables.write().await.messages.push(created.clone());
        Ok(created)
    }

    async fn mark_read(&self, ids: &[String], recipient_id: &str) -> StoreResult<()> {
        if self.fail_mark_read.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "store unavailable".to_string(),
            });
        }
        let mut tables = self.tables.write().await;
        tables
            .messages
            .iter_mut()
            .filter(|message| message.recipient_id == recipient_id && ids.contains(&message.id))
            .for_each(|message| message.read = true);
        Ok(())
    }
}

#[async_trait]
impl GoalRepo for InMemoryStore {
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Goal>> {
        let tables = self.tables.read().await;
        let mut goals: Vec<Goal> = tables
            .goals
            .iter()
            .filter(|goal| goal.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Goal>> {
        let tables = self.tables.read().await;
        Ok(tables.goals.iter().find(|goal| goal.id == id).cloned())
    }

    async fn create(&self, new: &NewGoal) -> StoreResult<Goal> {
        let created = Goal {
            id: self.allocate_id(),
            user_id: new.user_id.clone(),
            kind: new.kind.clone(),
            target_value: new.target_value,
            current_value: new.current_value,
            deadline: new.deadline.clone(),
            description: new.description.clone(),
            completed: new.completed,
            created_at: Some(new.created_at.clone()),
            updated_at: None,
        };
        self.tables.write().await.goals.push(created.clone());
        Ok(created)
    }

    async fn update_progress(
        &self,
        id: &str,
        update: &GoalProgressUpdate,
    ) -> StoreResult<Option<Goal>> {
        let mut tables = self.tables.write().await;
        let Some(goal) = tables.goals.iter_mut().find(|goal| goal.id == id) else {
            return Ok(None);
        };
        goal.current_value = update.current_value;
        goal.completed = update.completed;
        goal.updated_at = Some(update.updated_at.clone());
        Ok(Some(goal.clone()))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.tables.write().await.goals.retain(|goal| goal.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, from: &str, to: &str, sent_at: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender_id: from.to_string(),
            recipient_id: to.to_string(),
            content: format!("message {id}"),
            kind: "texto".to_string(),
            read: false,
            sent_at: sent_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_messages_sorted_like_store_queries() {
        let store = InMemoryStore::new();
        store.seed_message(message("1", "a", "b", "2024-01-01T10:00:00Z")).await;
        store.seed_message(message("2", "b", "a", "2024-01-01T11:00:00Z")).await;
        store.seed_message(message("3", "a", "c", "2024-01-01T09:00:00Z")).await;

        let all = MessageRepo::list_for_user(&store, "a").await.unwrap();
        let ids: Vec<&str> = all.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);

        let between = store.list_between("b", "a").await.unwrap();
        let ids: Vec<&str> = between.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_mark_read_only_touches_recipient_rows() {
        let store = InMemoryStore::new();
        store.seed_message(message("1", "a", "b", "2024-01-01T10:00:00Z")).await;
        store.seed_message(message("2", "b", "a", "2024-01-01T11:00:00Z")).await;

        store
            .mark_read(&["1".to_string(), "2".to_string()], "b")
            .await
            .unwrap();

        let messages = store.messages().await;
        assert!(messages.iter().find(|m| m.id == "1").unwrap().read);
        assert!(!messages.iter().find(|m| m.id == "2").unwrap().read);
    }

    #[tokio::test]
    async fn test_metrics_limited_newest_first() {
        let store = InMemoryStore::new();
        for day in 1..=5 {
            store
                .seed_metric(HealthMetric {
                    id: day.to_string(),
                    user_id: "u".to_string(),
                    values: Default::default(),
                    recorded_at: format!("2024-01-0{day}T00:00:00Z"),
                })
                .await;
        }

        let metrics = store.list_recent("u", 3).await.unwrap();
        let ids: Vec<&str> = metrics.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "4", "3"]);
    }
}

//! In-memory repositories for HTTP and accrual integration tests.
//!
//! One [`InMemoryStore`] implements both persistence ports over shared state,
//! so task listings can join owner names the way the Diesel adapter does.
//! Foreign keys behave like the `tasks.user_id` constraint: tasks need an
//! existing owner and owners with tasks cannot be deleted.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use taskapi::domain::ports::{
    TaskPersistenceError, TaskRepository, UserPersistenceError, UserRepository,
};
use taskapi::domain::{
    ActiveTask, NewTask, Pagination, Task, TaskFilter, TaskId, TaskSort, TaskStatus, User,
    UserDraft, UserId,
};

#[derive(Debug, Clone)]
struct StoredTask {
    id: TaskId,
    user_id: UserId,
    description: String,
    status: TaskStatus,
    rate: i32,
    deadline: i32,
    earned: f64,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tasks: Vec<StoredTask>,
    next_user_id: i32,
    next_task_id: i32,
}

/// Shared in-memory tables; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Current `(earned, deadline, status)` of a stored task.
    pub fn task_state(&self, id: TaskId) -> Option<(f64, i32, TaskStatus)> {
        self.lock()
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| (task.earned, task.deadline, task.status))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock();
        tables.next_user_id += 1;
        let user = User::from_draft(UserId::new(tables.next_user_id), draft.clone());
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError> {
        self.lock()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(id.get()))
    }

    async fn list(&self, page: Pagination) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.lock();
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = page
            .limit()
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(tables.users.iter().skip(skip).take(take).cloned().collect())
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock();
        if let Some(user) = tables.users.iter_mut().find(|user| user.id == id) {
            *user = User::from_draft(id, draft.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock();
        if tables.tasks.iter().any(|task| task.user_id == id) {
            return Err(UserPersistenceError::query(
                "update or delete on table \"users\" violates foreign key constraint",
            ));
        }
        tables.users.retain(|user| user.id != id);
        Ok(())
    }
}

fn listing(tables: &Tables, task: &StoredTask) -> Task {
    let owner_name = tables
        .users
        .iter()
        .find(|user| user.id == task.user_id)
        .map(|user| user.name.clone())
        .unwrap_or_default();
    Task {
        id: task.id,
        user_id: task.user_id,
        owner_name,
        description: task.description.clone(),
        status: task.status,
        rate: task.rate,
        deadline: task.deadline,
        earned: task.earned,
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create(&self, task: &NewTask) -> Result<TaskId, TaskPersistenceError> {
        let mut tables = self.lock();
        if !tables.users.iter().any(|user| user.id == task.user_id) {
            return Err(TaskPersistenceError::user_not_found());
        }
        tables.next_task_id += 1;
        let id = TaskId::new(tables.next_task_id);
        tables.tasks.push(StoredTask {
            id,
            user_id: task.user_id,
            description: task.description.clone(),
            status: TaskStatus::Pending,
            rate: task.rate,
            deadline: task.deadline,
            earned: 0.0,
        });
        Ok(id)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        self.list_filtered(TaskFilter {
            user_id: Some(user_id),
            sort: TaskSort::Natural,
        })
        .await
    }

    async fn list_filtered(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskPersistenceError> {
        let tables = self.lock();
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|task| filter.user_id.is_none_or(|id| task.user_id == id))
            .filter(|task| tables.users.iter().any(|user| user.id == task.user_id))
            .map(|task| listing(&tables, task))
            .collect();
        if filter.sort == TaskSort::EarnedDesc {
            tasks.sort_by(|a, b| b.earned.total_cmp(&a.earned));
        }
        Ok(tasks)
    }

    async fn list_active(&self) -> Result<Vec<ActiveTask>, TaskPersistenceError> {
        Ok(self
            .lock()
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Running)
            .map(|task| ActiveTask {
                id: task.id,
                rate: task.rate,
                earned: task.earned,
                deadline: task.deadline,
            })
            .collect())
    }

    async fn update_earned(
        &self,
        id: TaskId,
        earned: f64,
        deadline: i32,
    ) -> Result<(), TaskPersistenceError> {
        if let Some(task) = self.lock().tasks.iter_mut().find(|task| task.id == id) {
            task.earned = earned;
            task.deadline = deadline;
        }
        Ok(())
    }

    async fn update_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<(), TaskPersistenceError> {
        if let Some(task) = self.lock().tasks.iter_mut().find(|task| task.id == id) {
            task.status = status;
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskPersistenceError> {
        self.lock().tasks.retain(|task| task.id != id);
        Ok(())
    }
}

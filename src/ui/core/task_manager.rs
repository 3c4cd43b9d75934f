use super::actions::{Action, DataKind, MutationRequest};
use crate::auth::AuthClient;
use crate::hooks::{AccountInfoLoader, Loader, Query};
use crate::lifecycle::{FeedbackEvent, FeedbackSink, MutationResponse, RunContext, RunOutcome};
use crate::localization::ErrorLocalizer;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<TaskResult>,
    pub description: String,
    pub started_at: std::time::Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    Loaded,
    LoadFailed(String),
    MutationSucceeded,
    MutationFailed,
    MutationSkipped,
}

/// Feedback sink that turns events into toast actions on the UI channel.
#[derive(Debug, Clone)]
pub struct ChannelFeedback {
    sender: mpsc::UnboundedSender<Action>,
}

impl ChannelFeedback {
    pub fn new(sender: mpsc::UnboundedSender<Action>) -> Self {
        Self { sender }
    }
}

impl FeedbackSink for ChannelFeedback {
    fn notify(&self, event: FeedbackEvent) {
        let _ = self.sender.send(Action::Toast(event));
    }
}

pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
    client: Arc<dyn AuthClient>,
    errors: Arc<ErrorLocalizer>,
}

impl TaskManager {
    pub fn new(client: Arc<dyn AuthClient>, errors: Arc<ErrorLocalizer>) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
                client,
                errors,
            },
            rx,
        )
    }

    /// Sender for actions produced outside the task manager
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_sender.clone()
    }

    /// Spawn a background refetch of `query`
    pub fn spawn_query<T>(&mut self, query: Query<T>, data: DataKind) -> TaskId
    where
        T: Clone + Send + 'static,
    {
        let action_sender = self.action_sender.clone();
        let description = format!("Load {:?}", data);

        let handle = tokio::spawn(async move {
            let result = match query.refetch().await {
                Ok(()) => TaskResult::Loaded,
                Err(e) => TaskResult::LoadFailed(e.to_string()),
            };
            // Views re-read the query either way; errors are rendered in place
            let _ = action_sender.send(Action::DataRefreshed(data));
            result
        });

        self.track(handle, description)
    }

    /// Spawn a lookup of the provider email behind a linked account
    pub fn spawn_account_info(&mut self, account_id: String) -> TaskId {
        let action_sender = self.action_sender.clone();
        let client = Arc::clone(&self.client);
        let description = format!("Load account info {}", account_id);

        let handle = tokio::spawn(async move {
            let loader = AccountInfoLoader {
                account_id: account_id.clone(),
            };
            match loader.load(client.as_ref()).await {
                Ok(info) => {
                    let _ = action_sender.send(Action::AccountInfoLoaded {
                        account_id,
                        email: info.user.email,
                    });
                    TaskResult::Loaded
                }
                Err(e) => {
                    log::warn!("Failed to load account info for {}: {}", account_id, e);
                    TaskResult::LoadFailed(e.to_string())
                }
            }
        });

        self.track(handle, description)
    }

    /// Spawn a mutation through its control's lifecycle controller
    pub fn spawn_mutation(&mut self, request: MutationRequest) -> TaskId {
        let action_sender = self.action_sender.clone();
        let client = Arc::clone(&self.client);
        let errors = Arc::clone(&self.errors);
        let description = request.mutation.to_string();
        log::info!("Mutation: {}", description);

        let handle = tokio::spawn(async move {
            let MutationRequest {
                mutation,
                controller,
                success_message,
                refresh,
                completes_dialog,
            } = request;

            let feedback = ChannelFeedback::new(action_sender.clone());
            let mut ctx = RunContext::new(&feedback, errors.as_ref());
            if let Some(refresh) = &refresh {
                ctx = ctx.with_refresh(refresh.source.as_ref());
            }

            let outcome = controller
                .run(ctx, success_message, mutation.execute(client.as_ref()))
                .await;

            match outcome {
                RunOutcome::Succeeded(response) => {
                    log::info!("Mutation {} succeeded", mutation.name());
                    if let Some(refresh) = refresh {
                        let _ = action_sender.send(Action::DataRefreshed(refresh.data));
                    }
                    if let MutationResponse::Redirect(url) = response {
                        let _ = action_sender.send(Action::Navigate(url));
                    }
                    if completes_dialog {
                        let _ = action_sender.send(Action::DialogCompleted);
                    }
                    TaskResult::MutationSucceeded
                }
                RunOutcome::Failed => TaskResult::MutationFailed,
                RunOutcome::Suppressed | RunOutcome::Rejected => TaskResult::MutationSkipped,
            }
        });

        self.track(handle, description)
    }

    fn track(&mut self, handle: JoinHandle<TaskResult>, description: String) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Drop finished tasks and return their descriptions
    pub fn cleanup_finished_tasks(&mut self) -> Vec<(TaskId, String)> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(task_id, _)| *task_id)
            .collect();

        finished
            .into_iter()
            .filter_map(|task_id| self.tasks.remove(&task_id).map(|task| (task_id, task.description)))
            .collect()
    }

    /// Abort every running task
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Tasks that have been running for more than `threshold`
    pub fn long_running(&self, threshold: std::time::Duration) -> Vec<&BackgroundTask> {
        self.tasks
            .values()
            .filter(|task| task.started_at.elapsed() > threshold)
            .collect()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}

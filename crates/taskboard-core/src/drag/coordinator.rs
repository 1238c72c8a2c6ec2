//! Drag session tracking and drop persistence.

use super::DragTarget;
use super::reorder::{insertion_point, is_in_place};
use crate::api::{ApiError, BoardClient, Transport};
use crate::config::BoardConfig;
use crate::ids::{ListId, TaskId};
use crate::layout::{Layout, Placement};
use crate::shell::Shell;

/// Message shown when a card move never reached the server.
pub const MOVE_FAILED_MESSAGE: &str = "Could not move the task. The board will reload.";

/// What a drag-over event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOverEffect {
    /// No drag in progress; leave the event alone.
    Ignored,
    /// A drag is in progress but nothing moved.
    Accepted,
    /// The dragged card moved to a new place.
    Moved(Placement),
}

impl DragOverEffect {
    /// Whether the caller must suppress default handling so a drop is
    /// allowed.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Network half of a drop, detached from the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropRequest {
    /// Persist a card move and the target column's order.
    MoveTask {
        url: String,
        task: TaskId,
        list: ListId,
        order: Vec<TaskId>,
    },
    /// Move a column before another.
    MoveList {
        url: String,
        list: ListId,
        target: ListId,
    },
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Nothing was being dragged, or the matching endpoint is unset.
    Ignored,
    TaskMoved {
        task: TaskId,
        list: ListId,
        order: Vec<TaskId>,
    },
    TaskMoveFailed {
        task: TaskId,
        error: ApiError,
    },
    ListMoved {
        list: ListId,
        target: ListId,
    },
    ListMoveFailed {
        list: ListId,
        error: ApiError,
    },
}

impl DropRequest {
    /// Send the request, then reload the page.
    ///
    /// The page reloads whatever the result, so the server's order always
    /// wins over the optimistic one.
    pub async fn submit<T: Transport>(self, client: &BoardClient<T>, shell: &dyn Shell) -> DropOutcome {
        let outcome = match self {
            Self::MoveTask {
                url,
                task,
                list,
                order,
            } => match client.move_task(&url, &task, &list, &order).await {
                Ok(()) => {
                    log::info!("Moved task {} to list {}", task, list);
                    DropOutcome::TaskMoved { task, list, order }
                }
                Err(error) => {
                    log::error!("Task move failed: {}", error);
                    if !error.is_rejection() {
                        shell.alert(MOVE_FAILED_MESSAGE);
                    }
                    DropOutcome::TaskMoveFailed { task, error }
                }
            },
            Self::MoveList { url, list, target } => {
                match client.move_list(&url, &list, &target).await {
                    Ok(()) => {
                        log::info!("Moved list {} before {}", list, target);
                        DropOutcome::ListMoved { list, target }
                    }
                    Err(error) => {
                        log::error!("List move failed: {}", error);
                        DropOutcome::ListMoveFailed { list, error }
                    }
                }
            }
        };
        shell.reload();
        outcome
    }
}

/// Tracks the active drag and keeps the rendered order in step with the
/// pointer.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    session: Option<DragTarget>,
    move_url: Option<String>,
    list_move_url: Option<String>,
}

impl DragCoordinator {
    /// Create a coordinator posting card moves to `move_url` and column moves
    /// to `list_move_url`. Either may be unset, which disables that drop.
    pub fn new(move_url: Option<String>, list_move_url: Option<String>) -> Self {
        Self {
            session: None,
            move_url,
            list_move_url,
        }
    }

    /// Create a coordinator from the page configuration.
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(
            config.move_url().map(str::to_string),
            config.list_move_url().map(str::to_string),
        )
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragTarget> {
        self.session.as_ref()
    }

    /// The card being dragged, if any.
    pub fn dragging_task(&self) -> Option<&TaskId> {
        match &self.session {
            Some(DragTarget::Task(id)) => Some(id),
            _ => None,
        }
    }

    /// The column being dragged, if any.
    pub fn dragging_list(&self) -> Option<&ListId> {
        match &self.session {
            Some(DragTarget::List(id)) => Some(id),
            _ => None,
        }
    }

    /// Start dragging a card. Replaces any active drag.
    pub fn begin_item_drag(&mut self, item: TaskId, layout: &mut impl Layout) {
        self.begin(DragTarget::Task(item), layout);
    }

    /// Start dragging a column. Replaces any active drag.
    pub fn begin_container_drag(&mut self, list: ListId, layout: &mut impl Layout) {
        self.begin(DragTarget::List(list), layout);
    }

    fn begin(&mut self, target: DragTarget, layout: &mut impl Layout) {
        self.clear(layout);
        log::debug!("Drag started: {:?}", target);
        layout.set_dragging(&target, true);
        self.session = Some(target);
    }

    /// The card drag gesture ended, dropped or not.
    ///
    /// `item` is the card the drag-end event names. Its marker is removed even
    /// when a drop already ended the session.
    pub fn end_item_drag(&mut self, item: Option<&TaskId>, layout: &mut impl Layout) {
        if self.dragging_task().is_some() {
            self.clear(layout);
        }
        if let Some(item) = item {
            layout.set_dragging(&DragTarget::Task(item.clone()), false);
        }
    }

    /// The column drag gesture ended, dropped or not. Mirrors
    /// [`end_item_drag`](Self::end_item_drag).
    pub fn end_container_drag(&mut self, list: Option<&ListId>, layout: &mut impl Layout) {
        if self.dragging_list().is_some() {
            self.clear(layout);
        }
        if let Some(list) = list {
            layout.set_dragging(&DragTarget::List(list.clone()), false);
        }
    }

    fn clear(&mut self, layout: &mut impl Layout) {
        if let Some(previous) = self.session.take() {
            layout.set_dragging(&previous, false);
        }
    }

    /// The pointer moved over `list` at `pointer_y`.
    ///
    /// While a card is dragged, moves it before the nearest card whose
    /// midpoint is below the pointer, or to the end of the column. A column
    /// that is not rendered accepts the event without moving anything. Column
    /// drags only accept the event; their position is settled on drop.
    pub fn drag_over(&mut self, pointer_y: f64, list: &ListId, layout: &mut impl Layout) -> DragOverEffect {
        let item = match &self.session {
            None => return DragOverEffect::Ignored,
            Some(DragTarget::List(_)) => return DragOverEffect::Accepted,
            Some(DragTarget::Task(item)) => item,
        };
        if !layout.contains(item) {
            return DragOverEffect::Accepted;
        }

        let order = layout.items(list);
        let candidates = order
            .iter()
            .filter(|id| *id != item)
            .filter_map(|id| layout.bounds(id).map(|rect| (id.clone(), rect)));
        let placement = insertion_point(pointer_y, candidates);

        if is_in_place(&order, item, &placement) {
            return DragOverEffect::Accepted;
        }
        if !layout.place(item, list, &placement) {
            return DragOverEffect::Accepted;
        }
        DragOverEffect::Moved(placement)
    }

    /// Synchronous half of a drop on `target`.
    ///
    /// Ends the session and returns the request to send, or `None` (leaving
    /// the session untouched) when nothing droppable is in progress.
    pub fn prepare_drop(&mut self, target: &ListId, layout: &mut impl Layout) -> Option<DropRequest> {
        let request = match &self.session {
            Some(DragTarget::Task(task)) => {
                let url = self.move_url.clone()?;
                DropRequest::MoveTask {
                    url,
                    task: task.clone(),
                    list: target.clone(),
                    order: layout.items(target),
                }
            }
            Some(DragTarget::List(list)) => {
                let url = self.list_move_url.clone()?;
                DropRequest::MoveList {
                    url,
                    list: list.clone(),
                    target: target.clone(),
                }
            }
            None => return None,
        };
        self.clear(layout);
        Some(request)
    }

    /// Drop on `target`: persist the new order and reload.
    pub async fn drop<T: Transport>(
        &mut self,
        target: &ListId,
        layout: &mut impl Layout,
        client: &BoardClient<T>,
        shell: &dyn Shell,
    ) -> DropOutcome {
        match self.prepare_drop(target, layout) {
            Some(request) => request.submit(client, shell).await,
            None => DropOutcome::Ignored,
        }
    }
}

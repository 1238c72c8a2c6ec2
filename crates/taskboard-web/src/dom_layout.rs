//! [`Layout`] over the live DOM.

use kurbo::Rect;
use taskboard_core::{DragTarget, Layout, ListId, Placement, TaskId};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::selector::{self, CARD_SELECTOR, DRAGGING_CLASSES};

/// Reads and rearranges the server-rendered board.
///
/// Bounds come from `getBoundingClientRect`, so they share the viewport
/// coordinate space of `DragEvent.clientY`.
pub struct DomLayout {
    document: Document,
}

impl DomLayout {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Layout of the current page, if running in a window.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    fn find(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(element) => element,
            Err(e) => {
                log::warn!("Invalid selector {}: {:?}", selector, e);
                None
            }
        }
    }

    fn marked_element(&self, target: &DragTarget) -> Option<Element> {
        match target {
            DragTarget::Task(id) => self.find(&selector::card(id)),
            DragTarget::List(id) => self.find(&selector::column(id)),
        }
    }
}

impl Layout for DomLayout {
    fn items(&self, list: &ListId) -> Vec<TaskId> {
        let Some(container) = self.find(&selector::container(list)) else {
            return Vec::new();
        };
        let Ok(nodes) = container.query_selector_all(CARD_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|element| element.get_attribute("data-task-id"))
            .map(TaskId::new)
            .collect()
    }

    fn bounds(&self, item: &TaskId) -> Option<Rect> {
        let rect = self.find(&selector::card(item))?.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom()))
    }

    fn contains(&self, item: &TaskId) -> bool {
        self.find(&selector::card(item)).is_some()
    }

    fn place(&mut self, item: &TaskId, list: &ListId, placement: &Placement) -> bool {
        let (Some(container), Some(card)) = (
            self.find(&selector::container(list)),
            self.find(&selector::card(item)),
        ) else {
            log::debug!("place: task {} or list {} not rendered", item, list);
            return false;
        };
        let before = match placement {
            Placement::Before(id) => container
                .query_selector(&selector::card(id))
                .ok()
                .flatten(),
            Placement::End => None,
        };
        let result = match before {
            Some(before) => container.insert_before(&card, Some(&before)),
            None => container.append_child(&card),
        };
        match result {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to move task {}: {:?}", item, e);
                false
            }
        }
    }

    fn set_dragging(&mut self, target: &DragTarget, dragging: bool) {
        let Some(element) = self.marked_element(target) else {
            return;
        };
        let classes = element.class_list();
        for class in DRAGGING_CLASSES {
            let result = if dragging {
                classes.add_1(class)
            } else {
                classes.remove_1(class)
            };
            if let Err(e) = result {
                log::warn!("Failed to update class {}: {:?}", class, e);
            }
        }
    }
}

use crate::viewport::{DrawHandlerId, LineBatch, ViewportHost};

/// Host double that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    next_id: u64,
    pub(crate) handlers: Vec<DrawHandlerId>,
    pub(crate) redraws: usize,
    pub(crate) batches: Vec<LineBatch>,
    pub(crate) errors: Vec<String>,
}

impl ViewportHost for RecordingHost {
    fn add_draw_handler(&mut self) -> DrawHandlerId {
        self.next_id += 1;
        let id = DrawHandlerId(self.next_id);
        self.handlers.push(id);
        id
    }

    fn remove_draw_handler(&mut self, id: DrawHandlerId) {
        self.handlers.retain(|&h| h != id);
    }

    fn tag_redraw_all(&mut self) {
        self.redraws += 1;
    }

    fn draw_lines(&mut self, batch: &LineBatch) {
        self.batches.push(batch.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }
}

//! Tokio driver for a single reveal.
//!
//! Owns a [`RevealController`], runs the side loads it requests on the tokio
//! runtime and routes their completions back through an unbounded channel.
//! Host events (attach, visibility, content loads) go in through
//! [`RevealDriver::dispatch`] or a [`RevealDriver::sender`] clone.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::content::ContentNode;
use crate::reveal::{MountTicket, RevealController, RevealEffect, RevealMessage};

use super::loader::PlaceholderLoader;

pub struct RevealDriver<C: ContentNode, L: PlaceholderLoader> {
    controller: RevealController<C>,
    loader: Arc<L>,
    sender: mpsc::UnboundedSender<RevealMessage>,
    receiver: mpsc::UnboundedReceiver<RevealMessage>,
    in_flight: HashMap<MountTicket, JoinHandle<()>>,
}

impl<C: ContentNode, L: PlaceholderLoader> RevealDriver<C, L> {
    pub fn new(controller: RevealController<C>, loader: L) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            controller,
            loader: Arc::new(loader),
            sender,
            receiver,
            in_flight: HashMap::new(),
        }
    }

    pub fn controller(&self) -> &RevealController<C> {
        &self.controller
    }

    /// Handle for posting messages from platform callbacks.
    pub fn sender(&self) -> mpsc::UnboundedSender<RevealMessage> {
        self.sender.clone()
    }

    /// Number of side loads still running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Mount the controller. Must be called within a tokio runtime.
    pub fn mount(&mut self) {
        let effects = self.controller.mount();
        self.execute(effects);
    }

    /// Feed one message to the controller right away.
    pub fn dispatch(&mut self, message: RevealMessage) {
        match &message {
            RevealMessage::PlaceholderSideLoaded(ticket)
            | RevealMessage::PlaceholderSideLoadFailed { ticket, .. } => {
                self.in_flight.remove(ticket);
            }
            _ => {}
        }
        let effects = self.controller.update(message);
        self.execute(effects);
    }

    pub fn unmount(&mut self) {
        let effects = self.controller.unmount();
        self.execute(effects);
        for (ticket, handle) in self.in_flight.drain() {
            log::debug!("aborting side load for {ticket}");
            handle.abort();
        }
    }

    /// Wait for the next queued message and dispatch it.
    ///
    /// Returns the message that was handled.
    pub async fn next_message(&mut self) -> Option<RevealMessage> {
        let message = self.receiver.recv().await?;
        self.dispatch(message.clone());
        Some(message)
    }

    /// Dispatch queued messages until no side load is running and the
    /// queue is empty.
    pub async fn run_until_idle(&mut self) {
        loop {
            self.drain_queue();
            self.in_flight.retain(|_, handle| !handle.is_finished());
            if self.in_flight.is_empty() {
                // A task that finished after the first drain has already
                // queued its completion.
                self.drain_queue();
                if self.in_flight.is_empty() {
                    return;
                }
            }
            if self.next_message().await.is_none() {
                return;
            }
        }
    }

    fn drain_queue(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.dispatch(message);
        }
    }

    fn execute(&mut self, effects: Vec<RevealEffect>) {
        for effect in effects {
            match effect {
                RevealEffect::SideLoadPlaceholder { ticket, source } => {
                    let loader = Arc::clone(&self.loader);
                    let sender = self.sender.clone();
                    let handle = tokio::spawn(async move {
                        let message = match loader.load(&source).await {
                            Ok(()) => {
                                RevealMessage::PlaceholderSideLoaded(ticket)
                            }
                            Err(err) => {
                                RevealMessage::PlaceholderSideLoadFailed {
                                    ticket,
                                    reason: err.to_string(),
                                }
                            }
                        };
                        // The driver may already be gone.
                        let _ = sender.send(message);
                    });
                    self.in_flight.insert(ticket, handle);
                }
                RevealEffect::CancelSideLoad(ticket) => {
                    if let Some(handle) = self.in_flight.remove(&ticket) {
                        log::debug!("cancelling side load for {ticket}");
                        handle.abort();
                    }
                }
            }
        }
    }
}

impl<C: ContentNode, L: PlaceholderLoader> Drop for RevealDriver<C, L> {
    fn drop(&mut self) {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
    }
}

impl<C: ContentNode, L: PlaceholderLoader> std::fmt::Debug for RevealDriver<C, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealDriver")
            .field("controller", &self.controller)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

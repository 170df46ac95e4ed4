//! Keyboard thread and the single-slot mailbox it posts commands into.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use log::{debug, warn};

use crate::error::{GameError, Result};
use crate::player::Command;

/// How often the reader looks at the mailbox while no key arrives.
const POLL: Duration = Duration::from_millis(50);

#[derive(Default)]
struct Slot {
    pending: Option<Command>,
    closed: bool,
}

/// Holds at most one command. A newer post replaces an unread one.
#[derive(Default)]
pub struct Mailbox {
    slot: Mutex<Slot>,
}

impl Mailbox {
    pub fn new() -> Arc<Self> {
        Arc::new(Mailbox::default())
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns false once the mailbox is closed.
    pub fn post(&self, command: Command) -> bool {
        let mut slot = self.lock();
        if slot.closed {
            return false;
        }
        if let Some(dropped) = slot.pending.replace(command) {
            debug!("{dropped:?} overwritten by {command:?}");
        }
        true
    }

    pub fn take(&self) -> Option<Command> {
        self.lock().pending.take()
    }

    pub fn close(&self) {
        let mut slot = self.lock();
        slot.closed = true;
        slot.pending = None;
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

// ── Reader thread ───────────────────────────────────────────────────────────

/// Feeds keys from `next_key` into `mailbox` until it is closed. `next_key`
/// returns `None` when nothing arrived within its poll window.
fn pump<F>(mailbox: &Mailbox, mut next_key: F) -> io::Result<()>
where
    F: FnMut() -> io::Result<Option<KeyEvent>>,
{
    while !mailbox.is_closed() {
        let Some(key) = next_key()? else { continue };
        if let Some(command) = Command::from_key(key) {
            if !mailbox.post(command) {
                break;
            }
        }
    }
    Ok(())
}

fn terminal_key() -> io::Result<Option<KeyEvent>> {
    if !event::poll(POLL)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

pub struct InputReader {
    mailbox: Arc<Mailbox>,
    handle: Option<JoinHandle<io::Result<()>>>,
}

impl InputReader {
    pub fn spawn(mailbox: Arc<Mailbox>) -> Result<Self> {
        Self::spawn_with(mailbox, terminal_key)
    }

    fn spawn_with<F>(mailbox: Arc<Mailbox>, next_key: F) -> Result<Self>
    where
        F: FnMut() -> io::Result<Option<KeyEvent>> + Send + 'static,
    {
        let inbox = mailbox.clone();
        let handle = thread::Builder::new()
            .name("input".into())
            .spawn(move || {
                let res = pump(&inbox, next_key);
                // Tell the game loop nobody is listening to the keyboard anymore.
                inbox.close();
                res
            })?;
        Ok(InputReader {
            mailbox,
            handle: Some(handle),
        })
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Closes the mailbox and waits for the thread, which notices within one
    /// poll window.
    pub fn stop(mut self) -> Result<()> {
        self.mailbox.close();
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(res)) => res.map_err(GameError::from),
            Some(Err(_)) => Err(GameError::InputLost),
            None => Ok(()),
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.mailbox.close();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("input thread panicked");
            }
        }
    }
}

//! One resolve → edge → dispatch → apply cycle per tick.
//!
//! [`Session`] owns every piece of process-lifetime state: the matrix
//! source (and through it caps lock), the previous-poll tracker, the combo
//! edge context and the edit buffer. It is single-threaded and every tick
//! is synchronous and bounded.
//!
//! Typing is edge-triggered: actions are produced only on polls whose
//! active set changed and has at least one key down, and only newly
//! pressed keys type text. Holding a key does not repeat it.

use std::fmt;

use crate::dispatch::{Action, Dispatch, dispatch};
use crate::error::Result;
use crate::event::{LogLevel, NOTICE_EVENT, emit_event, emit_log};
use crate::input::{
    EdgeContext, PollSummary, PollTracker, SemanticState, detect_combo_edge, resolve,
    resolve_new_presses,
};
use crate::matrix::MatrixSource;
use crate::options::Options;
use crate::text::{EditBuffer, Notice};

/// Callback that persists the buffer text.
pub type SaveHandler = Box<dyn FnMut(&str) -> Result<()>>;

/// What happened during one tick.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    /// Level state of every active key.
    pub state: SemanticState,
    /// Change detection for this poll.
    pub summary: PollSummary,
    /// The dispatch that was applied, if the poll produced one.
    pub dispatch: Option<Dispatch>,
    /// The caps-lock combo fired this tick.
    pub combo_fired: bool,
    /// Notices raised by this tick, in order.
    pub notices: Vec<Notice>,
    /// Function keys (1-10) pressed this tick, for the application.
    pub function_keys: Vec<u8>,
    /// Events the matrix queue dropped since the previous tick.
    pub dropped_events: u64,
}

impl TickReport {
    /// Actions applied this tick.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        self.dispatch.as_ref().map_or(&[][..], |d| d.actions.as_slice())
    }
}

/// Keyboard-to-editor driver.
pub struct Session<S> {
    source: S,
    tracker: PollTracker,
    edge: EdgeContext,
    buffer: EditBuffer,
    save_handler: Option<SaveHandler>,
    dropped_seen: u64,
}

impl<S: fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("source", &self.source)
            .field("edge", &self.edge)
            .field("buffer", &self.buffer)
            .field("save_handler", &self.save_handler.is_some())
            .field("dropped_seen", &self.dropped_seen)
            .finish_non_exhaustive()
    }
}

impl<S: MatrixSource> Session<S> {
    /// Create a session with default options.
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracker: PollTracker::new(),
            edge: EdgeContext::new(),
            buffer: EditBuffer::new(),
            save_handler: None,
            dropped_seen: 0,
        }
    }

    /// Create a session with validated options.
    pub fn with_options(source: S, options: &Options) -> Result<Self> {
        let buffer = EditBuffer::with_options(options)?;
        Ok(Self {
            buffer,
            ..Self::new(source)
        })
    }

    /// Register the handler invoked by Ctrl+S.
    pub fn set_save_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str) -> Result<()> + 'static,
    {
        self.save_handler = Some(Box::new(handler));
    }

    #[must_use]
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[must_use]
    pub fn edge_context(&self) -> EdgeContext {
        self.edge
    }

    /// Run one poll cycle.
    pub fn tick(&mut self) -> TickReport {
        let active = self.source.poll();
        let dropped_events = self.take_dropped();

        let summary = self.tracker.observe(&active);
        let caps_locked = self.source.caps_locked();
        let state = resolve(&active, caps_locked);

        let mut notices = Vec::new();
        let (combo_fired, edge) = detect_combo_edge(&state, self.edge);
        self.edge = edge;
        if combo_fired {
            let locked = !caps_locked;
            self.source.set_caps_locked(locked);
            emit_log(
                LogLevel::Info,
                &format!("caps lock {}", if locked { "on" } else { "off" }),
            );
            notices.push(if locked {
                Notice::CapsLockOn
            } else {
                Notice::CapsLockOff
            });
        }

        let mut function_keys = Vec::new();
        let applied = if summary.changed && summary.is_pressed() {
            let typed = resolve_new_presses(&active, &summary.pressed, caps_locked);
            let result = dispatch(&typed);
            for &action in &result.actions {
                if let Action::FunctionKey(n) = action {
                    function_keys.push(n);
                }
                notices.extend(self.apply(action));
            }
            Some(result)
        } else {
            None
        };

        for notice in &notices {
            emit_event(NOTICE_EVENT, &notice.to_string());
        }

        TickReport {
            state,
            summary,
            dispatch: applied,
            combo_fired,
            notices,
            function_keys,
            dropped_events,
        }
    }

    /// Apply one action to the edit buffer.
    pub fn apply(&mut self, action: Action) -> Option<Notice> {
        match action {
            Action::InsertChar(c) => self.buffer.insert_char(c),
            Action::InsertTab => self.buffer.insert_tab(),
            Action::Backspace => self.buffer.backspace(),
            Action::ForwardDelete => self.buffer.forward_delete(),
            Action::Enter => self.buffer.enter(),
            Action::MoveCursor(direction) => {
                self.buffer.move_cursor(direction);
                None
            }
            Action::SelectAll => self.buffer.select_all(),
            Action::ClearSelection => self.buffer.clear_selection(),
            Action::Undo => self.buffer.undo(),
            Action::ToggleLineNumbers => self.buffer.toggle_line_numbers(),
            Action::Save => Some(self.save()),
            Action::FunctionKey(_) => None,
        }
    }

    fn save(&mut self) -> Notice {
        let Some(handler) = self.save_handler.as_mut() else {
            return Notice::SaveUnavailable;
        };
        match handler(&self.buffer.text()) {
            Ok(()) => Notice::Saved,
            Err(e) => {
                emit_log(LogLevel::Error, &format!("save failed: {e}"));
                Notice::SaveFailed(e.to_string())
            }
        }
    }

    fn take_dropped(&mut self) -> u64 {
        let total = self.source.dropped_events();
        let fresh = total.saturating_sub(self.dropped_seen);
        if fresh > 0 {
            emit_log(
                LogLevel::Warn,
                &format!("matrix queue overflow: {fresh} key events dropped ({total} total)"),
            );
            self.dropped_seen = total;
        }
        fresh
    }
}

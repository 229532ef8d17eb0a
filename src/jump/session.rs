// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The jump session state machine.
//!
//! A [`JumpController`] owns the single live [`SessionState`] of a viewport. Hosts call
//! [`JumpController::start`] to enter jump mode and [`JumpController::handle_key`] once per
//! keystroke, strictly in arrival order; each call runs the whole transition before returning.
//! Every exit from an active session goes through one teardown routine that releases the current
//! overlay, clears the typed prefix, and resets the host mode flag.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::labels::{assign, LabelAlphabet, LabelSet};
use super::narrow::{narrow, replay};
use super::scan::JumpTarget;
use crate::host::{HostError, OverlayFrame, OverlayId, PresentationPort, TextSource};
use crate::model::{Label, MatchRange, TextPosition, VisibleText};

pub type TypedChars = SmallVec<[char; 8]>;

/// One keystroke as seen by the jump engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKey {
    Char(char),
    Accept,
    Cancel,
    Backspace,
}

impl JumpKey {
    pub fn from_char(ch: char) -> Self {
        match ch {
            '\n' | '\r' => Self::Accept,
            '\u{1b}' => Self::Cancel,
            '\u{8}' | '\u{7f}' => Self::Backspace,
            other => Self::Char(other),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Jumped(TextPosition),
    Exhausted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingFirstChar,
    Narrowing { typed: TypedChars, targets: Vec<JumpTarget>, labels: LabelSet },
    Terminated(Termination),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A session is already live; nothing was touched.
    AlreadyActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No session is live; the key was not consumed.
    Inactive,
    /// Consumed without changing the session (e.g. Accept with several candidates).
    Unchanged,
    /// Backspace removed the last typed char; waiting for a first char again.
    AwaitingFirstChar,
    Narrowed { matches: usize, labeled: usize },
    Finished(Termination),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpError {
    /// A collaborator failed; the session was aborted and the controller is back to `Idle`.
    Host(HostError),
}

impl fmt::Display for JumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(err) => write!(f, "jump session aborted: {err}"),
        }
    }
}

impl std::error::Error for JumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(err) => Some(err),
        }
    }
}

impl From<HostError> for JumpError {
    fn from(value: HostError) -> Self {
        Self::Host(value)
    }
}

#[derive(Debug, Clone)]
pub struct JumpController {
    alphabet: LabelAlphabet,
    auto_jump: bool,
    backspace: bool,
    state: SessionState,
    text: VisibleText,
    overlay: Option<OverlayId>,
}

impl Default for JumpController {
    fn default() -> Self {
        Self::new(LabelAlphabet::default())
    }
}

impl JumpController {
    pub fn new(alphabet: LabelAlphabet) -> Self {
        Self {
            alphabet,
            auto_jump: false,
            backspace: true,
            state: SessionState::Idle,
            text: VisibleText::default(),
            overlay: None,
        }
    }

    /// Jump as soon as a narrowing step leaves a single target.
    pub fn with_auto_jump(mut self, auto_jump: bool) -> Self {
        self.auto_jump = auto_jump;
        self
    }

    /// Whether Backspace replays the shortened prefix (otherwise it is ignored).
    pub fn with_backspace(mut self, backspace: bool) -> Self {
        self.backspace = backspace;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::AwaitingFirstChar | SessionState::Narrowing { .. })
    }

    pub fn typed(&self) -> &[char] {
        match &self.state {
            SessionState::Narrowing { typed, .. } => typed,
            _ => &[],
        }
    }

    pub fn targets(&self) -> &[JumpTarget] {
        match &self.state {
            SessionState::Narrowing { targets, .. } => targets,
            _ => &[],
        }
    }

    pub fn ranges(&self) -> Vec<MatchRange> {
        self.targets().iter().map(JumpTarget::range).collect()
    }

    pub fn labels(&self) -> Option<&LabelSet> {
        match &self.state {
            SessionState::Narrowing { labels, .. } => Some(labels),
            _ => None,
        }
    }

    /// Enters jump mode. Starting while a session is live is a no-op.
    pub fn start<S, P>(&mut self, source: &S, port: &mut P) -> Result<StartOutcome, JumpError>
    where
        S: TextSource + ?Sized,
        P: PresentationPort + ?Sized,
    {
        if self.is_active() {
            debug!("jump session already active");
            return Ok(StartOutcome::AlreadyActive);
        }

        let result = self.begin(source, port);
        self.abort_on_error(port, result)
    }

    pub fn handle_key<S, P>(
        &mut self,
        key: JumpKey,
        source: &S,
        port: &mut P,
    ) -> Result<KeyOutcome, JumpError>
    where
        S: TextSource + ?Sized,
        P: PresentationPort + ?Sized,
    {
        if !self.is_active() {
            return Ok(KeyOutcome::Inactive);
        }

        let result = self.transition(key, source, port);
        self.abort_on_error(port, result)
    }

    pub fn cancel<P>(&mut self, port: &mut P) -> Result<KeyOutcome, JumpError>
    where
        P: PresentationPort + ?Sized,
    {
        if !self.is_active() {
            return Ok(KeyOutcome::Inactive);
        }
        let result = self.finish(port, Termination::Cancelled);
        self.abort_on_error(port, result)
    }

    fn begin<S, P>(&mut self, source: &S, port: &mut P) -> Result<StartOutcome, HostError>
    where
        S: TextSource + ?Sized,
        P: PresentationPort + ?Sized,
    {
        self.text = VisibleText::new(source.visible_text_blocks()?);
        self.state = SessionState::AwaitingFirstChar;
        port.set_mode(true)?;
        self.present_current(port)?;
        debug!(blocks = self.text.blocks().len(), "jump session started");
        Ok(StartOutcome::Started)
    }

    fn transition<S, P>(
        &mut self,
        key: JumpKey,
        source: &S,
        port: &mut P,
    ) -> Result<KeyOutcome, HostError>
    where
        S: TextSource + ?Sized,
        P: PresentationPort + ?Sized,
    {
        match key {
            JumpKey::Cancel => self.finish(port, Termination::Cancelled),
            JumpKey::Accept => match self.targets() {
                [only] => {
                    let target = only.start();
                    self.jump_to(port, target)
                }
                _ => Ok(KeyOutcome::Unchanged),
            },
            JumpKey::Backspace => self.backspace(source, port),
            JumpKey::Char(ch) => match self.labeled_target(ch) {
                Some(target) => self.jump_to(port, target),
                None => self.advance(port, ch),
            },
        }
    }

    fn labeled_target(&self, ch: char) -> Option<TextPosition> {
        let SessionState::Narrowing { targets, labels, .. } = &self.state else {
            return None;
        };
        let idx = labels.get(Label::new(ch))?;
        targets.get(idx).map(JumpTarget::start)
    }

    fn advance<P>(&mut self, port: &mut P, ch: char) -> Result<KeyOutcome, HostError>
    where
        P: PresentationPort + ?Sized,
    {
        let (mut typed, previous) =
            match std::mem::replace(&mut self.state, SessionState::AwaitingFirstChar) {
                SessionState::Narrowing { typed, targets, .. } => (typed, Some(targets)),
                _ => (TypedChars::new(), None),
            };

        let targets = narrow(&self.text, previous.as_deref(), ch);
        typed.push(ch);
        self.settle(port, typed, targets)
    }

    fn backspace<S, P>(&mut self, source: &S, port: &mut P) -> Result<KeyOutcome, HostError>
    where
        S: TextSource + ?Sized,
        P: PresentationPort + ?Sized,
    {
        if !self.backspace || self.typed().is_empty() {
            return Ok(KeyOutcome::Unchanged);
        }

        let mut typed = TypedChars::from_slice(self.typed());
        typed.pop();
        self.text = VisibleText::new(source.visible_text_blocks()?);

        if typed.is_empty() {
            self.state = SessionState::AwaitingFirstChar;
            self.present_current(port)?;
            return Ok(KeyOutcome::AwaitingFirstChar);
        }

        let targets = replay(&self.text, &typed);
        self.settle(port, typed, targets)
    }

    /// Resolves a fresh target set: exhausted, auto-jumped, or presented for further narrowing.
    fn settle<P>(
        &mut self,
        port: &mut P,
        typed: TypedChars,
        targets: Vec<JumpTarget>,
    ) -> Result<KeyOutcome, HostError>
    where
        P: PresentationPort + ?Sized,
    {
        if targets.is_empty() {
            let typed: String = typed.iter().collect();
            debug!(%typed, "jump search exhausted");
            return self.finish(port, Termination::Exhausted);
        }
        if let ([only], true) = (targets.as_slice(), self.auto_jump) {
            let target = only.start();
            return self.jump_to(port, target);
        }

        self.enter_narrowing(port, typed, targets)
    }

    fn enter_narrowing<P>(
        &mut self,
        port: &mut P,
        typed: TypedChars,
        targets: Vec<JumpTarget>,
    ) -> Result<KeyOutcome, HostError>
    where
        P: PresentationPort + ?Sized,
    {
        let labels = assign(&self.text, &targets, &self.alphabet);
        let outcome = KeyOutcome::Narrowed { matches: targets.len(), labeled: labels.len() };
        self.state = SessionState::Narrowing { typed, targets, labels };
        self.present_current(port)?;
        Ok(outcome)
    }

    fn present_current<P>(&mut self, port: &mut P) -> Result<(), HostError>
    where
        P: PresentationPort + ?Sized,
    {
        let mut frame =
            OverlayFrame { dim_regions: self.text.extents(), ..OverlayFrame::default() };
        if let SessionState::Narrowing { targets, labels, .. } = &self.state {
            frame.highlights = targets.iter().map(JumpTarget::range).collect();
            frame.labels = labels
                .iter()
                .map(|(label, idx)| (label, targets[idx].range().end()))
                .collect();
        }

        if let Some(previous) = self.overlay.take() {
            port.release(previous)?;
        }
        self.overlay = Some(port.present(&frame)?);
        port.show_typed_prefix(self.typed())
    }

    fn jump_to<P>(&mut self, port: &mut P, target: TextPosition) -> Result<KeyOutcome, HostError>
    where
        P: PresentationPort + ?Sized,
    {
        port.move_cursor_or_extend_selection(target)?;
        port.reveal_in_view(target)?;
        debug!(%target, "jumped");
        self.finish(port, Termination::Jumped(target))
    }

    fn finish<P>(&mut self, port: &mut P, termination: Termination) -> Result<KeyOutcome, HostError>
    where
        P: PresentationPort + ?Sized,
    {
        let result = self.teardown(port);
        self.state = SessionState::Terminated(termination);
        debug!(?termination, "jump session terminated");
        result.map(|()| KeyOutcome::Finished(termination))
    }

    /// Releases every host resource held by the session. Each step runs even if an earlier one
    /// failed; the first error is returned.
    fn teardown<P>(&mut self, port: &mut P) -> Result<(), HostError>
    where
        P: PresentationPort + ?Sized,
    {
        let released = match self.overlay.take() {
            Some(overlay) => port.release(overlay),
            None => Ok(()),
        };
        let cleared = port.show_typed_prefix(&[]);
        let mode = port.set_mode(false);
        released.and(cleared).and(mode)
    }

    fn abort_on_error<P, T>(
        &mut self,
        port: &mut P,
        result: Result<T, HostError>,
    ) -> Result<T, JumpError>
    where
        P: PresentationPort + ?Sized,
    {
        result.map_err(|err| {
            warn!(%err, "aborting jump session");
            if let Err(teardown) = self.teardown(port) {
                warn!(err = %teardown, "teardown after abort failed");
            }
            self.state = SessionState::Idle;
            JumpError::Host(err)
        })
    }
}

#[cfg(test)]
mod tests;

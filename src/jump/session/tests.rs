// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use rstest::{fixture, rstest};

use super::{
    JumpController, JumpError, JumpKey, KeyOutcome, SessionState, StartOutcome, Termination,
};
use crate::host::{HostError, OverlayFrame, OverlayId, PresentationPort};
use crate::jump::LabelAlphabet;
use crate::model::{Label, TextBlock, TextPosition};

#[derive(Debug, Default)]
struct RecordingPort {
    mode: bool,
    mode_changes: usize,
    next_id: u64,
    live: BTreeSet<OverlayId>,
    frames: Vec<OverlayFrame>,
    typed: String,
    cursor: Option<TextPosition>,
    revealed: Option<TextPosition>,
    fail_present_after: Option<usize>,
    fail_mode_off: bool,
}

impl RecordingPort {
    fn last_frame(&self) -> &OverlayFrame {
        self.frames.last().expect("a presented frame")
    }
}

impl PresentationPort for RecordingPort {
    fn set_mode(&mut self, active: bool) -> Result<(), HostError> {
        if !active && self.fail_mode_off {
            return Err(HostError::Rejected { reason: "mode flag is locked".to_owned() });
        }
        self.mode = active;
        self.mode_changes += 1;
        Ok(())
    }

    fn present(&mut self, frame: &OverlayFrame) -> Result<OverlayId, HostError> {
        if self.fail_present_after.is_some_and(|limit| self.frames.len() >= limit) {
            return Err(HostError::Rejected { reason: "overlay budget".to_owned() });
        }
        self.next_id += 1;
        let id = OverlayId::new(self.next_id);
        self.live.insert(id);
        self.frames.push(frame.clone());
        Ok(id)
    }

    fn release(&mut self, overlay: OverlayId) -> Result<(), HostError> {
        if self.live.remove(&overlay) {
            Ok(())
        } else {
            Err(HostError::Rejected { reason: format!("unknown overlay {}", overlay.get()) })
        }
    }

    fn show_typed_prefix(&mut self, typed: &[char]) -> Result<(), HostError> {
        self.typed = typed.iter().collect();
        Ok(())
    }

    fn move_cursor_or_extend_selection(&mut self, target: TextPosition) -> Result<(), HostError> {
        self.cursor = Some(target);
        Ok(())
    }

    fn reveal_in_view(&mut self, target: TextPosition) -> Result<(), HostError> {
        self.revealed = Some(target);
        Ok(())
    }
}

struct Harness {
    source: Vec<TextBlock>,
    port: RecordingPort,
    controller: JumpController,
}

impl Harness {
    fn new(text: &str) -> Self {
        Self {
            source: vec![TextBlock::new(0, text)],
            port: RecordingPort::default(),
            controller: JumpController::default(),
        }
    }

    fn start(&mut self) -> StartOutcome {
        self.controller.start(&self.source, &mut self.port).expect("start")
    }

    fn key(&mut self, key: JumpKey) -> KeyOutcome {
        self.controller.handle_key(key, &self.source, &mut self.port).expect("key")
    }

    fn typed(&mut self, chars: &str) -> KeyOutcome {
        let mut outcome = KeyOutcome::Inactive;
        for ch in chars.chars() {
            outcome = self.key(JumpKey::from_char(ch));
        }
        outcome
    }

    fn assert_released(&self) {
        assert!(self.port.live.is_empty(), "overlays still live: {:?}", self.port.live);
        assert!(!self.port.mode);
        assert!(self.port.typed.is_empty());
        assert!(!self.controller.is_active());
    }
}

#[fixture]
fn foo_boo() -> Harness {
    Harness::new("foo boo")
}

#[rstest]
fn start_enters_mode_and_dims_visible_text(mut foo_boo: Harness) {
    assert_eq!(foo_boo.start(), StartOutcome::Started);
    assert!(foo_boo.port.mode);
    assert_eq!(foo_boo.controller.state(), &SessionState::AwaitingFirstChar);

    let frame = foo_boo.port.last_frame();
    assert_eq!(frame.dim_regions.len(), 1);
    assert!(frame.highlights.is_empty());
    assert!(frame.labels.is_empty());
}

#[rstest]
fn second_start_while_active_is_a_no_op(mut foo_boo: Harness) {
    foo_boo.start();
    foo_boo.typed("o");
    let frames = foo_boo.port.frames.len();

    assert_eq!(foo_boo.start(), StartOutcome::AlreadyActive);
    assert_eq!(foo_boo.port.frames.len(), frames);
    assert_eq!(foo_boo.port.mode_changes, 1);
    assert_eq!(foo_boo.controller.typed(), &['o']);
}

#[rstest]
fn keys_without_a_session_are_not_consumed(mut foo_boo: Harness) {
    assert_eq!(foo_boo.key(JumpKey::Char('o')), KeyOutcome::Inactive);
    assert!(foo_boo.port.frames.is_empty());
}

#[rstest]
fn each_narrowing_step_replaces_the_previous_overlay(mut foo_boo: Harness) {
    foo_boo.start();
    assert_eq!(foo_boo.typed("o"), KeyOutcome::Narrowed { matches: 4, labeled: 4 });
    assert_eq!(foo_boo.port.live.len(), 1);
    assert_eq!(foo_boo.typed("o"), KeyOutcome::Narrowed { matches: 2, labeled: 2 });
    assert_eq!(foo_boo.port.live.len(), 1);
    assert_eq!(foo_boo.port.typed, "oo");
    assert_eq!(foo_boo.port.frames.len(), 3);
}

#[rstest]
fn labels_are_presented_after_the_typed_prefix(mut foo_boo: Harness) {
    foo_boo.start();
    foo_boo.typed("oo");

    let frame = foo_boo.port.last_frame();
    assert_eq!(
        frame.labels,
        vec![
            (Label::new('a'), TextPosition::new(0, 3)),
            (Label::new('s'), TextPosition::new(0, 7)),
        ]
    );
    assert_eq!(frame.highlights, foo_boo.controller.ranges());
}

#[rstest]
fn typing_a_label_jumps_and_tears_down(mut foo_boo: Harness) {
    foo_boo.start();
    foo_boo.typed("oo");

    let outcome = foo_boo.typed("s");
    let target = TextPosition::new(0, 5);
    assert_eq!(outcome, KeyOutcome::Finished(Termination::Jumped(target)));
    assert_eq!(foo_boo.port.cursor, Some(target));
    assert_eq!(foo_boo.port.revealed, Some(target));
    assert_eq!(foo_boo.controller.state(), &SessionState::Terminated(Termination::Jumped(target)));
    foo_boo.assert_released();
}

#[rstest]
fn accept_with_several_candidates_keeps_narrowing(mut foo_boo: Harness) {
    foo_boo.start();
    foo_boo.typed("o");
    let labels = foo_boo.controller.labels().cloned();

    assert_eq!(foo_boo.key(JumpKey::Accept), KeyOutcome::Unchanged);
    assert!(foo_boo.controller.is_active());
    assert_eq!(foo_boo.controller.labels().cloned(), labels);
    assert_eq!(foo_boo.port.cursor, None);
}

#[rstest]
fn accept_before_any_char_is_ignored(mut foo_boo: Harness) {
    foo_boo.start();
    assert_eq!(foo_boo.key(JumpKey::Accept), KeyOutcome::Unchanged);
    assert_eq!(foo_boo.controller.state(), &SessionState::AwaitingFirstChar);
}

#[rstest]
#[case::escape(JumpKey::Cancel)]
#[case::escape_char(JumpKey::from_char('\u{1b}'))]
fn cancel_releases_everything_without_jumping(mut foo_boo: Harness, #[case] key: JumpKey) {
    foo_boo.start();
    foo_boo.typed("o");

    assert_eq!(foo_boo.key(key), KeyOutcome::Finished(Termination::Cancelled));
    assert_eq!(foo_boo.port.cursor, None);
    foo_boo.assert_released();
}

#[rstest]
fn cancel_from_awaiting_first_char(mut foo_boo: Harness) {
    foo_boo.start();
    let outcome = foo_boo.controller.cancel(&mut foo_boo.port).expect("cancel");
    assert_eq!(outcome, KeyOutcome::Finished(Termination::Cancelled));
    foo_boo.assert_released();
}

#[rstest]
fn exhaustion_terminates_without_jump(mut foo_boo: Harness) {
    foo_boo.start();
    foo_boo.typed("o");
    assert_eq!(foo_boo.typed("x"), KeyOutcome::Finished(Termination::Exhausted));
    assert!(foo_boo.controller.ranges().is_empty());
    assert_eq!(foo_boo.port.cursor, None);
    foo_boo.assert_released();
}

#[rstest]
fn backspace_to_empty_prefix_waits_for_first_char(mut foo_boo: Harness) {
    foo_boo.start();
    foo_boo.typed("o");

    assert_eq!(foo_boo.key(JumpKey::Backspace), KeyOutcome::AwaitingFirstChar);
    assert_eq!(foo_boo.controller.state(), &SessionState::AwaitingFirstChar);
    assert!(foo_boo.port.last_frame().highlights.is_empty());
    assert_eq!(foo_boo.port.live.len(), 1);
    assert!(foo_boo.port.typed.is_empty());

    assert_eq!(foo_boo.key(JumpKey::Backspace), KeyOutcome::Unchanged);
}

#[rstest]
fn backspace_rescans_the_current_view(mut foo_boo: Harness) {
    foo_boo.start();
    foo_boo.typed("oo");
    foo_boo.source = vec![TextBlock::new(3, "boot")];

    assert_eq!(foo_boo.key(JumpKey::Backspace), KeyOutcome::Narrowed { matches: 2, labeled: 2 });
    assert_eq!(foo_boo.controller.targets()[0].start(), TextPosition::new(3, 1));
}

#[test]
fn disabled_backspace_is_ignored() {
    let mut harness = Harness::new("foo");
    harness.controller = JumpController::default().with_backspace(false);
    harness.start();
    harness.typed("fo");
    assert_eq!(harness.key(JumpKey::Backspace), KeyOutcome::Unchanged);
    assert_eq!(harness.controller.typed(), &['f', 'o']);
}

#[test]
fn auto_jump_fires_on_a_single_survivor() {
    let mut harness = Harness::new("fn foo() {}\nfn bar() {}");
    harness.controller = JumpController::default().with_auto_jump(true);
    harness.start();
    harness.typed("fn");

    let outcome = harness.typed(" b");
    let target = TextPosition::new(1, 0);
    assert_eq!(outcome, KeyOutcome::Finished(Termination::Jumped(target)));
    harness.assert_released();
}

#[test]
fn auto_jump_applies_after_a_backspace_replay() {
    let mut harness = Harness::new("ab ab");
    harness.controller = JumpController::default().with_auto_jump(true);
    harness.start();
    assert_eq!(harness.typed("ab"), KeyOutcome::Narrowed { matches: 2, labeled: 2 });

    // the view scrolled; only one "a" is left on screen
    harness.source = vec![TextBlock::new(7, "ab xy")];
    let target = TextPosition::new(7, 0);
    assert_eq!(
        harness.key(JumpKey::Backspace),
        KeyOutcome::Finished(Termination::Jumped(target))
    );
    assert_eq!(harness.port.cursor, Some(target));
    harness.assert_released();
}

#[test]
fn custom_alphabet_skips_banned_continuations() {
    let mut harness = Harness::new("ab ac");
    harness.controller = JumpController::new(LabelAlphabet::new("bcx").expect("alphabet"));
    harness.start();

    assert_eq!(harness.typed("a"), KeyOutcome::Narrowed { matches: 2, labeled: 1 });
    // 'b' continues the search instead of selecting a label
    assert_eq!(harness.typed("b"), KeyOutcome::Narrowed { matches: 1, labeled: 1 });
}

#[test]
fn unmounted_text_source_aborts_to_idle() {
    let mut port = RecordingPort::default();
    let source: Option<Vec<TextBlock>> = None;
    let mut controller = JumpController::default();

    let err = controller.start(&source, &mut port).unwrap_err();
    assert_eq!(err, JumpError::Host(HostError::Unmounted { collaborator: "text source" }));
    assert_eq!(controller.state(), &SessionState::Idle);
    assert!(port.frames.is_empty());
    assert!(!port.mode);
}

#[test]
fn unmounted_port_aborts_to_idle() {
    let source = vec![TextBlock::new(0, "foo")];
    let mut port: Option<RecordingPort> = None;
    let mut controller = JumpController::default();

    let err = controller.start(&source, &mut port).unwrap_err();
    assert!(matches!(err, JumpError::Host(HostError::Unmounted { .. })));
    assert_eq!(controller.state(), &SessionState::Idle);
}

#[test]
fn host_failure_mid_session_releases_and_goes_idle() {
    let mut harness = Harness::new("foo boo");
    harness.port.fail_present_after = Some(2);
    harness.start();
    harness.typed("o");

    let result =
        harness.controller.handle_key(JumpKey::Char('o'), &harness.source, &mut harness.port);
    assert!(matches!(result, Err(JumpError::Host(HostError::Rejected { .. }))));
    assert_eq!(harness.controller.state(), &SessionState::Idle);
    harness.assert_released();
}

#[test]
fn failing_teardown_after_abort_still_reports_the_first_error() {
    let mut harness = Harness::new("foo boo");
    harness.port.fail_present_after = Some(2);
    harness.port.fail_mode_off = true;
    harness.start();
    harness.typed("o");

    let result =
        harness.controller.handle_key(JumpKey::Char('o'), &harness.source, &mut harness.port);
    assert_eq!(
        result,
        Err(JumpError::Host(HostError::Rejected { reason: "overlay budget".to_owned() }))
    );
    assert_eq!(harness.controller.state(), &SessionState::Idle);
    assert!(harness.port.live.is_empty());
    assert!(harness.port.typed.is_empty());
}

#[test]
fn a_new_session_starts_fresh_after_termination() {
    let mut harness = Harness::new("foo boo");
    harness.start();
    harness.typed("o\u{1b}");

    assert_eq!(harness.start(), StartOutcome::Started);
    assert!(harness.controller.typed().is_empty());
    assert_eq!(harness.typed("b"), KeyOutcome::Narrowed { matches: 1, labeled: 1 });
}

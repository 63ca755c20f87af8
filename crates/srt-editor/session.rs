//! Host-facing editing session
//!
//! An [`EditorSession`] ties an [`EditorSurface`] and a [`PromptSource`]
//! to the configuration and runs the interactive flow of every editing
//! operation: snapshot the buffer, parse, locate the record under the
//! caret, suspend for prompts, apply the command and publish the
//! outcome back to the surface. Commands themselves stay pure; all I/O
//! and prompting lives here.

use crate::commands::{
    endpoint_at_column, jump_target, AddCommand, CommandResult, DeleteEmptyLinesCommand,
    Endpoint, EnforceCommand, FixIndicesCommand, FixTimingAllCommand, FixTimingCommand,
    ImportCommand, MergeCommand, Outcome, ShiftCommand, ShiftTimeCommand, ShiftTimeStrictCommand,
    SortCommand, SplitCommand, SplitStrategy, StretchCommand, SubtitleCommand, SwapCommand,
    TimingRules,
};
use crate::config::{EditorConfig, SplitMode};
use crate::core::{Caret, EditorError, EditorSurface, PromptSource, Result};
use srt_core::{find_subtitle, parse_subtitles, Subtitle};

/// How an interactive operation concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The buffer was changed (or a jump happened)
    Applied {
        /// Status message for the host to show, if any
        message: Option<String>,
        /// Non-fatal per-step failures from batch commands
        warnings: Vec<String>,
    },
    /// Nothing needed changing
    Unchanged {
        /// Explanation of why there was nothing to do
        message: Option<String>,
    },
    /// The user abandoned a prompt; nothing happened
    Cancelled,
}

/// One interactive editing session over a host buffer.
pub struct EditorSession<'a, S: EditorSurface, P: PromptSource> {
    surface: &'a mut S,
    prompts: &'a mut P,
    config: EditorConfig,
}

impl<'a, S: EditorSurface, P: PromptSource> EditorSession<'a, S, P> {
    /// Bind a session to a surface and a prompt source.
    pub fn new(surface: &'a mut S, prompts: &'a mut P, config: EditorConfig) -> Self {
        Self {
            surface,
            prompts,
            config,
        }
    }

    /// The configuration this session operates under.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn snapshot(&self) -> Result<(Vec<String>, Caret, Vec<Subtitle>)> {
        let lines = self.surface.lines();
        let caret = self.surface.caret();
        let subs = parse_subtitles(&lines)?;
        Ok((lines, caret, subs))
    }

    fn locate(subs: &[Subtitle], line: usize) -> Result<usize> {
        find_subtitle(subs, line).ok_or(EditorError::NotInSubtitle)
    }

    /// Record range covered by the caret's selection, inclusive.
    fn selection(subs: &[Subtitle], caret: &Caret) -> Result<(usize, usize)> {
        let first = Self::locate(subs, caret.line)?;
        let last = if caret.has_selection() {
            find_subtitle(subs, caret.end_line).unwrap_or(first)
        } else {
            first
        };
        Ok((first.min(last), first.max(last)))
    }

    fn publish(&mut self, result: CommandResult) -> SessionOutcome {
        let CommandResult {
            outcome,
            message,
            warnings,
        } = result;
        match outcome {
            Outcome::Replaced(lines) => self.surface.replace_all(lines),
            Outcome::Patched(edits) => self.surface.replace_lines(edits),
            Outcome::NoOp => return SessionOutcome::Unchanged { message },
        }
        SessionOutcome::Applied { message, warnings }
    }

    fn run(&mut self, command: &dyn SubtitleCommand) -> Result<SessionOutcome> {
        let (lines, _, subs) = self.snapshot()?;
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Require the caret to sit on the current record's timing line and
    /// address one of its two timecodes.
    fn endpoint_under_caret(subs: &[Subtitle], caret: &Caret) -> Result<(usize, Endpoint)> {
        let at = Self::locate(subs, caret.line)?;
        if caret.line != subs[at].timing_line() {
            return Err(EditorError::NotOnDurationLine);
        }
        let endpoint = endpoint_at_column(caret.column).ok_or(EditorError::NotOnDurationLine)?;
        Ok((at, endpoint))
    }

    /// Merge the record under the caret with its successor, or fold the
    /// whole selection into one record.
    pub fn merge(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let (first, mut last) = Self::selection(&subs, &caret)?;
        if last == first {
            last = first + 1;
        }
        let result = MergeCommand { first, last }.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Split the record under the caret in two.
    pub fn split(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let at = Self::locate(&subs, caret.line)?;
        let strategy = match self.config.split_mode {
            SplitMode::Length => SplitStrategy::Length,
            SplitMode::Half => SplitStrategy::Half,
            SplitMode::Ask => match self.prompts.choose_split_strategy() {
                Some(strategy) => strategy,
                None => return Ok(SessionOutcome::Cancelled),
            },
        };
        let command = SplitCommand {
            at,
            strategy,
            pause: self.config.split_pause(),
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Rewrite out-of-sequence index lines.
    pub fn fix_indices(&mut self) -> Result<SessionOutcome> {
        self.run(&FixIndicesCommand)
    }

    /// Run the index fixer only when the configuration asks for it, as
    /// hosts do after every buffer change.
    pub fn autofix_indices(&mut self) -> Result<SessionOutcome> {
        if !self.config.autofix_index {
            return Ok(SessionOutcome::Unchanged { message: None });
        }
        self.fix_indices()
    }

    /// Rebuild the document in start-time order.
    pub fn sort(&mut self) -> Result<SessionOutcome> {
        self.run(&SortCommand)
    }

    /// Repair the record under the caret against its successor.
    pub fn fix_timing(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let at = Self::locate(&subs, caret.line)?;
        let command = FixTimingCommand {
            at,
            rules: TimingRules::from_config(&self.config),
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Repair every consecutive pair in the document.
    pub fn fix_timing_all(&mut self) -> Result<SessionOutcome> {
        self.run(&FixTimingAllCommand {
            rules: TimingRules::from_config(&self.config),
        })
    }

    /// Shift the selected records by a prompted offset, then re-sort.
    pub fn shift(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let (first, last) = Self::selection(&subs, &caret)?;
        let Some(delta) = self
            .prompts
            .input_time("Time to shift", Some(self.config.shift_ms))
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = ShiftCommand {
            first,
            last,
            delta,
            resort: true,
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Shift every record in the document by a prompted offset.
    pub fn shift_all(&mut self) -> Result<SessionOutcome> {
        let (lines, _, subs) = self.snapshot()?;
        let Some(delta) = self
            .prompts
            .input_time("Time to shift", Some(self.config.shift_ms))
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = ShiftCommand::whole_document(subs.len(), delta);
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Import a donor document after the record under the caret: donor
    /// times are made relative to that record's end plus a prompted
    /// pause.
    pub fn import(&mut self, donor: Vec<String>) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let at = Self::locate(&subs, caret.line)?;
        let Some(pause) = self
            .prompts
            .input_time("Time to shift", Some(self.config.min_pause))
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = ImportCommand {
            other: donor,
            offset: subs[at].end_ms + pause,
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Import a donor document shifted by a prompted absolute offset.
    pub fn import_absolute(&mut self, donor: Vec<String>) -> Result<SessionOutcome> {
        let (lines, _, subs) = self.snapshot()?;
        let Some(offset) = self.prompts.input_time("Time to shift", Some(0)) else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = ImportCommand {
            other: donor,
            offset,
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Insert a fresh empty record after the one under the caret.
    pub fn add(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let after = Self::locate(&subs, caret.line)?;
        let Some(pause) = self
            .prompts
            .input_time("Pause time", Some(self.config.min_pause))
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = AddCommand {
            after,
            pause,
            min_duration: self.config.min_duration,
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Shift the timecode under the caret by a prompted offset.
    pub fn shift_time(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let (at, endpoint) = Self::endpoint_under_caret(&subs, &caret)?;
        let Some(delta) = self
            .prompts
            .input_time("Time to shift", Some(self.config.shift_ms))
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = ShiftTimeCommand { at, endpoint, delta };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Shift the timecode under the caret, dragging a colliding
    /// neighbour along to preserve the minimum pause.
    pub fn shift_time_strict(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let (at, endpoint) = Self::endpoint_under_caret(&subs, &caret)?;
        let Some(delta) = self
            .prompts
            .input_time("Time to shift", Some(self.config.shift_ms))
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = ShiftTimeStrictCommand {
            at,
            endpoint,
            delta,
            min_pause: self.config.min_pause,
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Make the neighbour of the timecode under the caret yield the
    /// minimum pause.
    pub fn enforce(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let (at, endpoint) = Self::endpoint_under_caret(&subs, &caret)?;
        let command = EnforceCommand {
            at,
            endpoint,
            min_pause: self.config.min_pause,
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Swap the text of the record under the caret with its successor.
    pub fn swap(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        let at = Self::locate(&subs, caret.line)?;
        let result = SwapCommand { at }.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Linearly remap the selected records (or the whole document when
    /// nothing is selected) onto two prompted anchor times.
    pub fn stretch(&mut self) -> Result<SessionOutcome> {
        let (lines, caret, subs) = self.snapshot()?;
        if subs.is_empty() {
            return Err(EditorError::NotInSubtitle);
        }
        let whole = (0, subs.len() - 1);
        let (first, last) = match Self::selection(&subs, &caret) {
            Ok(range) if range.0 != range.1 => range,
            _ => whole,
        };
        let Some((new_first, first_anchor)) =
            self.prompts.input_anchor("Enter first subtitle time")
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let Some((new_last, last_anchor)) = self.prompts.input_anchor("Enter last subtitle time")
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let command = StretchCommand {
            first,
            last,
            first_anchor,
            last_anchor,
            new_first,
            new_last,
        };
        let result = command.apply(&lines, &subs)?;
        Ok(self.publish(result))
    }

    /// Move the caret to the record with a prompted sequence number.
    pub fn jump(&mut self) -> Result<SessionOutcome> {
        let (_, _, subs) = self.snapshot()?;
        let Some(index) = self.prompts.input_index("Subtitle number") else {
            return Ok(SessionOutcome::Cancelled);
        };
        let Some(line) = jump_target(&subs, index) else {
            return Err(EditorError::command_failed(format!(
                "no subtitle with index {index}"
            )));
        };
        self.surface.reveal_line(line);
        Ok(SessionOutcome::Applied {
            message: None,
            warnings: Vec::new(),
        })
    }

    /// Sweep out blank lines that split records apart.
    pub fn delete_empty_lines(&mut self) -> Result<SessionOutcome> {
        let lines = self.surface.lines();
        let result = DeleteEmptyLinesCommand.apply(&lines, &[])?;
        Ok(self.publish(result))
    }
}

//! Property-based tests for the structural commands
//!
//! Generates randomized but well-formed documents and checks the
//! invariants the commands promise: atomic failure, order and interval
//! preservation, idempotent repairs.

use proptest::prelude::*;
use srt_editor::commands::{
    FixIndicesCommand, Outcome, ShiftCommand, SortCommand, SubtitleCommand,
};
use srt_editor::{parse_subtitles, Subtitle, TimeMs};

/// One record's worth of raw material: duration, gap from the previous
/// record and a text line.
fn arb_record() -> impl Strategy<Value = (TimeMs, TimeMs, String)> {
    (
        500i64..5_000,
        1i64..2_000,
        "[a-zA-Z ,.!?]{1,40}",
    )
}

/// Build a well-formed document from record material, with sequential
/// indices and strictly increasing intervals.
fn arb_document() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_record(), 1..12).prop_map(|records| {
        let mut lines = Vec::new();
        let mut clock: TimeMs = 0;
        for (i, (duration, gap, text)) in records.into_iter().enumerate() {
            let start = clock + gap;
            let end = start + duration;
            clock = end;
            lines.push((i + 1).to_string());
            lines.push(srt_core::time::duration_line(start, end));
            lines.push(text);
            lines.push(String::new());
        }
        lines
    })
}

fn replaced(result: srt_editor::CommandResult) -> Vec<String> {
    match result.outcome {
        Outcome::Replaced(new) => new,
        other => panic!("expected replacement, got {other:?}"),
    }
}

fn parsed(lines: &[String]) -> Vec<Subtitle> {
    parse_subtitles(lines).expect("generated document must parse")
}

proptest! {
    #[test]
    fn generated_documents_parse(doc in arb_document()) {
        let subs = parsed(&doc);
        prop_assert!(!subs.is_empty());
    }

    #[test]
    fn sort_is_idempotent(doc in arb_document()) {
        let subs = parsed(&doc);
        let once = replaced(SortCommand.apply(&doc, &subs).unwrap());
        let once_subs = parsed(&once);
        let twice = replaced(SortCommand.apply(&once, &once_subs).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sort_preserves_every_interval(doc in arb_document()) {
        let subs = parsed(&doc);
        let sorted = replaced(SortCommand.apply(&doc, &subs).unwrap());
        let sorted_subs = parsed(&sorted);

        let mut before: Vec<(TimeMs, TimeMs)> =
            subs.iter().map(|s| (s.start_ms, s.end_ms)).collect();
        before.sort_unstable();
        let mut after: Vec<(TimeMs, TimeMs)> =
            sorted_subs.iter().map(|s| (s.start_ms, s.end_ms)).collect();
        after.sort_unstable();
        prop_assert_eq!(before, after);

        let starts: Vec<TimeMs> = sorted_subs.iter().map(|s| s.start_ms).collect();
        prop_assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn shift_round_trips(doc in arb_document(), delta in 0i64..10_000) {
        let subs = parsed(&doc);
        let there = replaced(
            ShiftCommand::whole_document(subs.len(), delta).apply(&doc, &subs).unwrap(),
        );
        let there_subs = parsed(&there);
        let back = replaced(
            ShiftCommand::whole_document(there_subs.len(), -delta)
                .apply(&there, &there_subs)
                .unwrap(),
        );
        prop_assert_eq!(doc, back);
    }

    #[test]
    fn failed_shift_returns_no_lines(doc in arb_document()) {
        let subs = parsed(&doc);
        // The generator leaves the first start at gap >= 1ms, so this
        // always underflows.
        let delta = -(subs[0].start_ms + 1);
        let result = ShiftCommand::whole_document(subs.len(), delta).apply(&doc, &subs);
        prop_assert!(result.is_err());
    }

    #[test]
    fn fix_indices_leaves_sequential_documents_alone(doc in arb_document()) {
        let subs = parsed(&doc);
        let result = FixIndicesCommand.apply(&doc, &subs).unwrap();
        prop_assert_eq!(result.outcome, Outcome::NoOp);
    }

    #[test]
    fn flexible_times_can_express_any_strict_timecode(ms in 0i64..360_000_000) {
        let rendered = srt_core::time::format_timecode(ms);
        prop_assert_eq!(srt_core::time::parse_flexible(&rendered), Some(ms));
    }
}

//! Line-based three-way merge.

use std::ops::Range;
use std::time::Instant;

use similar::{Algorithm, DiffOp, capture_diff_slices_deadline};

/// Result of merging two edits of a common base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Merged text.
    pub content: String,
    /// One message per incoming hunk dropped in favour of the current side.
    pub dropped: Vec<String>,
}

/// A contiguous edit: base lines `base` replaced by `lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hunk<'a> {
    pub(crate) base: Range<usize>,
    pub(crate) lines: Vec<&'a str>,
}

impl Hunk<'_> {
    /// Whether the hunk touches a cluster spanning `start..end`.
    fn touches(&self, start: usize, end: usize) -> bool {
        self.base.start < end || self.base.start == start
    }
}

/// Merges `current` and `incoming`, both derived from `base`.
///
/// Hunks that only one side changed are applied, hunks both sides changed
/// identically are applied once. Where the sides overlap with different
/// edits the current side wins and the dropped incoming hunk is reported.
/// Past `deadline` the underlying diffs coarsen instead of running on.
pub fn three_way_merge(
    base: &str,
    current: &str,
    incoming: &str,
    deadline: Option<Instant>,
) -> MergeOutcome {
    let base_lines: Vec<&str> = base.lines().collect();
    let current_lines: Vec<&str> = current.lines().collect();
    let incoming_lines: Vec<&str> = incoming.lines().collect();
    let ours = hunks(&base_lines, &current_lines, deadline);
    let theirs = hunks(&base_lines, &incoming_lines, deadline);

    let mut merged: Vec<&str> = Vec::new();
    let mut dropped = Vec::new();
    let mut pos = 0;
    let (mut i, mut j) = (0, 0);

    while i < ours.len() || j < theirs.len() {
        let overlapping = match (ours.get(i), theirs.get(j)) {
            (Some(a), Some(b)) => {
                let (first, second) = if a.base.start <= b.base.start { (a, b) } else { (b, a) };
                second.touches(first.base.start, first.base.end)
            }
            _ => false,
        };

        if !overlapping {
            let take_ours = match (ours.get(i), theirs.get(j)) {
                (Some(a), Some(b)) => a.base.start <= b.base.start,
                (Some(_), None) => true,
                _ => false,
            };
            let hunk = if take_ours {
                i += 1;
                &ours[i - 1]
            } else {
                j += 1;
                &theirs[j - 1]
            };
            merged.extend_from_slice(&base_lines[pos..hunk.base.start]);
            merged.extend_from_slice(&hunk.lines);
            pos = hunk.base.end;
            continue;
        }

        // Grow the cluster until no hunk on either side touches it.
        let start = ours[i].base.start.min(theirs[j].base.start);
        let mut end = start;
        let (mut ci, mut cj) = (i, j);
        loop {
            let mut grew = false;
            while let Some(h) = ours.get(ci).filter(|h| h.touches(start, end)) {
                end = end.max(h.base.end);
                ci += 1;
                grew = true;
            }
            while let Some(h) = theirs.get(cj).filter(|h| h.touches(start, end)) {
                end = end.max(h.base.end);
                cj += 1;
                grew = true;
            }
            if !grew {
                break;
            }
        }

        merged.extend_from_slice(&base_lines[pos..start]);
        let mut cursor = start;
        for hunk in &ours[i..ci] {
            merged.extend_from_slice(&base_lines[cursor..hunk.base.start]);
            merged.extend_from_slice(&hunk.lines);
            cursor = hunk.base.end;
        }
        merged.extend_from_slice(&base_lines[cursor..end]);

        if ours[i..ci] != theirs[j..cj] {
            for hunk in &theirs[j..cj] {
                dropped.push(describe_dropped(hunk));
            }
        }

        pos = end;
        i = ci;
        j = cj;
    }
    merged.extend_from_slice(&base_lines[pos..]);

    let mut content = merged.join("\n");
    if !content.is_empty() && current.ends_with('\n') {
        content.push('\n');
    }

    MergeOutcome { content, dropped }
}

/// Edits turning `base_lines` into `other_lines`, sorted by base position.
///
/// Each hunk spans the gap between two runs of equal lines, so hunks never
/// overlap and consecutive hunks are separated by at least one kept line.
pub(crate) fn hunks<'a>(
    base_lines: &[&str],
    other_lines: &[&'a str],
    deadline: Option<Instant>,
) -> Vec<Hunk<'a>> {
    let anchors = capture_diff_slices_deadline(Algorithm::Myers, base_lines, other_lines, deadline)
        .into_iter()
        .filter_map(|op| match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => Some((old_index, new_index, len)),
            _ => None,
        })
        .chain(std::iter::once((base_lines.len(), other_lines.len(), 0)));

    let mut result = Vec::new();
    let (mut old_pos, mut new_pos) = (0, 0);
    for (old_index, new_index, len) in anchors {
        if old_index > old_pos || new_index > new_pos {
            result.push(Hunk {
                base: old_pos..old_index,
                lines: other_lines[new_pos..new_index].to_vec(),
            });
        }
        old_pos = old_index + len;
        new_pos = new_index + len;
    }
    result
}

fn describe_dropped(hunk: &Hunk<'_>) -> String {
    let location = if hunk.base.is_empty() {
        format!("insertion before base line {}", hunk.base.start + 1)
    } else if hunk.base.len() == 1 {
        format!("change to base line {}", hunk.base.start + 1)
    } else {
        format!("change to base lines {}-{}", hunk.base.start + 1, hunk.base.end)
    };
    format!("Incoming {location} dropped in favour of the current version")
}

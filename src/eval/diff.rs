//! Character-level diff for mistake reports.

use serde::{Deserialize, Serialize};

/// One edit operation between an expected and an actual string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DiffOp {
    /// Text present in both
    Equal { text: String },
    /// Text only in the actual string
    Insert { text: String },
    /// Text only in the expected string
    Delete { text: String },
    /// Expected text replaced by actual text
    Replace { expected: String, actual: String },
}

impl DiffOp {
    /// Text this op contributes to the expected string.
    pub fn expected_text(&self) -> &str {
        match self {
            DiffOp::Equal { text } | DiffOp::Delete { text } => text,
            DiffOp::Replace { expected, .. } => expected,
            DiffOp::Insert { .. } => "",
        }
    }

    /// Text this op contributes to the actual string.
    pub fn actual_text(&self) -> &str {
        match self {
            DiffOp::Equal { text } | DiffOp::Insert { text } => text,
            DiffOp::Replace { actual, .. } => actual,
            DiffOp::Delete { .. } => "",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal,
    Insert,
    Delete,
}

/// Diff `expected` against `actual` character by character.
///
/// The common prefix and suffix are trimmed before a longest-common-subsequence
/// pass over the middle. Adjacent deletes and inserts coalesce into a replace.
pub fn diff_chars(expected: &str, actual: &str) -> Vec<DiffOp> {
    let a: Vec<char> = expected.chars().collect();
    let b: Vec<char> = actual.chars().collect();

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let mut edits: Vec<(Edit, char)> = Vec::with_capacity(a.len().max(b.len()));
    edits.extend(a[..prefix].iter().map(|&c| (Edit::Equal, c)));
    edits.extend(lcs_edits(&a[prefix..a.len() - suffix], &b[prefix..b.len() - suffix]));
    edits.extend(a[a.len() - suffix..].iter().map(|&c| (Edit::Equal, c)));

    coalesce(&edits)
}

/// Largest LCS table built for one diff; bigger middles become one replace.
const MAX_TABLE_CELLS: usize = 4_000_000;

fn lcs_edits(a: &[char], b: &[char]) -> Vec<(Edit, char)> {
    let (n, m) = (a.len(), b.len());
    let width = m + 1;
    if (n + 1).saturating_mul(width) > MAX_TABLE_CELLS {
        log::debug!("Diff of {}x{} chars too large, reporting a single replace", n, m);
        let mut edits = Vec::with_capacity(n + m);
        edits.extend(a.iter().map(|&c| (Edit::Delete, c)));
        edits.extend(b.iter().map(|&c| (Edit::Insert, c)));
        return edits;
    }

    // lengths[i * width + j] = LCS length of a[i..] and b[j..]
    let mut lengths = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i * width + j] = if a[i] == b[j] {
                lengths[(i + 1) * width + j + 1] + 1
            } else {
                lengths[(i + 1) * width + j].max(lengths[i * width + j + 1])
            };
        }
    }

    let mut edits = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            edits.push((Edit::Equal, a[i]));
            i += 1;
            j += 1;
        } else if lengths[(i + 1) * width + j] >= lengths[i * width + j + 1] {
            edits.push((Edit::Delete, a[i]));
            i += 1;
        } else {
            edits.push((Edit::Insert, b[j]));
            j += 1;
        }
    }
    edits.extend(a[i..].iter().map(|&c| (Edit::Delete, c)));
    edits.extend(b[j..].iter().map(|&c| (Edit::Insert, c)));
    edits
}

fn coalesce(edits: &[(Edit, char)]) -> Vec<DiffOp> {
    let mut ops = Vec::new();
    let mut index = 0;

    while index < edits.len() {
        let kind = edits[index].0;
        if kind == Edit::Equal {
            let text = run(edits, &mut index, |e| e == Edit::Equal);
            ops.push(DiffOp::Equal { text });
            continue;
        }

        // A change run mixes deletes and inserts until the next equal char.
        let start = index;
        while index < edits.len() && edits[index].0 != Edit::Equal {
            index += 1;
        }
        let change = &edits[start..index];
        let expected: String = change
            .iter()
            .filter(|(e, _)| *e == Edit::Delete)
            .map(|(_, c)| c)
            .collect();
        let actual: String = change
            .iter()
            .filter(|(e, _)| *e == Edit::Insert)
            .map(|(_, c)| c)
            .collect();

        ops.push(match (expected.is_empty(), actual.is_empty()) {
            (false, true) => DiffOp::Delete { text: expected },
            (true, false) => DiffOp::Insert { text: actual },
            _ => DiffOp::Replace { expected, actual },
        });
    }

    ops
}

fn run(edits: &[(Edit, char)], index: &mut usize, keep: impl Fn(Edit) -> bool) -> String {
    let mut text = String::new();
    while *index < edits.len() && keep(edits[*index].0) {
        text.push(edits[*index].1);
        *index += 1;
    }
    text
}

/// Render ops in a compact inline notation: `[-deleted-]`, `{+inserted+}`.
pub fn render_inline(ops: &[DiffOp]) -> String {
    let mut out = String::new();
    for op in ops {
        match op {
            DiffOp::Equal { text } => out.push_str(text),
            DiffOp::Insert { text } => {
                out.push_str("{+");
                out.push_str(text);
                out.push_str("+}");
            }
            DiffOp::Delete { text } => {
                out.push_str("[-");
                out.push_str(text);
                out.push_str("-]");
            }
            DiffOp::Replace { expected, actual } => {
                out.push_str("[-");
                out.push_str(expected);
                out.push_str("-]{+");
                out.push_str(actual);
                out.push_str("+}");
            }
        }
    }
    out
}

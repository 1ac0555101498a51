//! Word-level diff between two revisions of a text.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOp {
    Equal,
    Insert,
    Delete,
}

/// A run of consecutive words sharing one op, joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub op: DiffOp,
    pub text: String,
}

pub fn diff_words(old: &str, new: &str) -> Vec<DiffSegment> {
    let a: Vec<&str> = old.split_whitespace().collect();
    let b: Vec<&str> = new.split_whitespace().collect();

    // lcs[i][j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out: Vec<DiffSegment> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        if i < a.len() && j < b.len() && a[i] == b[j] {
            push(&mut out, DiffOp::Equal, a[i]);
            i += 1;
            j += 1;
        } else if j < b.len() && (i == a.len() || lcs[i][j + 1] >= lcs[i + 1][j]) {
            push(&mut out, DiffOp::Insert, b[j]);
            j += 1;
        } else {
            push(&mut out, DiffOp::Delete, a[i]);
            i += 1;
        }
    }
    out
}

fn push(out: &mut Vec<DiffSegment>, op: DiffOp, word: &str) {
    match out.last_mut() {
        Some(last) if last.op == op => {
            last.text.push(' ');
            last.text.push_str(word);
        }
        _ => out.push(DiffSegment {
            op,
            text: word.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(op: DiffOp, text: &str) -> DiffSegment {
        DiffSegment {
            op,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_identical_text_is_one_equal_run() {
        assert_eq!(
            diff_words("lower the LR", "lower  the\nLR"),
            vec![seg(DiffOp::Equal, "lower the LR")]
        );
    }

    #[test]
    fn test_replace_middle_word() {
        let d = diff_words("lower LR by 10x", "lower LR by 100x today");
        assert_eq!(
            d,
            vec![
                seg(DiffOp::Equal, "lower LR by"),
                seg(DiffOp::Insert, "100x today"),
                seg(DiffOp::Delete, "10x"),
            ]
        );
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(diff_words("", "hello there"), vec![seg(DiffOp::Insert, "hello there")]);
        assert_eq!(diff_words("gone", ""), vec![seg(DiffOp::Delete, "gone")]);
        assert!(diff_words("", "").is_empty());
    }
}

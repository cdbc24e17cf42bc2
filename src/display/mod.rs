//! Pure mapping from an operation outcome to a renderable view.
//!
//! Large values are carried in full through the view; only
//! [`LargeNumber::display`] shortens them.

mod clipboard;

pub use clipboard::{ClipboardSink, SystemClipboard, copy};

use crate::model::{OperationId, OperationResult};

pub const DEFAULT_DISPLAY_LEN: usize = 40;
pub const COMPACT_DISPLAY_LEN: usize = 24;

const ELLIPSIS: &str = " … ";
const MIN_PREFIX: usize = 8;

/// Shortens `value` to roughly `max` characters, keeping both ends.
pub fn display_truncate(value: &str, max: usize) -> String {
    let len = value.chars().count();
    if len <= max {
        return value.to_string();
    }
    let prefix_len = MIN_PREFIX.max(max / 2);
    let suffix_len = max / 2;
    let prefix: String = value.chars().take(prefix_len).collect();
    let suffix: String = value.chars().skip(len - suffix_len).collect();
    format!("{prefix}{ELLIPSIS}{suffix}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimeBadge {
    Prime,
    Composite,
    Unknown,
}

impl PrimeBadge {
    pub fn from_flag(is_prime: Option<bool>) -> Self {
        match is_prime {
            Some(true) => PrimeBadge::Prime,
            Some(false) => PrimeBadge::Composite,
            None => PrimeBadge::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrimeBadge::Prime => "Prime",
            PrimeBadge::Composite => "Composite",
            PrimeBadge::Unknown => "Unknown",
        }
    }
}

/// A value that may be too long to show, with its untouched source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeNumber {
    pub label: String,
    pub full: String,
    pub max_len: usize,
}

impl LargeNumber {
    fn new(label: impl Into<String>, full: impl Into<String>, max_len: usize) -> Self {
        Self {
            label: label.into(),
            full: full.into(),
            max_len,
        }
    }

    pub fn display(&self) -> String {
        display_truncate(&self.full, self.max_len)
    }

    pub fn is_truncated(&self) -> bool {
        self.full.chars().count() > self.max_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBlock {
    Error(String),
    Text(String),
    Field { label: String, value: String },
    Badge(PrimeBadge),
    Number(LargeNumber),
    Rows(Vec<ViewRow>),
    Chips { label: String, items: Vec<String> },
    Empty(String),
    Document { label: String, path: String },
}

/// One line of a list-shaped result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub key: String,
    pub detail: Option<String>,
    pub value: LargeNumber,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub heading: String,
    pub blocks: Vec<ViewBlock>,
}

impl ResultView {
    pub fn is_error(&self) -> bool {
        matches!(self.blocks.as_slice(), [ViewBlock::Error(_)])
    }

    /// Values that can be copied in full, in display order.
    pub fn copy_targets(&self) -> Vec<&LargeNumber> {
        let mut targets = Vec::new();
        for block in &self.blocks {
            match block {
                ViewBlock::Number(number) => targets.push(number),
                ViewBlock::Rows(rows) => targets.extend(rows.iter().map(|row| &row.value)),
                _ => {}
            }
        }
        targets
    }
}

pub fn render(operation: OperationId, result: &OperationResult) -> ResultView {
    let heading = format!("Result for problem {}", operation.number());
    let blocks = match result {
        // Rendered the same for every operation.
        OperationResult::Error(message) => {
            return ResultView {
                heading: "Error".into(),
                blocks: vec![ViewBlock::Error(message.clone())],
            };
        }
        OperationResult::PatternPrime(found) => {
            let mut blocks = vec![
                field("n", found.n.map(|n| n.to_string())),
                ViewBlock::Badge(PrimeBadge::from_flag(found.is_prime)),
            ];
            match &found.pattern_number {
                Some(number) => blocks.push(ViewBlock::Number(LargeNumber::new(
                    "Pattern number",
                    number.as_str(),
                    DEFAULT_DISPLAY_LEN,
                ))),
                None => blocks.push(field("Pattern number", None)),
            }
            blocks
        }
        OperationResult::RepunitPrimes(rows) if rows.is_empty() => {
            vec![ViewBlock::Empty("No repunit primes found in range.".into())]
        }
        OperationResult::RepunitPrimes(rows) => vec![ViewBlock::Rows(
            rows.iter()
                .map(|row| ViewRow {
                    key: format!("N={}", row.n),
                    detail: Some(format!("length {}", row.repunit.digit_count())),
                    value: LargeNumber::new(
                        format!("R({})", row.n),
                        row.repunit.as_str(),
                        COMPACT_DISPLAY_LEN,
                    ),
                })
                .collect(),
        )],
        OperationResult::MersennePrimes(rows) if rows.is_empty() => {
            vec![ViewBlock::Empty("No Mersenne primes found in range.".into())]
        }
        OperationResult::MersennePrimes(rows) => vec![ViewBlock::Rows(
            rows.iter()
                .map(|row| ViewRow {
                    key: format!("p={}", row.p),
                    detail: None,
                    value: LargeNumber::new(
                        format!("2^{} - 1", row.p),
                        row.mersenne_prime.as_str(),
                        DEFAULT_DISPLAY_LEN,
                    ),
                })
                .collect(),
        )],
        OperationResult::PrimesBetweenSquares(found) => {
            let [lower, upper] = found.interval;
            let mut blocks = vec![field("Interval", Some(format!("{lower} — {upper}")))];
            if found.primes_found.is_empty() {
                blocks.push(ViewBlock::Empty("No primes found.".into()));
            } else {
                blocks.push(ViewBlock::Text(format!(
                    "Found {} primes between {lower} and {upper}",
                    found.primes_found.len()
                )));
                blocks.push(ViewBlock::Chips {
                    label: "Primes found".into(),
                    items: found.primes_found.iter().map(u64::to_string).collect(),
                });
            }
            blocks
        }
        OperationResult::PalindromicPrime(found) => vec![
            field("Digits", Some(found.digits.to_string())),
            ViewBlock::Badge(PrimeBadge::Prime),
            ViewBlock::Number(LargeNumber::new(
                "Palindromic prime",
                found.palindromic_prime.as_str(),
                DEFAULT_DISPLAY_LEN,
            )),
        ],
        OperationResult::PerfectNumber(found) => {
            let mut blocks = vec![
                field("p", Some(found.p.to_string())),
                ViewBlock::Number(LargeNumber::new(
                    "Perfect number",
                    found.perfect_number.as_str(),
                    DEFAULT_DISPLAY_LEN,
                )),
            ];
            if let Some(path) = &found.pdf_path {
                blocks.push(ViewBlock::Document {
                    label: "Proof".into(),
                    path: path.clone(),
                });
            }
            blocks
        }
        OperationResult::GoldbachPair(found) => {
            let mut blocks = vec![field("n", Some(found.n.to_string()))];
            match found.pair {
                Some((first, second)) => {
                    blocks.push(field("Pair", Some(format!("{first} + {second}"))))
                }
                None => blocks.push(ViewBlock::Empty("No pair found.".into())),
            }
            blocks
        }
    };
    ResultView { heading, blocks }
}

fn field(label: impl Into<String>, value: Option<String>) -> ViewBlock {
    ViewBlock::Field {
        label: label.into(),
        value: value.unwrap_or_else(|| "—".into()),
    }
}

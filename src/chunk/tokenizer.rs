//! Token counting supplied by the host.

use tiktoken_rs::CoreBPE;

use crate::error::{Error, Result};

/// Counts tokens in a piece of text.
///
/// Implementations must be deterministic: the same text always yields the
/// same count. Any closure `Fn(&str) -> Result<usize>` is a counter.
pub trait TokenCounter {
    /// Count the tokens in `text`.
    fn count_tokens(&self, text: &str) -> Result<usize>;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> Result<usize>,
{
    fn count_tokens(&self, text: &str) -> Result<usize> {
        self(text)
    }
}

/// Counts whitespace-separated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenCounter;

impl TokenCounter for WhitespaceTokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(text.split_whitespace().count())
    }
}

/// Counts BPE tokens with the `o200k_base` encoding used by GPT-4o.
///
/// Special-token text is encoded as ordinary text, so counting never fails
/// once the encoder is built.
pub struct BpeTokenCounter {
    bpe: CoreBPE,
}

impl BpeTokenCounter {
    /// Build the `o200k_base` encoder.
    pub fn o200k() -> Result<Self> {
        let bpe = tiktoken_rs::o200k_base().map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl std::fmt::Debug for BpeTokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BpeTokenCounter").finish_non_exhaustive()
    }
}

impl TokenCounter for BpeTokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(self.bpe.encode_ordinary(text).len())
    }
}

/// Estimates BPE token counts from character classes.
///
/// Roughly four characters per token for Latin script, two for CJK and five
/// for Arabic. Close enough for noise filtering and window sizing when the
/// host has no real tokenizer at hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateTokenCounter;

impl EstimateTokenCounter {
    /// Estimate the token count of `text`.
    pub fn estimate(text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        if text.is_ascii() {
            return text.len().div_ceil(4);
        }

        let mut chars: usize = 0;
        let mut cjk: usize = 0;
        let mut arabic: usize = 0;
        for c in text.chars() {
            chars += 1;
            if is_cjk(c) {
                cjk += 1;
            } else if is_arabic(c) {
                arabic += 1;
            }
        }

        if cjk > 0 {
            cjk.div_ceil(2) + (chars - cjk).div_ceil(4)
        } else if arabic > chars / 2 {
            chars.div_ceil(5)
        } else {
            chars.div_ceil(4)
        }
    }
}

impl TokenCounter for EstimateTokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(Self::estimate(text))
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF     // CJK Unified Ideographs
        | 0x3040..=0x309F   // Hiragana
        | 0x30A0..=0x30FF   // Katakana
        | 0xAC00..=0xD7AF)  // Hangul
}

fn is_arabic(c: char) -> bool {
    matches!(c as u32, 0x0600..=0x06FF | 0x0750..=0x077F)
}

//! Encoding detection with `chardetng`.

use crate::plugins::{EncodingDetector, Plugin};
use chardetng::EncodingDetector as Chardet;
use encoding_rs::Encoding;

/// Guesses the encoding of a byte sample.
///
/// A byte-order mark is authoritative; otherwise `chardetng` guesses, with
/// UTF-8 allowed as an answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChardetngDetector;

impl Plugin for ChardetngDetector {
    fn name(&self) -> &str {
        "chardetng"
    }
}

impl EncodingDetector for ChardetngDetector {
    fn detect(&self, sample: &[u8]) -> &'static str {
        if let Some((encoding, _)) = Encoding::for_bom(sample) {
            return encoding.name();
        }

        let mut detector = Chardet::new();
        detector.feed(sample, true);
        detector.guess(None, true).name()
    }
}

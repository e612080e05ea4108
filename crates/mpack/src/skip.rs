//! Skipping and validating encoded values without materializing them.

use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::format::Family;

impl Decoder<'_> {
    /// Advances past one value and returns how many bytes it occupied.
    ///
    /// Applies the same truncation and depth checks as [`Decoder::read_any`];
    /// string payloads are not checked for UTF-8.
    pub fn skip_any(&mut self) -> Result<usize, DecodeError> {
        let start = self.position();
        self.skip_value(0)?;
        Ok(self.position() - start)
    }

    fn skip_value(&mut self, depth: usize) -> Result<(), DecodeError> {
        let format = self.format()?;
        match format.family() {
            Family::Nil | Family::Bool => {}
            Family::Int | Family::Float => self.reader.skip(format.scalar_width())?,
            Family::Str | Family::Bin => {
                let len = self.length(format)?;
                self.reader.skip(len)?;
            }
            Family::Ext => {
                let len = self.length(format)?;
                self.reader.skip(1)?;
                self.reader.skip(len)?;
            }
            Family::Array => {
                let len = self.length(format)?;
                let depth = self.enter(depth)?;
                self.check_items(len, 1)?;
                for _ in 0..len {
                    self.skip_value(depth)?;
                }
            }
            Family::Map => {
                let len = self.length(format)?;
                let depth = self.enter(depth)?;
                self.check_items(len, 2)?;
                for _ in 0..len {
                    self.skip_value(depth)?;
                    self.skip_value(depth)?;
                }
            }
        }
        Ok(())
    }
}

/// Checks that exactly one well-formed value of `size` bytes starts at `offset`.
pub fn validate(input: &[u8], offset: usize, size: usize) -> Result<(), DecodeError> {
    let mut decoder = Decoder::new(input);
    decoder.seek(offset)?;
    let actual = decoder.skip_any()?;
    if actual != size {
        return Err(DecodeError::SizeMismatch {
            expected: size,
            actual,
        });
    }
    Ok(())
}

/// Configuration options for the stream parser.
///
/// # Examples
///
/// ```rust
/// use jsonsieve::{ParserOptions, StreamParser};
///
/// let parser = StreamParser::new(ParserOptions {
///     allow_unicode_whitespace: true,
///     ..ParserOptions::default()
/// });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Whether to skip any Unicode whitespace between tokens.
    ///
    /// By default only space (U+0020), horizontal tab (U+0009) and line feed
    /// (U+000A) are skipped outside strings. Enabling this also skips carriage
    /// returns and every other character with the Unicode `White_Space`
    /// property, which is what CRLF-terminated files need.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Maximum number of containers that may be open at once.
    ///
    /// Opening one more object or array fails with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded)
    /// and resets the parser like any other syntax error. This bounds the
    /// memory held by the element stack and the recursion needed to drop a
    /// parsed value.
    ///
    /// # Default
    ///
    /// `1024`
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: false,
            max_depth: 1024,
        }
    }
}

/// Configuration options for reading from a byte source.
#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    /// Number of bytes requested from the reader per read call. Each read
    /// becomes one [`consume`](crate::StreamParser::consume) call.
    ///
    /// # Default
    ///
    /// `4100`
    pub chunk_size: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { chunk_size: 4100 }
    }
}

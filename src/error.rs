/// Errors that can occur during HTML-to-Markdown conversion.
///
/// Parsing and cleaning are permissive and never fail; only the renderer can
/// report an error, when it meets a tree it cannot serialize.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConversionError {
    #[error("render error: {0}")]
    Render(String),
}

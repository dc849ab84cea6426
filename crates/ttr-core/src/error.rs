use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// Every opponent needs exactly one outcome and vice versa.
    #[error("got {opponents} opponent ratings but {outcomes} match outcomes")]
    LengthMismatch { opponents: usize, outcomes: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time failures. Everything past configuration is handled as a
/// recoverable present/absent outcome instead of an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing parent selector: the embed needs a target element")]
    MissingParentSelector,

    #[error("Invalid parent selector `{selector}`: expected an ID selector like `#clinic-map`")]
    InvalidParentSelector { selector: String },

    #[error("Missing clinic type")]
    MissingClinicType,

    #[error("Unknown clinic type `{value}` (expected one of: a, b, c)")]
    UnknownClinicType { value: String },
}

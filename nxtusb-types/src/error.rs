pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid {kind} value: 0x{value:02X}")]
    InvalidValue {
        kind: &'static str,
        value: u8,
    },
}

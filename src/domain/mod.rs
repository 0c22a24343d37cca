//! ドメイン層
//!
//! 値の型変換、XML要素からレコードへの変換、引数の検証、表示用フォーマット。
pub mod coerce;
pub mod error;
pub mod formatter;
pub mod mapper;
pub mod validator;

pub use error::DomainError;

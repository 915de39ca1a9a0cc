pub mod chat;
pub mod maps;
pub mod observability;
pub mod speech;
pub mod storage;

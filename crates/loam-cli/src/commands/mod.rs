pub mod add;
pub mod common;
pub mod delete;
pub mod edit;
pub mod export;
pub mod favorite;
pub mod list;
pub mod search;
pub mod storage;

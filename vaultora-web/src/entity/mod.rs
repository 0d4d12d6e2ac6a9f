//! `SeaORM` entities.

pub mod password;

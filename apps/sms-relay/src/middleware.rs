//! # ミドルウェア
//!
//! SMS 中継サーバー用のミドルウェアを提供する。

mod cors;

pub use cors::cors;
